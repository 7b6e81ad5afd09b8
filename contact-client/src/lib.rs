//! contact-client: Contact form front end
//!
//! Holds the form values, validates them with the same rules the backend
//! applies, and submits them to the contact API.
//!
//! # Example
//!
//! ```no_run
//! use contact_client::{ContactClient, ContactForm, FormController, SubmitOutcome};
//!
//! # async fn run(form: ContactForm) -> Result<(), Box<dyn std::error::Error>> {
//! let client = ContactClient::new("http://localhost:3000/api")?;
//! let mut controller = FormController::new(client);
//!
//! match controller.submit(&form).await {
//!     SubmitOutcome::Redirect(page) => println!("go to {}", page),
//!     SubmitOutcome::Invalid(errors) => eprintln!("{}", errors.join("\n")),
//!     SubmitOutcome::Failed(message) => eprintln!("{}", message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod form;

pub use client::{ContactClient, HealthStatus, DEFAULT_BASE_URL};
pub use controller::{FormController, SubmitButton, SubmitOutcome};
pub use error::{ClientError, Result};
pub use form::ContactForm;
