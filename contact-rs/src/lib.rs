//! contact-rs: Contact form backend
//!
//! Receives contact form submissions over HTTP, validates them, and relays two
//! HTML emails through an SMTP server: a notification to the site admin and an
//! automatic reply to the person who wrote in.
//!
//! # Endpoints
//!
//! - `POST /api/contact`: Submit the form (JSON or urlencoded)
//! - `OPTIONS /api/contact`: Preflight response for the form
//! - `GET /api/health`: Liveness check
//! - `GET /api/test-email-config`: Which SMTP settings are present
//! - `POST /api/test-email`: Send a diagnostic message
//!
//! # Example
//!
//! ```no_run
//! use contact_rs::api::ApiServer;
//! use contact_rs::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(None)?;
//!     ApiServer::new(settings).run().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP routes and handlers
//! - [`config`]: Settings from file and environment
//! - [`error`]: Error types and handling
//! - [`mailer`]: SMTP and in-memory transports
//! - [`notify`]: Building and sending the two emails
//! - [`templates`]: HTML bodies

pub mod api;
pub mod config;
pub mod error;
pub mod mailer;
pub mod notify;
pub mod templates;

// Re-export commonly used types
pub use config::Settings;
pub use error::{ContactError, Result};
