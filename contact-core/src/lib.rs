//! contact-core: shared model for the contact form pipeline
//!
//! Both the backend (`contact-rs`) and the form client (`contact-client`)
//! validate the same fields with the same rules and report failures with the
//! same messages. Those pieces live here.
//!
//! # Modules
//!
//! - [`envelope`]: The `{success, message}` API response
//! - [`submission`]: The [`ContactSubmission`] payload and its field list
//! - [`validation`]: Email and phone patterns, rule violations
//! - [`messages`]: User-facing messages returned by the API

pub mod envelope;
pub mod messages;
pub mod submission;
pub mod validation;

pub use envelope::ApiResponse;
pub use submission::{ContactSubmission, Field};
pub use validation::{filter_phone_input, is_valid_email, is_valid_phone, Violation};
