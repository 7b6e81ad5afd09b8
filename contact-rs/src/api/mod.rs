//! REST API module for contact-rs
//!
//! Provides the contact, health and SMTP diagnostics endpoints

pub mod diagnostics;
pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::ApiServer;
