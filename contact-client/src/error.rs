//! Error types for contact-client

use contact_core::messages::{SEND_FAILED, SERVER_UNREACHABLE};
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never got a response
    #[error("{}", SERVER_UNREACHABLE)]
    Unreachable(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// The server answered 2xx with a body that is not the API envelope
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Base URL could not be parsed or joined
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Error list markup could not be rendered
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl ClientError {
    /// Message to show next to the form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unreachable(_) | ClientError::Rejected { .. } => self.to_string(),
            _ => SEND_FAILED.to_string(),
        }
    }

    /// Whether the failure happened before the server could answer
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable(_))
    }
}
