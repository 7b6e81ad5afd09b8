use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

impl From<config::ConfigError> for ContactError {
    fn from(err: config::ConfigError) -> Self {
        ContactError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContactError>;
