//! Configuration for contact-rs
//!
//! Settings come from an optional `contact.toml` (or a file passed on the
//! command line) overlaid by environment variables. Environment keys map to
//! fields by lowercasing, so `SMTP_HOST` fills `smtp_host`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ContactError, Result};

/// Placeholder reported for settings that are absent or empty
pub const NOT_SET: &str = "NOT SET";

/// Placeholder reported for the SMTP password when it is present
pub const SECRET_HIDDEN: &str = "SET (hidden)";

/// Runtime settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub smtp_host: Option<String>,
    pub smtp_port: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    /// Implicit TLS instead of STARTTLS
    pub smtp_secure: bool,
    /// Recipient of the notification for each submission
    pub admin_email: Option<String>,
    pub company_name: Option<String>,
    pub company_email: Option<String>,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
    /// "pretty" or "json"
    pub log_format: String,
}

/// Resolved SMTP relay parameters
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub credentials: Option<(String, String)>,
    pub implicit_tls: bool,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.credentials.as_ref().map(|(user, _)| user))
            .field("implicit_tls", &self.implicit_tls)
            .finish()
    }
}

/// Which SMTP variables are configured, as returned by the diagnostics endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigReport {
    #[serde(rename = "SMTP_HOST")]
    pub smtp_host: String,
    #[serde(rename = "SMTP_PORT")]
    pub smtp_port: String,
    #[serde(rename = "SMTP_USER")]
    pub smtp_user: String,
    #[serde(rename = "SMTP_PASS")]
    pub smtp_pass: String,
    #[serde(rename = "ADMIN_EMAIL")]
    pub admin_email: String,
    #[serde(rename = "COMPANY_NAME")]
    pub company_name: String,
    #[serde(rename = "COMPANY_EMAIL")]
    pub company_email: String,
}

/// Missing flags for the four variables required to reach the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissingSmtpVars {
    #[serde(rename = "SMTP_HOST")]
    pub smtp_host: bool,
    #[serde(rename = "SMTP_PORT")]
    pub smtp_port: bool,
    #[serde(rename = "SMTP_USER")]
    pub smtp_user: bool,
    #[serde(rename = "SMTP_PASS")]
    pub smtp_pass: bool,
}

impl MissingSmtpVars {
    pub fn any(&self) -> bool {
        self.smtp_host || self.smtp_port || self.smtp_user || self.smtp_pass
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn shown(value: &Option<String>) -> String {
    present(value).unwrap_or(NOT_SET).to_string()
}

impl Settings {
    /// Load settings from `path` (or `contact.toml` if present) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, config::Environment::default())
    }

    /// Load settings from an explicit variable map instead of the process environment
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self> {
        Self::build(None, config::Environment::default().source(Some(vars)))
    }

    fn build(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("contact").required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    pub fn smtp_host(&self) -> Option<&str> {
        present(&self.smtp_host)
    }

    pub fn smtp_user(&self) -> Option<&str> {
        present(&self.smtp_user)
    }

    pub fn admin_email(&self) -> Option<&str> {
        present(&self.admin_email)
    }

    pub fn company_name(&self) -> Option<&str> {
        present(&self.company_name)
    }

    pub fn company_email(&self) -> Option<&str> {
        present(&self.company_email)
    }

    /// Address the HTTP server binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Resolve the relay parameters needed to open a transport
    pub fn smtp(&self) -> Result<SmtpSettings> {
        let host = self
            .smtp_host()
            .ok_or(ContactError::MissingSetting("SMTP_HOST"))?
            .to_string();

        let port = present(&self.smtp_port)
            .ok_or(ContactError::MissingSetting("SMTP_PORT"))?
            .trim()
            .parse::<u16>()
            .map_err(|e| ContactError::Config(format!("Invalid SMTP_PORT: {}", e)))?;

        let credentials = match (self.smtp_user(), present(&self.smtp_pass)) {
            (Some(user), Some(pass)) => Some((user.to_string(), pass.to_string())),
            _ => None,
        };

        Ok(SmtpSettings {
            host,
            port,
            credentials,
            implicit_tls: self.smtp_secure,
        })
    }

    /// Presence report with the password masked
    pub fn report(&self) -> ConfigReport {
        ConfigReport {
            smtp_host: shown(&self.smtp_host),
            smtp_port: shown(&self.smtp_port),
            smtp_user: shown(&self.smtp_user),
            smtp_pass: if present(&self.smtp_pass).is_some() {
                SECRET_HIDDEN.to_string()
            } else {
                NOT_SET.to_string()
            },
            admin_email: shown(&self.admin_email),
            company_name: shown(&self.company_name),
            company_email: shown(&self.company_email),
        }
    }

    pub fn missing_smtp_vars(&self) -> MissingSmtpVars {
        MissingSmtpVars {
            smtp_host: present(&self.smtp_host).is_none(),
            smtp_port: present(&self.smtp_port).is_none(),
            smtp_user: present(&self.smtp_user).is_none(),
            smtp_pass: present(&self.smtp_pass).is_none(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            smtp_host: None,
            smtp_port: None,
            smtp_user: None,
            smtp_pass: None,
            smtp_secure: false,
            admin_email: None,
            company_name: None,
            company_email: None,
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_pass", &present(&self.smtp_pass).map(|_| SECRET_HIDDEN))
            .field("smtp_secure", &self.smtp_secure)
            .field("admin_email", &self.admin_email)
            .field("company_name", &self.company_name)
            .field("company_email", &self.company_email)
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}
