//! HTTP client for the contact API

use contact_core::messages::REQUEST_FAILED;
use contact_core::{ApiResponse, ContactSubmission};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, Result};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Body of `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Client for one contact API deployment
#[derive(Debug, Clone)]
pub struct ContactClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ContactClient {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:3000/api`)
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;

        // Keep the last segment when joining endpoint names
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        Ok(self.base_url.join(name)?)
    }

    /// POST a submission to `/contact`
    ///
    /// # Errors
    /// - [`ClientError::Unreachable`] if no response arrived
    /// - [`ClientError::Rejected`] for non-2xx answers, with the server's message
    /// - [`ClientError::InvalidResponse`] for a 2xx answer that is not the envelope
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<ApiResponse> {
        let url = self.endpoint("contact")?;
        debug!("Sending request to: {}", url);

        let response = self
            .http
            .post(url)
            .json(submission)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(ClientError::Unreachable)?;
        let envelope = serde_json::from_str::<ApiResponse>(&body);

        if !status.is_success() {
            let (message, errors) = match envelope {
                Ok(envelope) if !envelope.message.is_empty() => (envelope.message, envelope.errors),
                _ => (REQUEST_FAILED.to_string(), Vec::new()),
            };
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
                errors,
            });
        }

        envelope.map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// GET `/health`
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint("health")?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: REQUEST_FAILED.to_string(),
                errors: Vec::new(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
