//! SMTP diagnostics endpoints
//!
//! Operator-facing, so responses are in English. The SMTP password is only
//! ever reported as present or absent.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::api::handlers::AppState;
use crate::config::{ConfigReport, MissingSmtpVars};
use crate::notify;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCheckResponse {
    pub success: bool,
    pub message: String,
    pub config: ConfigReport,
    pub has_all_required_vars: bool,
}

#[derive(Debug, Serialize)]
pub struct IncompleteConfigResponse {
    pub success: bool,
    pub message: String,
    pub missing: MissingSmtpVars,
}

#[derive(Debug, Serialize)]
pub struct TestEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/test-email-config - Report which SMTP settings are present
pub async fn email_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ConfigCheckResponse {
        success: true,
        message: "Email configuration check".to_string(),
        config: state.settings.report(),
        has_all_required_vars: !state.settings.missing_smtp_vars().any(),
    })
}

/// POST /api/test-email - Send a diagnostic message through the relay
pub async fn send_test_email(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let missing = state.settings.missing_smtp_vars();
    if missing.any() {
        return (
            StatusCode::BAD_REQUEST,
            Json(IncompleteConfigResponse {
                success: false,
                message: "Email configuration is incomplete. Please check your .env file."
                    .to_string(),
                missing,
            }),
        )
            .into_response();
    }

    match notify::send_test_message(state.transports.as_ref(), &state.settings).await {
        Ok(()) => (
            StatusCode::OK,
            Json(TestEmailResponse {
                success: true,
                message: "Test email sent successfully!".to_string(),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Test email error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TestEmailResponse {
                    success: false,
                    message: "Failed to send test email".to_string(),
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
