//! API request handlers

use axum::{
    body::{to_bytes, Body},
    extract::{FromRequest, Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::{SecondsFormat, Utc};
use contact_core::messages::{
    INVALID_EMAIL, MALFORMED_REQUEST, REQUIRED_FIELDS_MISSING, SEND_FAILED, SUBMISSION_ACCEPTED,
};
use contact_core::{is_valid_email, ApiResponse, ContactSubmission, Violation};
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::Settings;
use crate::mailer::TransportFactory;
use crate::notify;

/// Shared application state
pub struct AppState {
    pub settings: Arc<Settings>,
    pub transports: Arc<dyn TransportFactory>,
}

/// Largest contact body accepted
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Contact form body, accepted as JSON or as an urlencoded form
///
/// An empty body decodes as a submission with every field empty.
pub struct ContactPayload(pub ContactSubmission);

fn malformed(detail: impl std::fmt::Display) -> (StatusCode, Json<ApiResponse>) {
    warn!("Rejected contact payload: {}", detail);
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::failure(MALFORMED_REQUEST)),
    )
}

#[axum::async_trait]
impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, MAX_BODY_BYTES).await.map_err(malformed)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ContactPayload(ContactSubmission::default()));
        }

        let is_form = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);
        let req = Request::from_parts(parts, Body::from(bytes));

        let decoded = if is_form {
            Form::<ContactSubmission>::from_request(req, state)
                .await
                .map(|Form(submission)| submission)
                .map_err(|e| e.body_text())
        } else {
            Json::<ContactSubmission>::from_request(req, state)
                .await
                .map(|Json(submission)| submission)
                .map_err(|e| e.body_text())
        };

        decoded.map(ContactPayload).map_err(malformed)
    }
}

/// POST /api/contact - Validate a submission and send both emails
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ContactPayload(submission): ContactPayload,
) -> impl IntoResponse {
    let submission = submission.trimmed();

    let missing = submission.required_violations();
    if !missing.is_empty() {
        warn!("Contact submission missing {} field(s)", missing.len());
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::rejected(REQUIRED_FIELDS_MISSING, &missing)),
        );
    }

    if !is_valid_email(&submission.email) {
        warn!("Contact submission with invalid email");
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::rejected(INVALID_EMAIL, &[Violation::EmailInvalid])),
        );
    }

    match notify::deliver_submission(state.transports.as_ref(), &state.settings, &submission).await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(SUBMISSION_ACCEPTED)),
        ),
        Err(e) => {
            error!("Email sending error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::failure(SEND_FAILED)),
            )
        }
    }
}

/// OPTIONS /api/contact - Answer plain OPTIONS requests on the contact route
///
/// CORS preflights (carrying `Access-Control-Request-Method`) continue to the
/// CORS layer, which reflects the origin.
pub async fn contact_options(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS
        && !req
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
    {
        return contact_preflight().into_response();
    }
    next.run(req).await
}

fn contact_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
        ],
    )
}

/// GET /api/health - Liveness check
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "success": true,
        "message": "Server is running",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
