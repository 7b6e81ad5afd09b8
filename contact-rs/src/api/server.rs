//! API Server - HTTP server for the contact form

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::diagnostics;
use crate::api::handlers::{self, AppState};
use crate::config::Settings;
use crate::error::Result;
use crate::mailer::{SmtpTransportFactory, TransportFactory};

/// API Server configuration
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a server that relays mail through the configured SMTP server
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let transports = Arc::new(SmtpTransportFactory::new(Arc::clone(&settings)));
        Self::build(settings, transports)
    }

    /// Create a server with a custom transport factory
    pub fn with_transports(settings: Settings, transports: Arc<dyn TransportFactory>) -> Self {
        Self::build(Arc::new(settings), transports)
    }

    fn build(settings: Arc<Settings>, transports: Arc<dyn TransportFactory>) -> Self {
        let addr = settings.listen_addr();
        let state = Arc::new(AppState {
            settings,
            transports,
        });

        Self { state, addr }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = cors_layer();

        // Health and diagnostics
        let diagnostic_routes = Router::new()
            .route("/health", get(handlers::health))
            .route("/test-email-config", get(diagnostics::email_config))
            .route("/test-email", post(diagnostics::send_test_email))
            .layer(cors.clone());

        // Plain OPTIONS gets the fixed wildcard answer before the CORS layer
        let contact_routes = Router::new()
            .route("/contact", post(handlers::submit_contact))
            .layer(cors)
            .layer(middleware::from_fn(handlers::contact_options));

        Router::new()
            .nest("/api", diagnostic_routes.merge(contact_routes))
            .layer(TraceLayer::new_for_http())
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static("cross-origin-resource-policy"),
                HeaderValue::from_static("cross-origin"),
            ))
            .with_state(self.state.clone())
    }

    /// Address the server binds to
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Bind and serve until Ctrl-C
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr).await?;
        info!("Server is running on {}", self.addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }

    /// Serve on an already bound listener
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

/// Reflect the caller's origin and allow credentials
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
