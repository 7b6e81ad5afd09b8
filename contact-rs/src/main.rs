//! contact-rs: Contact form backend server

use contact_rs::api::ApiServer;
use contact_rs::Settings;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up SMTP credentials from .env during development
    let dotenv = dotenvy::dotenv();

    // Load configuration
    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref().map(Path::new))?;

    init_logging(&settings);

    info!("Starting contact-rs v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => info!("No .env file found, using process environment"),
        Err(e) => warn!("Failed to read .env file: {}", e),
    }
    if let Some(path) = &config_path {
        info!("Configuration loaded from {}", path);
    }

    let missing = settings.missing_smtp_vars();
    if missing.any() {
        warn!("SMTP configuration is incomplete, submissions will fail: {:?}", missing);
    }

    let server = ApiServer::new(settings);
    info!("Health check: http://localhost:{}/api/health", port_of(server.addr()));
    info!("Contact form endpoint: http://localhost:{}/api/contact", port_of(server.addr()));
    info!("CORS enabled for all origins");

    server.run().await?;

    Ok(())
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("contact_rs={0},tower_http={0}", settings.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if settings.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn port_of(addr: &str) -> &str {
    addr.rsplit(':').next().unwrap_or(addr)
}
