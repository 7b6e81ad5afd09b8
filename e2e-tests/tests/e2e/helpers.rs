use contact_client::{ContactClient, ContactForm, FormController};
use contact_rs::api::ApiServer;
use contact_rs::mailer::MemoryTransport;
use contact_rs::Settings;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;

pub const SMTP_PASSWORD: &str = "e2e-secret-password";
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// A contact backend running on an ephemeral port with an in-memory transport
pub struct TestEnv {
    pub base_url: String,
    pub transport: MemoryTransport,
}

impl TestEnv {
    /// Start a backend with complete SMTP settings
    pub async fn start() -> Self {
        Self::start_with(test_settings(), MemoryTransport::new()).await
    }

    /// Start a backend with custom settings and transport
    pub async fn start_with(settings: Settings, transport: MemoryTransport) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let server = ApiServer::with_transports(settings, Arc::new(transport.clone()));
        tokio::spawn(async move {
            if let Err(e) = server.serve(listener).await {
                eprintln!("❌ Test server stopped: {}", e);
            }
        });

        let env = Self {
            base_url: format!("http://{}/api", addr),
            transport,
        };
        env.wait_until_ready(5)
            .await
            .expect("Test server did not come up");
        env
    }

    /// Wait for the health endpoint to answer
    pub async fn wait_until_ready(&self, timeout_secs: u64) -> Result<(), String> {
        let client = self.client();
        let start = std::time::Instant::now();

        loop {
            if start.elapsed().as_secs() > timeout_secs {
                return Err(format!("Timeout waiting for service: {}", self.base_url));
            }

            match client.health().await {
                Ok(_) => return Ok(()),
                Err(_) => sleep(Duration::from_millis(50)).await,
            }
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn client(&self) -> ContactClient {
        ContactClient::new(&self.base_url).expect("Invalid base URL")
    }

    pub fn controller(&self) -> FormController {
        FormController::new(self.client())
    }
}

pub fn test_settings() -> Settings {
    Settings {
        smtp_host: Some("smtp.example.com".to_string()),
        smtp_port: Some("587".to_string()),
        smtp_user: Some("relay@example.com".to_string()),
        smtp_pass: Some(SMTP_PASSWORD.to_string()),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        company_name: Some("Example Inc.".to_string()),
        company_email: Some("info@example.com".to_string()),
        ..Settings::default()
    }
}

pub fn filled_form() -> ContactForm {
    ContactForm {
        company: "株式会社サンプル".to_string(),
        name1: "山田".to_string(),
        name2: "太郎".to_string(),
        kana1: "やまだ".to_string(),
        kana2: "たろう".to_string(),
        email: "taro@example.com".to_string(),
        phone: "03-1234-5678".to_string(),
        industry: "manufacturing".to_string(),
        inquiry: "資料を送ってください".to_string(),
        consent: true,
    }
}
