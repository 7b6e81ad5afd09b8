//! CLI tool for submitting the contact form
//!
//! Runs the same validation and submit flow as the web form.
//!
//! # Usage
//!
//! ```bash
//! contact-submit --company "株式会社サンプル" --name1 山田 --name2 太郎 \
//!     --kana1 やまだ --kana2 たろう --email taro@example.com \
//!     --phone 03-1234-5678 --industry manufacturing \
//!     --inquiry "資料を送ってください" --agree
//!
//! # Check that the API is up
//! contact-submit --base-url http://localhost:3000/api --health
//! ```

use clap::Parser;
use contact_client::{ContactClient, ContactForm, FormController, SubmitOutcome, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contact-submit")]
#[command(about = "Submit the contact form from the command line", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "CONTACT_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Only query the health endpoint
    #[arg(long)]
    health: bool,

    /// Company or organisation name
    #[arg(long, default_value = "")]
    company: String,

    /// Family name
    #[arg(long, default_value = "")]
    name1: String,

    /// Given name
    #[arg(long, default_value = "")]
    name2: String,

    /// Family name reading
    #[arg(long, default_value = "")]
    kana1: String,

    /// Given name reading
    #[arg(long, default_value = "")]
    kana2: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    industry: String,

    /// Inquiry text
    #[arg(long, default_value = "")]
    inquiry: String,

    /// Agree to the privacy policy
    #[arg(long)]
    agree: bool,
}

impl Cli {
    fn form(&self) -> ContactForm {
        let mut form = ContactForm {
            company: self.company.clone(),
            name1: self.name1.clone(),
            name2: self.name2.clone(),
            kana1: self.kana1.clone(),
            kana2: self.kana2.clone(),
            email: self.email.clone(),
            industry: self.industry.clone(),
            inquiry: self.inquiry.clone(),
            consent: self.agree,
            ..Default::default()
        };
        form.input_phone(&self.phone);
        form
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ContactClient::new(&cli.base_url)?;

    if cli.health {
        match client.health().await {
            Ok(status) => {
                println!("✓ {} ({})", status.message, status.timestamp);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error: {}", e.user_message());
                std::process::exit(1);
            }
        }
    }

    let mut controller = FormController::new(client);

    match controller.submit(&cli.form()).await {
        SubmitOutcome::Redirect(page) => {
            println!("✓ Submitted, continue to {}", page);
        }
        SubmitOutcome::Invalid(errors) => {
            for error in errors {
                eprintln!("- {}", error);
            }
            std::process::exit(1);
        }
        SubmitOutcome::Failed(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }

    Ok(())
}
