//! Outgoing mail transport
//!
//! Handlers never hold a transport across requests. Each request asks the
//! [`TransportFactory`] for a fresh [`Mailer`], sends through it and drops it.
//!
//! - [`SmtpTransportFactory`] relays through the configured SMTP server with lettre
//! - [`MemoryTransport`] keeps messages in memory (tests, dry runs)

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::config::{Settings, SmtpSettings};
use crate::error::{ContactError, Result};

/// A fully rendered HTML email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Display name of the sender, if any
    pub from_name: Option<String>,
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl OutgoingEmail {
    /// Convert into a lettre message
    pub fn to_message(&self) -> Result<Message> {
        let from = Mailbox::new(self.from_name.clone(), parse_address(&self.from_address)?);
        let to = Mailbox::new(None, parse_address(&self.to)?);

        Message::builder()
            .from(from)
            .to(to)
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(self.html.clone())
            .map_err(|e| ContactError::Build(e.to_string()))
    }
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .parse()
        .map_err(|_| ContactError::InvalidAddress(address.to_string()))
}

/// Sends one message at a time
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;
}

/// Builds a new [`Mailer`] for every request
pub trait TransportFactory: Send + Sync + 'static {
    fn create(&self) -> Result<Box<dyn Mailer>>;
}

/// SMTP relay configured from [`Settings`]
pub struct SmtpTransportFactory {
    settings: Arc<Settings>,
}

impl SmtpTransportFactory {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }
}

impl TransportFactory for SmtpTransportFactory {
    fn create(&self) -> Result<Box<dyn Mailer>> {
        let smtp = self.settings.smtp()?;
        Ok(Box::new(SmtpMailer::new(&smtp)?))
    }
}

/// lettre-backed SMTP mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a transport for the relay.
    ///
    /// Without `implicit_tls` the connection starts in plain text and is
    /// upgraded with STARTTLS when the server offers it.
    pub fn new(smtp: &SmtpSettings) -> Result<Self> {
        let tls_parameters =
            TlsParameters::new(smtp.host.clone()).map_err(|e| ContactError::Smtp(e.to_string()))?;
        let tls = if smtp.implicit_tls {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&smtp.host)
            .port(smtp.port)
            .tls(tls);

        if let Some((user, pass)) = &smtp.credentials {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        debug!("Created SMTP transport for {}:{}", smtp.host, smtp.port);

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = email.to_message()?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ContactError::Smtp(e.to_string()))?;

        Ok(())
    }
}

#[derive(Default)]
struct MemoryState {
    sent: Mutex<Vec<OutgoingEmail>>,
    attempts: AtomicUsize,
    transports: AtomicUsize,
    fail_from: Option<usize>,
}

/// Transport that records messages instead of relaying them
///
/// Clones share the same outbox.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    state: Arc<MemoryState>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send attempt from the `n`th one on (zero-based)
    pub fn failing_from(n: usize) -> Self {
        Self {
            state: Arc::new(MemoryState {
                fail_from: Some(n),
                ..MemoryState::default()
            }),
        }
    }

    /// Messages accepted so far, in send order
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.state
            .sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    /// Number of send attempts, failed ones included
    pub fn attempts(&self) -> usize {
        self.state.attempts.load(Ordering::SeqCst)
    }

    /// Number of transports handed out
    pub fn transports_created(&self) -> usize {
        self.state.transports.load(Ordering::SeqCst)
    }
}

impl TransportFactory for MemoryTransport {
    fn create(&self) -> Result<Box<dyn Mailer>> {
        self.state.transports.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryMailer {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MemoryMailer {
    state: Arc<MemoryState>,
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let attempt = self.state.attempts.fetch_add(1, Ordering::SeqCst);
        if matches!(self.state.fail_from, Some(n) if attempt >= n) {
            return Err(ContactError::Smtp(format!(
                "Connection refused while sending to {}",
                email.to
            )));
        }

        // Also validates addresses the same way the SMTP path does
        email.to_message()?;

        self.state
            .sent
            .lock()
            .map_err(|_| ContactError::Smtp("Outbox lock poisoned".to_string()))?
            .push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from_name: Some("Example Inc.".to_string()),
            from_address: "relay@example.com".to_string(),
            to: to.to_string(),
            subject: "件名".to_string(),
            html: "<p>本文</p>".to_string(),
        }
    }

    #[test]
    fn test_build_message() {
        let message = email("taro@example.com").to_message().unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("To: taro@example.com"));
        assert!(formatted.contains("Content-Type: text/html"));
    }

    #[test]
    fn test_invalid_recipient() {
        let result = email("not an address").to_message();
        assert!(matches!(result, Err(ContactError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_memory_transport_records_in_order() {
        let transport = MemoryTransport::new();
        let mailer = transport.create().unwrap();

        mailer.send(&email("first@example.com")).await.unwrap();
        mailer.send(&email("second@example.com")).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "first@example.com");
        assert_eq!(sent[1].to, "second@example.com");
        assert_eq!(transport.transports_created(), 1);
    }

    #[tokio::test]
    async fn test_memory_transport_failure_injection() {
        let transport = MemoryTransport::failing_from(1);
        let mailer = transport.create().unwrap();

        assert!(mailer.send(&email("first@example.com")).await.is_ok());
        assert!(mailer.send(&email("second@example.com")).await.is_err());
        assert_eq!(transport.sent().len(), 1);
        assert_eq!(transport.attempts(), 2);
    }

    #[test]
    fn test_smtp_factory_requires_host() {
        let factory = SmtpTransportFactory::new(Arc::new(Settings::default()));
        assert!(matches!(
            factory.create(),
            Err(ContactError::MissingSetting("SMTP_HOST"))
        ));
    }
}
