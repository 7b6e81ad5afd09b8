//! Submission delivery
//!
//! A submission produces two messages: a notification to the admin address
//! and an automatic reply to the submitter. They go out in that order over
//! one transport. A failed admin send skips the reply, and a failed reply
//! does not undo the admin send.

use askama::Template;
use chrono::Local;
use contact_core::ContactSubmission;
use tracing::info;

use crate::config::Settings;
use crate::error::{ContactError, Result};
use crate::mailer::{OutgoingEmail, TransportFactory};
use crate::templates::{AdminNotification, TestEmail, ThankYou};

pub const ADMIN_SUBJECT: &str = "【新規お問い合わせ】新しいお問い合わせが届きました";
pub const THANK_YOU_SUBJECT: &str = "【自動返信】お問い合わせありがとうございます";
pub const TEST_SUBJECT: &str = "Test Email from Contact Form Backend";

/// Display name used for the diagnostic message
const TEST_SENDER_NAME: &str = "Test";

fn sender_address(settings: &Settings) -> Result<String> {
    settings
        .smtp_user()
        .map(str::to_string)
        .ok_or(ContactError::MissingSetting("SMTP_USER"))
}

/// Notification for the admin mailbox
pub fn admin_notification(settings: &Settings, submission: &ContactSubmission) -> Result<OutgoingEmail> {
    let to = settings
        .admin_email()
        .ok_or(ContactError::MissingSetting("ADMIN_EMAIL"))?;

    Ok(OutgoingEmail {
        from_name: settings.company_name().map(str::to_string),
        from_address: sender_address(settings)?,
        to: to.to_string(),
        subject: ADMIN_SUBJECT.to_string(),
        html: AdminNotification { submission }.render()?,
    })
}

/// Automatic reply to the submitter
pub fn thank_you(settings: &Settings, submission: &ContactSubmission) -> Result<OutgoingEmail> {
    let html = ThankYou {
        submission,
        company_name: settings.company_name().unwrap_or_default(),
        company_email: settings.company_email().unwrap_or_default(),
    }
    .render()?;

    Ok(OutgoingEmail {
        from_name: settings.company_name().map(str::to_string),
        from_address: sender_address(settings)?,
        to: submission.email.clone(),
        subject: THANK_YOU_SUBJECT.to_string(),
        html,
    })
}

/// Diagnostic message, addressed to the admin or else back to the relay account
pub fn test_message(settings: &Settings) -> Result<OutgoingEmail> {
    let from_address = sender_address(settings)?;
    let to = settings
        .admin_email()
        .map(str::to_string)
        .unwrap_or_else(|| from_address.clone());

    let html = TestEmail {
        sent_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
    .render()?;

    Ok(OutgoingEmail {
        from_name: Some(TEST_SENDER_NAME.to_string()),
        from_address,
        to,
        subject: TEST_SUBJECT.to_string(),
        html,
    })
}

/// Send the admin notification, then the automatic reply
pub async fn deliver_submission(
    transports: &dyn TransportFactory,
    settings: &Settings,
    submission: &ContactSubmission,
) -> Result<()> {
    let mailer = transports.create()?;

    let admin = admin_notification(settings, submission)?;
    mailer.send(&admin).await?;
    info!("Admin email sent successfully");

    let reply = thank_you(settings, submission)?;
    mailer.send(&reply).await?;
    info!("Thank you email sent successfully");

    Ok(())
}

/// Send the diagnostic message
pub async fn send_test_message(transports: &dyn TransportFactory, settings: &Settings) -> Result<()> {
    let mailer = transports.create()?;
    let message = test_message(settings)?;
    mailer.send(&message).await?;
    info!("Test email sent to {}", message.to);
    Ok(())
}
