//! HTML bodies for outgoing mail
//!
//! Rendered with askama from `templates/*.html`. Every interpolated value is
//! HTML-escaped, so submitted text shows up verbatim in the mail client.

use askama::Template;
use contact_core::ContactSubmission;

/// Notification sent to the admin address for each submission
#[derive(Template)]
#[template(path = "admin_notification.html")]
pub struct AdminNotification<'a> {
    pub submission: &'a ContactSubmission,
}

/// Automatic reply sent to the submitter
#[derive(Template)]
#[template(path = "thank_you.html")]
pub struct ThankYou<'a> {
    pub submission: &'a ContactSubmission,
    pub company_name: &'a str,
    pub company_email: &'a str,
}

/// Diagnostic message used to check the relay
#[derive(Template)]
#[template(path = "test_email.html")]
pub struct TestEmail {
    pub sent_at: String,
}
