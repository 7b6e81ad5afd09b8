// E2E: contact form flow
// Tests the complete path: form validation → client → HTTP API → notification emails

mod e2e;

use contact_client::{ClientError, ContactForm, SubmitOutcome};
use contact_core::messages::{
    INVALID_EMAIL, REQUIRED_FIELDS_MISSING, SEND_FAILED, SERVER_UNREACHABLE, SUBMISSION_ACCEPTED,
};
use contact_core::ContactSubmission;
use contact_rs::mailer::MemoryTransport;
use contact_rs::notify::{ADMIN_SUBJECT, THANK_YOU_SUBJECT};
use e2e::helpers::{filled_form, test_settings, TestEnv, ADMIN_EMAIL, SMTP_PASSWORD};
use serde_json::Value;

#[tokio::test]
async fn test_e2e_submit_form_sends_both_emails() {
    println!("\n🚀 Starting: contact form submission");
    let env = TestEnv::start().await;

    println!("\n📋 Step 1: Submitting the form...");
    let mut controller = env.controller();
    let outcome = controller.submit(&filled_form()).await;
    assert_eq!(outcome, SubmitOutcome::Redirect("thanks.html"));

    println!("\n📋 Step 2: Checking outgoing mail...");
    let sent = env.transport.sent();
    assert_eq!(sent.len(), 2);

    assert_eq!(sent[0].to, ADMIN_EMAIL);
    assert_eq!(sent[0].subject, ADMIN_SUBJECT);
    assert!(sent[0].html.contains("株式会社サンプル"));
    assert!(sent[0].html.contains("taro@example.com"));

    assert_eq!(sent[1].to, "taro@example.com");
    assert_eq!(sent[1].subject, THANK_YOU_SUBJECT);
    assert!(sent[1].html.contains("山田 太郎 様"));
    assert!(sent[1].html.contains("info@example.com"));
    println!("✅ Admin notification and auto reply delivered");
}

#[tokio::test]
async fn test_e2e_client_response_message() {
    let env = TestEnv::start().await;

    let response = env
        .client()
        .submit(&filled_form().to_submission())
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, SUBMISSION_ACCEPTED);
}

#[tokio::test]
async fn test_e2e_blank_field_rejected_by_server() {
    let env = TestEnv::start().await;

    // Skips the client-side checks to reach the server's own validation
    let submission = ContactSubmission {
        inquiry: "   ".to_string(),
        ..filled_form().to_submission()
    };

    match env.client().submit(&submission).await {
        Err(ClientError::Rejected {
            status,
            message,
            errors,
        }) => {
            assert_eq!(status, 400);
            assert_eq!(message, REQUIRED_FIELDS_MISSING);
            assert_eq!(errors, vec!["お問い合わせ詳細は必須です".to_string()]);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(env.transport.attempts(), 0);
}

#[tokio::test]
async fn test_e2e_invalid_email_rejected_on_both_sides() {
    let env = TestEnv::start().await;

    let form = ContactForm {
        email: "taro@example".to_string(),
        ..filled_form()
    };

    let mut controller = env.controller();
    assert_eq!(
        controller.submit(&form).await,
        SubmitOutcome::Invalid(vec![INVALID_EMAIL.to_string()])
    );

    let err = env
        .client()
        .submit(&form.to_submission())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), INVALID_EMAIL);
    assert!(env.transport.sent().is_empty());
}

#[tokio::test]
async fn test_e2e_send_failure_shows_message() {
    let env = TestEnv::start_with(test_settings(), MemoryTransport::failing_from(0)).await;

    let mut controller = env.controller();
    let outcome = controller.submit(&filled_form()).await;

    assert_eq!(outcome, SubmitOutcome::Failed(SEND_FAILED.to_string()));
    assert!(!controller.button().disabled);
    assert!(env.transport.sent().is_empty());
}

#[tokio::test]
async fn test_e2e_config_check_hides_password() {
    let env = TestEnv::start().await;

    let response = reqwest::get(env.url("/test-email-config")).await.unwrap();
    assert_eq!(response.status(), 200);

    let body = response.text().await.unwrap();
    assert!(!body.contains(SMTP_PASSWORD));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["config"]["SMTP_PASS"], "SET (hidden)");
    assert_eq!(json["hasAllRequiredVars"], true);
}

#[tokio::test]
async fn test_e2e_test_email_goes_to_admin() {
    let env = TestEnv::start().await;

    let response = reqwest::Client::new()
        .post(env.url("/test-email"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let sent = env.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, ADMIN_EMAIL);
}

#[tokio::test]
async fn test_e2e_unreachable_backend() {
    let env = TestEnv::start().await;
    let mut form_page = String::from(r#"<form id="contact-form"></form>"#);

    let mut controller = contact_client::FormController::new(
        contact_client::ContactClient::new("http://127.0.0.1:1/api").unwrap(),
    );
    let outcome = controller.submit(&filled_form()).await;
    assert_eq!(outcome, SubmitOutcome::Failed(SERVER_UNREACHABLE.to_string()));

    form_page = controller.apply_errors(&form_page).unwrap();
    assert!(form_page.contains(SERVER_UNREACHABLE));

    // The running backend saw nothing
    assert_eq!(env.transport.attempts(), 0);
}
