//! Submit flow of the contact form
//!
//! Mirrors what the page does when the submit button is pressed: validate,
//! show errors above the form or switch the button to its loading state, call
//! the API, then either move on to the confirmation page or show the failure
//! and re-enable the button.

use askama::Template;
use tracing::{error, info};

use crate::client::ContactClient;
use crate::error::Result;
use crate::form::ContactForm;

pub const SUBMIT_LABEL: &str = "送信する";
pub const LOADING_LABEL: &str = "送信中...";

/// Static page shown after a successful submission
pub const CONFIRMATION_PAGE: &str = "thanks.html";

const ERROR_CONTAINER_START: &str = r#"<div class="error-container""#;
const ERROR_CONTAINER_END: &str = "</ul></div>";

#[derive(Template)]
#[template(path = "error_list.html")]
struct ErrorList<'a> {
    errors: &'a [String],
}

/// State of the submit control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

impl SubmitButton {
    fn idle() -> Self {
        Self {
            label: SUBMIT_LABEL,
            disabled: false,
        }
    }

    fn loading() -> Self {
        Self {
            label: LOADING_LABEL,
            disabled: true,
        }
    }
}

/// What happened when the form was submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent
    Invalid(Vec<String>),
    /// The API accepted the submission; go to this page
    Redirect(&'static str),
    /// The API call failed with this message
    Failed(String),
}

pub struct FormController {
    client: ContactClient,
    button: SubmitButton,
    errors: Vec<String>,
}

impl FormController {
    pub fn new(client: ContactClient) -> Self {
        Self {
            client,
            button: SubmitButton::idle(),
            errors: Vec::new(),
        }
    }

    pub fn button(&self) -> SubmitButton {
        self.button
    }

    /// Messages currently displayed above the form
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Handle a press of the submit button
    pub async fn submit(&mut self, form: &ContactForm) -> SubmitOutcome {
        self.errors.clear();

        let violations = form.validate();
        if !violations.is_empty() {
            self.errors = violations.iter().map(|v| v.message().to_string()).collect();
            return SubmitOutcome::Invalid(self.errors.clone());
        }

        self.button = SubmitButton::loading();

        match self.client.submit(&form.to_submission()).await {
            Ok(response) => {
                info!("Form submitted successfully: {}", response.message);
                SubmitOutcome::Redirect(CONFIRMATION_PAGE)
            }
            Err(e) => {
                error!("Form submission failed: {}", e);
                let message = e.user_message();
                self.errors = vec![message.clone()];
                self.button = SubmitButton::idle();
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Error container markup, or `None` when there is nothing to show
    pub fn render_errors(&self) -> Result<Option<String>> {
        if self.errors.is_empty() {
            return Ok(None);
        }
        Ok(Some(ErrorList { errors: &self.errors }.render()?))
    }

    /// Replace any previous error container in `form_html` with the current one
    ///
    /// The container goes right after the opening `<form>` tag, or in front of
    /// the markup if there is no form tag.
    pub fn apply_errors(&self, form_html: &str) -> Result<String> {
        let mut html = clear_errors(form_html);

        if let Some(container) = self.render_errors()? {
            let insert_at = html
                .find("<form")
                .and_then(|start| html[start..].find('>').map(|end| start + end + 1))
                .unwrap_or(0);
            html.insert_str(insert_at, &container);
        }

        Ok(html)
    }
}

/// Remove every rendered error container from `html`
fn clear_errors(html: &str) -> String {
    let mut html = html.to_string();
    while let Some(start) = html.find(ERROR_CONTAINER_START) {
        match html[start..].find(ERROR_CONTAINER_END) {
            Some(len) => html.replace_range(start..start + len + ERROR_CONTAINER_END.len(), ""),
            None => break,
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_with(errors: &[&str]) -> FormController {
        let mut controller =
            FormController::new(ContactClient::new("http://localhost:3000/api").unwrap());
        controller.errors = errors.iter().map(|e| e.to_string()).collect();
        controller
    }

    #[test]
    fn test_idle_button() {
        let controller = controller_with(&[]);
        assert_eq!(controller.button().label, "送信する");
        assert!(!controller.button().disabled);
    }

    #[test]
    fn test_no_errors_renders_nothing() {
        assert!(controller_with(&[]).render_errors().unwrap().is_none());
    }

    #[test]
    fn test_errors_render_as_list() {
        let html = controller_with(&["企業名・団体名は必須です", "<b>x</b>"])
            .render_errors()
            .unwrap()
            .unwrap();

        assert!(html.starts_with(ERROR_CONTAINER_START));
        assert!(html.contains("<li>企業名・団体名は必須です</li>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_errors_inserted_at_top_of_form() {
        let page = r#"<h1>Contact</h1><form id="contact-form" method="post"><input name="company"></form>"#;
        let html = controller_with(&["氏名は必須です"]).apply_errors(page).unwrap();

        let (head, rest) = html.split_once(r#"method="post">"#).unwrap();
        assert_eq!(head, r#"<h1>Contact</h1><form id="contact-form" "#);
        assert!(rest.starts_with(ERROR_CONTAINER_START));
        assert!(rest.ends_with(r#"<input name="company"></form>"#));
    }

    #[test]
    fn test_errors_prepended_without_form_tag() {
        let html = controller_with(&["氏名は必須です"])
            .apply_errors("<p>no form</p>")
            .unwrap();
        assert!(html.starts_with(ERROR_CONTAINER_START));
        assert!(html.ends_with("<p>no form</p>"));
    }

    #[test]
    fn test_previous_errors_are_replaced() {
        let page = "<form><input></form>";
        let first = controller_with(&["氏名は必須です"]).apply_errors(page).unwrap();
        let second = controller_with(&["業種を選択してください"])
            .apply_errors(&first)
            .unwrap();

        assert!(!second.contains("氏名は必須です"));
        assert!(second.contains("業種を選択してください"));
        assert_eq!(second.matches(ERROR_CONTAINER_START).count(), 1);

        let cleared = controller_with(&[]).apply_errors(&second).unwrap();
        assert_eq!(cleared, page);
    }
}
