//! Contact form state and client-side validation

use contact_core::{filter_phone_input, is_valid_email, is_valid_phone, ContactSubmission, Violation};

/// Values of the contact form as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub company: String,
    pub name1: String,
    pub name2: String,
    pub kana1: String,
    pub kana2: String,
    pub email: String,
    pub phone: String,
    /// Selected industry, empty while nothing is selected
    pub industry: String,
    pub inquiry: String,
    /// Privacy policy checkbox
    pub consent: bool,
}

impl ContactForm {
    /// Update the phone field, dropping characters it does not accept
    pub fn input_phone(&mut self, raw: &str) {
        self.phone = filter_phone_input(raw);
    }

    /// Check every rule and collect all failures in form order
    pub fn validate(&self) -> Vec<Violation> {
        let mut errors = Vec::new();

        if self.company.trim().is_empty() {
            errors.push(Violation::CompanyRequired);
        }

        if self.name1.trim().is_empty() || self.name2.trim().is_empty() {
            errors.push(Violation::NameRequired);
        }

        if self.kana1.trim().is_empty() || self.kana2.trim().is_empty() {
            errors.push(Violation::KanaRequired);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(Violation::EmailRequired);
        } else if !is_valid_email(email) {
            errors.push(Violation::EmailInvalid);
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(Violation::PhoneRequired);
        } else if !is_valid_phone(phone) {
            errors.push(Violation::PhoneInvalid);
        }

        if self.industry.is_empty() {
            errors.push(Violation::IndustryRequired);
        }

        if self.inquiry.trim().is_empty() {
            errors.push(Violation::InquiryRequired);
        }

        if !self.consent {
            errors.push(Violation::ConsentRequired);
        }

        errors
    }

    /// Payload posted to the API
    ///
    /// Text fields are trimmed; the industry value is sent as selected.
    pub fn to_submission(&self) -> ContactSubmission {
        ContactSubmission {
            company: self.company.trim().to_string(),
            name1: self.name1.trim().to_string(),
            name2: self.name2.trim().to_string(),
            kana1: self.kana1.trim().to_string(),
            kana2: self.kana2.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            industry: self.industry.clone(),
            inquiry: self.inquiry.trim().to_string(),
        }
    }
}
