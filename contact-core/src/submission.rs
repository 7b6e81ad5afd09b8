//! Contact submission payload

use serde::{Deserialize, Deserializer, Serialize};

use crate::validation::Violation;

/// One inquiry sent from the contact form.
///
/// Absent keys and `null` values decode as empty strings so the backend can
/// answer them with a validation failure instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactSubmission {
    /// Company or organization name
    #[serde(deserialize_with = "null_as_empty")]
    pub company: String,
    /// Family name
    #[serde(deserialize_with = "null_as_empty")]
    pub name1: String,
    /// Given name
    #[serde(deserialize_with = "null_as_empty")]
    pub name2: String,
    /// Family name reading (kana)
    #[serde(deserialize_with = "null_as_empty")]
    pub kana1: String,
    /// Given name reading (kana)
    #[serde(deserialize_with = "null_as_empty")]
    pub kana2: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub phone: String,
    /// Value picked from the form's industry list
    #[serde(deserialize_with = "null_as_empty")]
    pub industry: String,
    /// Free-form inquiry text
    #[serde(deserialize_with = "null_as_empty")]
    pub inquiry: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The nine required submission fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Company,
    Name1,
    Name2,
    Kana1,
    Kana2,
    Email,
    Phone,
    Industry,
    Inquiry,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Company,
        Field::Name1,
        Field::Name2,
        Field::Kana1,
        Field::Kana2,
        Field::Email,
        Field::Phone,
        Field::Industry,
        Field::Inquiry,
    ];

    /// Violation reported when the field is left empty.
    ///
    /// The two name fields share one message, as do the two kana fields.
    pub fn required_violation(self) -> Violation {
        match self {
            Field::Company => Violation::CompanyRequired,
            Field::Name1 | Field::Name2 => Violation::NameRequired,
            Field::Kana1 | Field::Kana2 => Violation::KanaRequired,
            Field::Email => Violation::EmailRequired,
            Field::Phone => Violation::PhoneRequired,
            Field::Industry => Violation::IndustryRequired,
            Field::Inquiry => Violation::InquiryRequired,
        }
    }
}

impl ContactSubmission {
    /// Value of a field as submitted
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Company => &self.company,
            Field::Name1 => &self.name1,
            Field::Name2 => &self.name2,
            Field::Kana1 => &self.kana1,
            Field::Kana2 => &self.kana2,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Industry => &self.industry,
            Field::Inquiry => &self.inquiry,
        }
    }

    /// Copy with surrounding whitespace removed from every field
    pub fn trimmed(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            name1: self.name1.trim().to_string(),
            name2: self.name2.trim().to_string(),
            kana1: self.kana1.trim().to_string(),
            kana2: self.kana2.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            industry: self.industry.trim().to_string(),
            inquiry: self.inquiry.trim().to_string(),
        }
    }

    /// Fields that are empty or whitespace only
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// Violations for the missing fields, without duplicates
    pub fn required_violations(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = Vec::new();
        for field in self.missing_fields() {
            let violation = field.required_violation();
            if !violations.contains(&violation) {
                violations.push(violation);
            }
        }
        violations
    }

    /// Full name as shown in emails ("family given")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name1, self.name2)
    }

    /// Full kana reading ("family given")
    pub fn full_kana(&self) -> String {
        format!("{} {}", self.kana1, self.kana2)
    }
}
