//! Response envelope shared by the API and its clients

use serde::{Deserialize, Serialize};

use crate::validation::Violation;

/// `{success, message}` body returned by the contact endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    /// One entry per failed field rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ApiResponse {
    pub fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn rejected(message: &str, violations: &[Violation]) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            errors: violations.iter().map(|v| v.message().to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_omits_errors() {
        let json = serde_json::to_value(ApiResponse::success("ok")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_rejected_envelope_lists_messages() {
        let response = ApiResponse::rejected(
            "必須項目が入力されていません",
            &[Violation::CompanyRequired, Violation::InquiryRequired],
        );
        assert!(!response.success);
        assert_eq!(
            response.errors,
            vec!["企業名・団体名は必須です", "お問い合わせ詳細は必須です"]
        );
    }

    #[test]
    fn test_decodes_without_errors_key() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"success":false,"message":"x"}"#).unwrap();
        assert!(response.errors.is_empty());
    }
}
