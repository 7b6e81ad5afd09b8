//! Field rules shared by the form client and the backend

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Local part, `@`, then a domain containing at least one dot.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Half-width digits, hyphens, parentheses and whitespace.
const PHONE_PATTERN: &str = r"^[0-9\-()\s]+$";

/// Anything the phone input does not accept.
const PHONE_REJECT_PATTERN: &str = r"[^0-9\-()\s]";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_REJECT_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern compiles"))
}

/// Check an email address against the form's two-part pattern
pub fn is_valid_email(email: &str) -> bool {
    compiled(&EMAIL_RE, EMAIL_PATTERN).is_match(email)
}

/// Check a phone number against the allowed character set
pub fn is_valid_phone(phone: &str) -> bool {
    compiled(&PHONE_RE, PHONE_PATTERN).is_match(phone)
}

/// Drop characters the phone field does not accept.
///
/// Applied to the phone input on every keystroke.
pub fn filter_phone_input(raw: &str) -> String {
    compiled(&PHONE_REJECT_RE, PHONE_REJECT_PATTERN)
        .replace_all(raw, "")
        .into_owned()
}

/// A failed form rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    CompanyRequired,
    NameRequired,
    KanaRequired,
    EmailRequired,
    EmailInvalid,
    PhoneRequired,
    PhoneInvalid,
    IndustryRequired,
    InquiryRequired,
    ConsentRequired,
}

impl Violation {
    /// Message shown next to the form
    pub fn message(self) -> &'static str {
        match self {
            Violation::CompanyRequired => "企業名・団体名は必須です",
            Violation::NameRequired => "氏名は必須です",
            Violation::KanaRequired => "氏名（かな）は必須です",
            Violation::EmailRequired => "メールアドレスは必須です",
            Violation::EmailInvalid => "有効なメールアドレスを入力してください",
            Violation::PhoneRequired => "電話番号は必須です",
            Violation::PhoneInvalid => {
                "電話番号は半角数字、ハイフン、括弧、スペースのみ入力可能です"
            }
            Violation::IndustryRequired => "業種を選択してください",
            Violation::InquiryRequired => "お問い合わせ詳細は必須です",
            Violation::ConsentRequired => "個人情報の取り扱いに同意してください",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name+tag@example.co.jp"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("test"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@domain"));
        assert!(!is_valid_email("te st@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn test_phone_characters() {
        assert!(is_valid_phone("03-1234-5678"));
        assert!(is_valid_phone("(03) 1234 5678"));
        assert!(!is_valid_phone("03-1234-abcd"));
        assert!(!is_valid_phone("+81-3-1234-5678"));
        assert!(!is_valid_phone("０３"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_filter_phone_input() {
        assert_eq!(filter_phone_input("+81 (3) 1234-5678"), "81 (3) 1234-5678");
        assert_eq!(filter_phone_input("tel:０３"), "");
        assert_eq!(filter_phone_input("090-0000-0000"), "090-0000-0000");
    }

    #[test]
    fn test_violation_display_matches_message() {
        assert_eq!(
            Violation::ConsentRequired.to_string(),
            "個人情報の取り扱いに同意してください"
        );
    }
}
