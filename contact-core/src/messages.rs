//! Messages shown to the person filling in the form
//!
//! The form is Japanese-only, so every message that can reach the browser is
//! Japanese. Diagnostic endpoints are operator-facing and stay in English.

/// Returned when the contact request has an empty required field.
pub const REQUIRED_FIELDS_MISSING: &str = "必須項目が入力されていません";

/// Returned when the email address does not look like an address.
pub const INVALID_EMAIL: &str = "有効なメールアドレスを入力してください";

/// Returned when the body could not be decoded at all.
pub const MALFORMED_REQUEST: &str = "リクエストの形式が正しくありません";

/// Returned after both emails went out.
pub const SUBMISSION_ACCEPTED: &str = "お問い合わせを送信しました";

/// Returned when either email could not be sent.
pub const SEND_FAILED: &str = "メール送信に失敗しました。しばらく時間をおいて再度お試しください。";

/// Shown by the client when the backend cannot be reached.
pub const SERVER_UNREACHABLE: &str =
    "サーバーに接続できません。バックエンドサーバーが起動しているか確認してください。";

/// Shown by the client when the backend rejects a request without a message.
pub const REQUEST_FAILED: &str = "送信に失敗しました";
