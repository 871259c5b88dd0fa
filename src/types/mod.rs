use serde::{Deserialize, Serialize};

// ============= API Request/Response Types =============

/// Body of `POST /signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Form fields of `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Receipt returned by `POST /upload`. Both fields are optional; any 2xx
/// counts as success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub extracted_chunks: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub answer: String,
}

/// Error body produced by the backend: `{"detail": "..."}` or, for request
/// validation failures, `{"detail": [{"msg": "...", ...}, ...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Flatten `detail` into one displayable line.
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}

// ============= Error Types =============

/// Coarse classification of an [`AppError`], used by pages to decide how to
/// present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Network,
    Backend,
    Decode,
    Storage,
    Config,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    /// Local form or input validation; no request was made.
    #[error("{0}")]
    Validation(String),

    /// No session token where one is required; no request was made.
    #[error("{0}")]
    Unauthenticated(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}{}", detail_suffix(.detail))]
    Backend { status: u16, detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Unauthenticated(_) => ErrorKind::Unauthenticated,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Backend { .. } => ErrorKind::Backend,
            AppError::Decode(_) => ErrorKind::Decode,
            AppError::Storage(_) => ErrorKind::Storage,
            AppError::Config(_) => ErrorKind::Config,
        }
    }

    /// Detail meant for the user: the backend's own message, or the text of
    /// a local validation/authentication failure.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Validation(msg) | AppError::Unauthenticated(msg) => Some(msg),
            AppError::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// User-facing message, falling back to `fallback` when there is no detail.
    pub fn message_or(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Whether the failure happened before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::Unauthenticated)
    }

    /// Build a backend error from a non-2xx status and its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail_text());
        AppError::Backend { status, detail }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_surfaced() {
        let err =
            AppError::from_response(400, r#"{"detail":"Username or Email already registered"}"#);
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(err.detail(), Some("Username or Email already registered"));
        assert_eq!(
            err.message_or("An error occurred"),
            "Username or Email already registered"
        );
    }

    #[test]
    fn test_validation_list_detail_is_joined() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address","type":"value_error"},{"loc":["body","password"],"msg":"field required","type":"missing"}]}"#;
        let err = AppError::from_response(422, body);
        assert_eq!(
            err.detail(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn test_non_json_body_falls_back() {
        let err = AppError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err, AppError::Backend { status: 502, detail: None });
        assert_eq!(err.message_or("An error occurred"), "An error occurred");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_local_errors() {
        let err = AppError::Validation("Passwords do not match!".into());
        assert!(err.is_local());
        assert_eq!(err.message_or("x"), "Passwords do not match!");
        assert!(!AppError::Network("refused".into()).is_local());
    }

    #[test]
    fn test_ask_response_defaults() {
        let resp: AskResponse = serde_json::from_str(r#"{"answer":"hi"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.answer, "hi");
    }
}
