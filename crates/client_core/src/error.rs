//! Uniform error shape for every backend call.

use serde_json::Value;
use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was issued.
    #[error("{message}")]
    Validation { message: String },
    #[error("could not reach backend at {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} failed with status {status}{}", detail_suffix(.detail))]
    Backend {
        status: u16,
        url: String,
        detail: Option<Value>,
    },
    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },
    /// The HTTP client itself could not be built; no request was attempted.
    #[error("could not set up the http client: {source}")]
    Setup {
        #[source]
        source: reqwest::Error,
    },
}

fn detail_suffix(detail: &Option<Value>) -> String {
    match detail {
        Some(Value::String(text)) if !text.trim().is_empty() => format!(": {text}"),
        Some(Value::String(_)) | None => String::new(),
        Some(other) => format!(": {other}"),
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Validation { .. } => ErrorCode::Validation,
            ClientError::Network { .. } => ErrorCode::Network,
            ClientError::Backend { .. } => ErrorCode::Backend,
            ClientError::UnexpectedResponse { .. } => ErrorCode::UnexpectedResponse,
            ClientError::Setup { .. } => ErrorCode::Local,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            ClientError::Network { source, .. } => source.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            ClientError::Validation { .. } | ClientError::Setup { .. } => None,
            ClientError::Network { url, .. }
            | ClientError::Backend { url, .. }
            | ClientError::UnexpectedResponse { url, .. } => Some(url),
        }
    }

    pub fn detail(&self) -> Option<&Value> {
        match self {
            ClientError::Backend { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Text suitable for showing to a person: a backend-supplied string
    /// `detail` when there is one, otherwise the full message.
    pub fn readable(&self) -> String {
        match self.detail() {
            Some(Value::String(detail)) if !detail.trim().is_empty() => detail.clone(),
            _ => self.message(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend(detail: Option<Value>) -> ClientError {
        ClientError::Backend {
            status: 500,
            url: "http://localhost:8000/api/qa/ask".to_string(),
            detail,
        }
    }

    #[test]
    fn readable_prefers_string_detail() {
        assert_eq!(backend(Some(json!("boom"))).readable(), "boom");
    }

    #[test]
    fn readable_falls_back_to_message_for_structured_detail() {
        let err = backend(Some(json!({"question": ["This field may not be blank."]})));
        let text = err.readable();
        assert!(text.starts_with("request to http://localhost:8000/api/qa/ask failed with status 500"));
        assert!(text.contains("This field may not be blank."), "{text}");
    }

    #[test]
    fn readable_without_detail_is_the_message() {
        let err = backend(None);
        assert_eq!(
            err.readable(),
            "request to http://localhost:8000/api/qa/ask failed with status 500"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.code(), ErrorCode::Backend);
    }

    #[test]
    fn blank_string_detail_is_not_preferred() {
        let err = backend(Some(json!("   ")));
        assert_eq!(err.readable(), err.message());
    }

    #[test]
    fn validation_error_has_no_transport_context() {
        let err = ClientError::validation("question must not be empty");
        assert_eq!(err.readable(), "question must not be empty");
        assert_eq!(err.url(), None);
        assert_eq!(err.status(), None);
        assert!(err.is_validation());
    }
}
