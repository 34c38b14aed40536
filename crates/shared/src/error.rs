use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Network,
    Backend,
    UnexpectedResponse,
    /// Failed inside the client before any request was sent.
    Local,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Validation => "validation",
            ErrorCode::Network => "network",
            ErrorCode::Backend => "backend",
            ErrorCode::UnexpectedResponse => "unexpected_response",
            ErrorCode::Local => "local",
        }
    }
}

/// Error body shape returned by the backend on non-2xx responses. Either
/// field may be absent; `detail` is not always a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl BackendErrorBody {
    /// `detail` wins over `message`; JSON `null` counts as absent.
    pub fn into_detail(self) -> Option<Value> {
        self.detail
            .filter(|value| !value.is_null())
            .or(self.message.filter(|value| !value.is_null()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_detail_over_message() {
        let body: BackendErrorBody =
            serde_json::from_value(json!({"detail": "boom", "message": "other"})).expect("body");
        assert_eq!(body.into_detail(), Some(json!("boom")));
    }

    #[test]
    fn falls_back_to_message_when_detail_is_null() {
        let body: BackendErrorBody =
            serde_json::from_value(json!({"detail": null, "message": "bad input"}))
                .expect("body");
        assert_eq!(body.into_detail(), Some(json!("bad input")));
    }

    #[test]
    fn keeps_structured_detail() {
        let body: BackendErrorBody =
            serde_json::from_value(json!({"detail": {"question": ["required"]}})).expect("body");
        assert_eq!(body.into_detail(), Some(json!({"question": ["required"]})));
    }

    #[test]
    fn local_code_serializes_as_snake_case() {
        assert_eq!(ErrorCode::Local.as_str(), "local");
        assert_eq!(
            serde_json::to_value(ErrorCode::UnexpectedResponse).expect("code"),
            json!("unexpected_response")
        );
    }
}
