//! Request execution shared by every backend operation.

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method,
};
use serde::Serialize;
use serde_json::Value;
use shared::error::BackendErrorBody;
use tracing::{debug, warn};

use crate::error::ClientError;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

/// Issues one request and normalizes the outcome. Non-2xx statuses become
/// [`ClientError::Backend`] with whatever detail the body carried.
pub async fn execute<B>(
    http: &Client,
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<ResponseBody, ClientError>
where
    B: Serialize + ?Sized,
{
    debug!(method = %method, url, "sending backend request");

    let mut request = http
        .request(method, url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .header(ACCEPT, JSON_CONTENT_TYPE);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(|source| ClientError::Network {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(is_json_content_type);
    let text = response.text().await.map_err(|source| ClientError::Network {
        url: url.to_string(),
        source,
    })?;

    if !status.is_success() {
        let detail = extract_detail(&text);
        warn!(status = status.as_u16(), url, "backend returned error status");
        return Err(ClientError::Backend {
            status: status.as_u16(),
            url: url.to_string(),
            detail,
        });
    }

    if !is_json {
        return Ok(ResponseBody::Text(text));
    }
    if text.trim().is_empty() {
        return Ok(ResponseBody::Json(Value::Null));
    }

    serde_json::from_str(&text)
        .map(ResponseBody::Json)
        .map_err(|err| ClientError::UnexpectedResponse {
            url: url.to_string(),
            message: format!("response declared JSON but could not be parsed: {err}"),
        })
}

/// `application/json` and any `+json` structured-syntax suffix.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == JSON_CONTENT_TYPE || essence.ends_with("+json")
}

/// Best-effort detail from an error body: the `detail` or `message` field of
/// a JSON object, any other JSON value whole, or the raw text.
pub fn extract_detail(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            let whole = Value::Object(map);
            match serde_json::from_value::<BackendErrorBody>(whole.clone()) {
                Ok(body) => body.into_detail().or(Some(whole)),
                Err(_) => Some(whole),
            }
        }
        Ok(Value::Null) => None,
        Ok(other) => Some(other),
        Err(_) => Some(Value::String(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognizes_json_content_types() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/plain; charset=utf-8"));
        assert!(!is_json_content_type("text/html"));
    }

    #[test]
    fn extracts_detail_then_message_then_whole_object() {
        assert_eq!(extract_detail(r#"{"detail":"boom"}"#), Some(json!("boom")));
        assert_eq!(
            extract_detail(r#"{"message":"slow down"}"#),
            Some(json!("slow down"))
        );
        assert_eq!(
            extract_detail(r#"{"question":["required"]}"#),
            Some(json!({"question": ["required"]}))
        );
    }

    #[test]
    fn plain_text_body_becomes_string_detail() {
        assert_eq!(
            extract_detail("  Bad Gateway\n"),
            Some(json!("Bad Gateway"))
        );
        assert_eq!(extract_detail("   "), None);
        assert_eq!(extract_detail("null"), None);
    }
}
