use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use shared::{domain::QaRecord, protocol::AskRequest};
use tracing::info;

pub mod cancel;
pub mod config;
pub mod error;
pub mod transport;

pub use cancel::CancelToken;
pub use config::{load_settings, resolve_base_url, Settings, Theme};
pub use error::ClientError;
pub use transport::ResponseBody;

/// The two operations the assistant UI needs from its backend.
#[async_trait]
pub trait QaBackend: Send + Sync {
    async fn submit_question(&self, question: &str) -> Result<QaRecord, ClientError>;
    async fn fetch_history(&self) -> Result<Vec<QaRecord>, ClientError>;
}

pub struct BackendClient {
    http: Client,
    base_url: String,
    ask_url: String,
    history_url: String,
}

impl BackendClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|source| ClientError::Setup { source })?;

        Ok(Self::with_http_client(http, settings))
    }

    pub fn with_http_client(http: Client, settings: &Settings) -> Self {
        let base_url = settings.base_url();
        info!(base_url = %base_url, "backend client configured");
        Self {
            http,
            ask_url: config::join_url(&base_url, &settings.ask_path),
            history_url: config::join_url(&base_url, &settings.history_path),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn submit_question(&self, question: &str) -> Result<QaRecord, ClientError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ClientError::validation("question must not be empty"));
        }

        let body = transport::execute(
            &self.http,
            Method::POST,
            &self.ask_url,
            Some(&AskRequest::new(question)),
        )
        .await?;

        decode_record(&self.ask_url, body)
    }

    pub async fn fetch_history(&self) -> Result<Vec<QaRecord>, ClientError> {
        let body =
            transport::execute::<()>(&self.http, Method::GET, &self.history_url, None).await?;

        decode_history(&self.history_url, body)
    }
}

#[async_trait]
impl QaBackend for BackendClient {
    async fn submit_question(&self, question: &str) -> Result<QaRecord, ClientError> {
        BackendClient::submit_question(self, question).await
    }

    async fn fetch_history(&self) -> Result<Vec<QaRecord>, ClientError> {
        BackendClient::fetch_history(self).await
    }
}

fn decode_record(url: &str, body: ResponseBody) -> Result<QaRecord, ClientError> {
    match body {
        ResponseBody::Json(value) => {
            serde_json::from_value(value).map_err(|err| ClientError::UnexpectedResponse {
                url: url.to_string(),
                message: format!("invalid question/answer record: {err}"),
            })
        }
        ResponseBody::Text(_) => Err(ClientError::UnexpectedResponse {
            url: url.to_string(),
            message: "expected a JSON record but received text".to_string(),
        }),
    }
}

fn decode_history(url: &str, body: ResponseBody) -> Result<Vec<QaRecord>, ClientError> {
    let items = match body {
        ResponseBody::Json(Value::Array(items)) => items,
        ResponseBody::Json(other) => {
            return Err(ClientError::UnexpectedResponse {
                url: url.to_string(),
                message: format!("expected an array of records, got {}", json_kind(&other)),
            })
        }
        ResponseBody::Text(_) => {
            return Err(ClientError::UnexpectedResponse {
                url: url.to_string(),
                message: "expected an array of records but received text".to_string(),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|err| ClientError::UnexpectedResponse {
                url: url.to_string(),
                message: format!("invalid history entry at index {index}: {err}"),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
