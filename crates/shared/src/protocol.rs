use serde::{Deserialize, Serialize};

pub const DEFAULT_ASK_PATH: &str = "/api/qa/ask";
pub const DEFAULT_HISTORY_PATH: &str = "/api/qa/history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

impl AskRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}
