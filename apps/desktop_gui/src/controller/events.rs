//! Backend-to-UI events and error modeling for the desktop GUI controller.

use client_core::ClientError;
use shared::{domain::QaRecord, error::ErrorCode};

use crate::controller::reducer::Action;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    HistoryLoaded(Vec<QaRecord>),
    AnswerReceived(QaRecord),
    Error(UiError),
}

impl UiEvent {
    /// Reducer action for this event; `Info` only updates the status line.
    pub fn into_action(self) -> Option<Action> {
        match self {
            UiEvent::Info(_) => None,
            UiEvent::HistoryLoaded(records) => Some(Action::HistoryLoaded(records)),
            UiEvent::AnswerReceived(record) => Some(Action::AnswerReceived(record)),
            UiEvent::Error(err) => match err.context() {
                UiErrorContext::History => Some(Action::HistoryFailed(err)),
                UiErrorContext::Submit => Some(Action::SubmitFailed(err)),
                UiErrorContext::BackendStartup => Some(Action::BackendUnavailable(err)),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    History,
    Submit,
}

#[derive(Debug, Clone)]
pub struct UiError {
    code: ErrorCode,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        Self {
            code: err.code(),
            context,
            message: err.readable(),
        }
    }

    /// For failures that never reached the backend client, e.g. the worker
    /// runtime failing to start or the command queue being gone.
    pub fn local(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self {
            code: ErrorCode::Local,
            context,
            message,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
