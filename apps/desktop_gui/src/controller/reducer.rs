//! View state and the only transitions allowed to change it.

use client_core::Theme;
use shared::domain::QaRecord;

use crate::controller::events::UiError;

pub const HISTORY_WARNING: &str = "Previous questions could not be loaded.";

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub theme: Theme,
    pub question: String,
    /// Newest first.
    pub history: Vec<QaRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub history_warning: Option<String>,
    history_loaded: bool,
    /// Index into `history`; keeps the active record a member of history.
    active: Option<usize>,
}

#[derive(Debug)]
pub enum Action {
    QuestionEdited(String),
    HistoryLoaded(Vec<QaRecord>),
    HistoryFailed(UiError),
    /// The backend worker could not start; nothing queued will be answered.
    BackendUnavailable(UiError),
    SubmitRequested,
    AnswerReceived(QaRecord),
    SubmitFailed(UiError),
    RecordSelected(usize),
    ErrorDismissed,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Submit { question: String },
}

impl ViewState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn active_record(&self) -> Option<&QaRecord> {
        self.active.and_then(|index| self.history.get(index))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.question.trim().is_empty()
    }
}

pub fn reduce(state: &mut ViewState, action: Action) -> Option<Effect> {
    match action {
        Action::QuestionEdited(text) => {
            state.question = text;
        }
        Action::HistoryLoaded(records) => {
            state.active = if records.is_empty() { None } else { Some(0) };
            state.history = records;
            state.history_loaded = true;
            state.history_warning = None;
        }
        Action::HistoryFailed(err) => {
            state.error = Some(err.message().to_string());
            state.history_warning = Some(HISTORY_WARNING.to_string());
        }
        Action::BackendUnavailable(err) => {
            state.error = Some(err.message().to_string());
            state.loading = false;
            if !state.history_loaded {
                state.history_warning = Some(HISTORY_WARNING.to_string());
            }
        }
        Action::SubmitRequested => {
            if state.loading {
                return None;
            }
            let question = state.question.trim();
            if question.is_empty() {
                return None;
            }
            let question = question.to_string();
            state.loading = true;
            state.error = None;
            return Some(Effect::Submit { question });
        }
        Action::AnswerReceived(record) => {
            state.history.insert(0, record);
            state.active = Some(0);
            state.question.clear();
            state.loading = false;
        }
        Action::SubmitFailed(err) => {
            state.error = Some(err.message().to_string());
            state.loading = false;
        }
        Action::RecordSelected(index) => {
            if index < state.history.len() {
                state.active = Some(index);
            }
        }
        Action::ErrorDismissed => {
            state.error = None;
        }
    }

    None
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
