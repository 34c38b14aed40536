use super::*;

use client_core::ClientError;
use serde_json::json;
use shared::domain::RecordId;

use crate::controller::events::UiErrorContext;

fn record(id: i64, question: &str, answer: &str) -> QaRecord {
    QaRecord::new(question, answer).with_id(RecordId::Int(id))
}

fn loaded(records: Vec<QaRecord>) -> ViewState {
    let mut state = ViewState::new(Theme::Dark);
    reduce(&mut state, Action::HistoryLoaded(records));
    state
}

fn backend_error(context: UiErrorContext, detail: &str) -> UiError {
    UiError::from_client_error(
        context,
        &ClientError::Backend {
            status: 500,
            url: "http://localhost:8000/api/qa/ask".into(),
            detail: Some(json!(detail)),
        },
    )
}

#[test]
fn blank_submission_is_a_no_op() {
    let mut state = loaded(vec![record(1, "a", "b")]);
    state.error = Some("old".into());

    for blank in ["", "   ", "\t\n"] {
        reduce(&mut state, Action::QuestionEdited(blank.to_string()));
        assert_eq!(reduce(&mut state, Action::SubmitRequested), None);
    }

    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("old"));
    assert_eq!(state.history.len(), 1);
}

#[test]
fn successful_submission_prepends_and_activates() {
    let mut state = loaded(vec![record(1, "a", "b")]);
    state.error = Some("stale".into());
    reduce(
        &mut state,
        Action::QuestionEdited("  What is 2+2? ".to_string()),
    );

    let effect = reduce(&mut state, Action::SubmitRequested);
    assert_eq!(
        effect,
        Some(Effect::Submit {
            question: "What is 2+2?".to_string()
        })
    );
    assert!(state.loading);
    assert_eq!(state.error, None);
    assert!(!state.can_submit());

    reduce(
        &mut state,
        Action::AnswerReceived(record(2, "What is 2+2?", "4")),
    );

    assert!(!state.loading);
    assert_eq!(state.question, "");
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.history[0].question, "What is 2+2?");
    assert_eq!(state.active_index(), Some(0));
    assert_eq!(state.active_record().map(|r| r.answer.as_str()), Some("4"));
}

#[test]
fn loaded_history_activates_newest_entry() {
    let state = loaded(vec![record(1, "a", "b")]);

    assert_eq!(state.history.len(), 1);
    assert_eq!(state.active_record(), Some(&record(1, "a", "b")));
    assert_eq!(state.history_warning, None);
}

#[test]
fn empty_history_leaves_nothing_active() {
    let state = loaded(Vec::new());
    assert_eq!(state.active_record(), None);
}

#[test]
fn history_failure_keeps_empty_history_and_warns() {
    let mut state = ViewState::new(Theme::Light);

    reduce(
        &mut state,
        Action::HistoryFailed(backend_error(UiErrorContext::History, "db offline")),
    );

    assert!(state.history.is_empty());
    assert_eq!(state.active_record(), None);
    assert_eq!(state.error.as_deref(), Some("db offline"));
    assert_eq!(state.history_warning.as_deref(), Some(HISTORY_WARNING));
}

#[test]
fn submission_failure_shows_detail_and_keeps_prior_state() {
    let mut state = loaded(vec![record(2, "newer", "x"), record(1, "older", "y")]);
    reduce(&mut state, Action::RecordSelected(1));
    reduce(&mut state, Action::QuestionEdited("again".into()));
    reduce(&mut state, Action::SubmitRequested);

    reduce(
        &mut state,
        Action::SubmitFailed(backend_error(UiErrorContext::Submit, "boom")),
    );

    assert_eq!(state.error.as_deref(), Some("boom"));
    assert!(!state.loading);
    assert_eq!(state.question, "again");
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.active_index(), Some(1));
}

#[test]
fn selecting_an_entry_changes_only_the_active_record() {
    let mut state = loaded(vec![record(2, "newer", "x"), record(1, "older", "y")]);

    assert_eq!(reduce(&mut state, Action::RecordSelected(1)), None);
    assert_eq!(state.active_record().map(|r| r.question.as_str()), Some("older"));

    reduce(&mut state, Action::RecordSelected(5));
    assert_eq!(state.active_index(), Some(1));
}

#[test]
fn dismissing_error_clears_it() {
    let mut state = ViewState::default();
    state.error = Some("boom".into());
    reduce(&mut state, Action::ErrorDismissed);
    assert_eq!(state.error, None);
}

#[test]
fn submit_while_loading_is_ignored() {
    let mut state = loaded(Vec::new());
    reduce(&mut state, Action::QuestionEdited("What is 2+2?".into()));

    assert!(reduce(&mut state, Action::SubmitRequested).is_some());
    assert_eq!(reduce(&mut state, Action::SubmitRequested), None);
    assert!(state.loading);

    reduce(
        &mut state,
        Action::AnswerReceived(record(1, "What is 2+2?", "4")),
    );
    reduce(&mut state, Action::QuestionEdited("And 3+3?".into()));
    assert_eq!(
        reduce(&mut state, Action::SubmitRequested),
        Some(Effect::Submit {
            question: "And 3+3?".to_string()
        })
    );
}

#[test]
fn backend_startup_failure_warns_when_history_never_loaded() {
    let mut state = ViewState::new(Theme::Dark);
    let err = UiError::local(UiErrorContext::BackendStartup, "worker did not start");

    reduce(&mut state, Action::BackendUnavailable(err.clone()));

    assert_eq!(state.error.as_deref(), Some("worker did not start"));
    assert_eq!(state.history_warning.as_deref(), Some(HISTORY_WARNING));
    assert!(!state.loading);

    let mut state = loaded(vec![record(1, "a", "b")]);
    reduce(&mut state, Action::BackendUnavailable(err));
    assert_eq!(state.history_warning, None);
    assert_eq!(state.history.len(), 1);
}
