//! Command orchestration from UI actions to the backend command queue.

use client_core::{CancelToken, Theme};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    reducer::{reduce, Action, Effect, ViewState},
};

/// Queues `cmd`; a full or disconnected queue is reported as an error
/// message instead of being dropped silently.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend worker is not running (possible startup failure); restart the app"
                .to_string(),
        ),
    }
}

/// Owns the view state and is the only place that feeds it actions.
pub struct ViewController {
    state: ViewState,
    cmd_tx: Sender<BackendCommand>,
    status: String,
    history_cancel: Option<CancelToken>,
}

impl ViewController {
    pub fn new(cmd_tx: Sender<BackendCommand>, theme: Theme) -> Self {
        Self {
            state: ViewState::new(theme),
            cmd_tx,
            status: String::new(),
            history_cancel: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Starts the initial history load. Calling it again supersedes the
    /// previous load.
    pub fn activate(&mut self) {
        if let Some(previous) = self.history_cancel.take() {
            previous.cancel();
        }

        let cancel = CancelToken::new();
        self.history_cancel = Some(cancel.clone());
        if let Err(message) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::LoadHistory { cancel })
        {
            self.apply(Action::HistoryFailed(UiError::local(
                UiErrorContext::History,
                message,
            )));
        }
    }

    /// Discards any history result still in flight.
    pub fn teardown(&mut self) {
        if let Some(cancel) = self.history_cancel.take() {
            cancel.cancel();
        }
    }

    pub fn apply(&mut self, action: Action) {
        let Some(effect) = reduce(&mut self.state, action) else {
            return;
        };

        match effect {
            Effect::Submit { question } => {
                if let Err(message) =
                    dispatch_backend_command(&self.cmd_tx, BackendCommand::Submit { question })
                {
                    reduce(
                        &mut self.state,
                        Action::SubmitFailed(UiError::local(UiErrorContext::Submit, message)),
                    );
                }
            }
        }
    }

    /// Drains pending backend events without blocking.
    pub fn process_events(&mut self, ui_rx: &Receiver<UiEvent>) {
        while let Ok(event) = ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => {
                    tracing::debug!(
                        code = err.code().as_str(),
                        context = ?err.context(),
                        "surfacing backend error"
                    );
                    if let Some(action) = UiEvent::Error(err).into_action() {
                        self.apply(action);
                    }
                }
                other => {
                    if let Some(action) = other.into_action() {
                        self.apply(action);
                    }
                }
            }
        }
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
