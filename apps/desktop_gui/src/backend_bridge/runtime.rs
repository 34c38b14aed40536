//! Runtime bridge between the UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::QaBackend;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. It runs until every command sender is dropped.
pub fn launch(
    backend: Arc<dyn QaBackend>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.send(UiEvent::Error(UiError::local(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                return;
            }
        };
        // Status only; results below must not be lost to a full queue.
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        while let Ok(cmd) = cmd_rx.recv() {
            tracing::debug!(command = cmd.name(), "backend worker received command");
            runtime.spawn(handle_command(backend.clone(), cmd, ui_tx.clone()));
        }

        tracing::debug!("command queue closed; backend worker stopping");
    })
}

async fn handle_command(backend: Arc<dyn QaBackend>, cmd: BackendCommand, ui_tx: Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::LoadHistory { cancel } => {
            let result = backend.fetch_history().await;
            if cancel.is_cancelled() {
                tracing::debug!("discarding history result for a torn-down view");
                return;
            }
            match result {
                Ok(records) => UiEvent::HistoryLoaded(records),
                Err(err) => {
                    tracing::warn!(code = err.code().as_str(), "history fetch failed: {err}");
                    UiEvent::Error(UiError::from_client_error(UiErrorContext::History, &err))
                }
            }
        }
        BackendCommand::Submit { question } => match backend.submit_question(&question).await {
            Ok(record) => UiEvent::AnswerReceived(record),
            Err(err) => {
                tracing::warn!(code = err.code().as_str(), "question submission failed: {err}");
                UiEvent::Error(UiError::from_client_error(UiErrorContext::Submit, &err))
            }
        },
    };

    // Waits for room in the queue; only a closed UI drops the result.
    if tokio::task::block_in_place(|| ui_tx.send(event)).is_err() {
        tracing::debug!("ui event queue closed; dropping backend result");
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
