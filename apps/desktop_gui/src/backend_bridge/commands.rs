//! Backend commands queued from UI to backend worker.

use client_core::CancelToken;

#[derive(Debug)]
pub enum BackendCommand {
    /// Result is discarded if `cancel` fires before it arrives.
    LoadHistory { cancel: CancelToken },
    Submit { question: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadHistory { .. } => "load_history",
            BackendCommand::Submit { .. } => "submit",
        }
    }
}
