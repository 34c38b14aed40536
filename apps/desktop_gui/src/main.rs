use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{load_settings, BackendClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::QaDesktopApp;

#[derive(Parser, Debug)]
#[command(name = "qa-desktop", about = "Desktop client for the Q&A assistant")]
struct Args {
    /// Settings file (defaults to ./qa_client.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL; overrides the settings file and environment
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).with_api_base_url(args.api_base_url);
    let backend = BackendClient::new(&settings).map_err(|err| anyhow!(err.readable()))?;
    let base_url = backend.base_url().to_string();
    let theme = settings.theme;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(Arc::new(backend), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Q&A Assistant")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Q&A Assistant",
        options,
        Box::new(move |_cc| Ok(Box::new(QaDesktopApp::new(cmd_tx, ui_rx, theme, base_url)))),
    )
    .map_err(|err| anyhow!("desktop ui exited with an error: {err}"))
}
