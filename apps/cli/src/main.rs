use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, BackendClient, ClientError};
use shared::domain::QaRecord;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "qa", about = "Ask the Q&A assistant from a terminal")]
struct Args {
    /// Settings file (defaults to ./qa_client.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL; overrides the settings file and environment
    #[arg(long, global = true)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a question and print the answer
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// List previous questions, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print the backend base URL the client would use
    BaseUrl,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(args.config.as_deref()).with_api_base_url(args.api_base_url);

    if let Command::BaseUrl = args.command {
        println!("{}", settings.base_url());
        return Ok(());
    }

    let client = BackendClient::new(&settings)
        .map_err(readable)
        .context("failed to build http client")?;

    match args.command {
        Command::Ask { question, json } => {
            let record = client
                .submit_question(&question.join(" "))
                .await
                .map_err(readable)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", render_record(&record));
            }
        }
        Command::History { limit, json } => {
            let mut history = client.fetch_history().await.map_err(readable)?;
            if let Some(limit) = limit {
                history.truncate(limit);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                println!("{}", render_history(&history));
            }
        }
        Command::BaseUrl => {}
    }

    Ok(())
}

fn readable(err: ClientError) -> anyhow::Error {
    anyhow!(err.readable())
}

fn render_record(record: &QaRecord) -> String {
    let mut header = Vec::new();
    if let Some(id) = &record.id {
        header.push(format!("#{id}"));
    }
    if let Some(created_at) = record.created_at {
        header.push(created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    }

    let mut out = String::new();
    if !header.is_empty() {
        out.push_str(&format!("[{}]\n", header.join(" ")));
    }
    out.push_str(&format!("Q: {}\nA: {}", record.question, record.answer));
    out
}

fn render_history(history: &[QaRecord]) -> String {
    if history.is_empty() {
        return "No questions asked yet.".to_string();
    }
    history
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n\n")
}
