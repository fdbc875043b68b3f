//! Edition editor - replays edition form actions through form-dispatch
//!
//! Reads `{type, payload, meta?}` actions as JSON lines, dispatches them with
//! keystroke debouncing, and prints the resulting edition section state.

mod middleware;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use edition_section::{decode_line, reducer, EditionSectionState};
use form_dispatch::{DispatchConfig, DispatchRuntime};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use middleware::EditorMiddleware;

#[derive(Parser, Debug)]
#[command(name = "edition-editor")]
#[command(about = "Replay edition form actions and print the resulting state")]
struct Args {
    /// Dispatch configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON-lines action stream; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Print the last N applied actions to stderr
    #[arg(long, value_name = "N")]
    history: Option<usize>,

    /// Apply typed-field updates immediately
    #[arg(long, default_value_t = false)]
    no_debounce: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edition_editor=info,form_dispatch_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = load_config(&args)?;
    let input: Box<dyn AsyncRead + Unpin + Send> = match &args.input {
        Some(path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };

    let runtime = DispatchRuntime::new(
        EditionSectionState::default(),
        reducer,
        EditorMiddleware::from_config(&config),
    );
    let tx = runtime.action_tx();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(runtime.run(cancel.clone(), |state: &EditionSectionState| {
        tracing::trace!(?state, "state changed");
    }));

    let mut lines = BufReader::new(input).lines();
    let mut line_no = 0;
    let mut rejected = 0usize;
    while let Some(line) = lines.next_line().await.context("failed to read input")? {
        line_no += 1;
        match decode_line(line_no, &line) {
            Ok(Some(action)) => {
                if tx.send(action).is_err() {
                    tracing::warn!("dispatch runtime stopped early");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                rejected += 1;
                tracing::warn!(error = %e, "skipping action");
            }
        }
    }
    drop(tx);

    let store = handle.await.context("dispatch runtime panicked")?;
    let (state, middleware) = store.into_parts();
    tracing::info!(lines = line_no, rejected, "replay finished");

    if let (Some(count), Some(log)) = (args.history, middleware.logger.log()) {
        let mut recent: Vec<_> = log.recent(count).collect();
        recent.reverse();
        for entry in recent {
            let marker = if entry.state_changed { "*" } else { " " };
            eprintln!("{:>4} {marker} {}", entry.sequence, entry.summary);
        }
    }

    let json = serde_json::to_string_pretty(&state).context("failed to encode state")?;
    println!("{json}");
    Ok(())
}

fn load_config(args: &Args) -> Result<DispatchConfig> {
    let config = match &args.config {
        Some(path) => DispatchConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    let config = config.apply_env()?;

    Ok(if args.no_debounce {
        config.without_debounce()
    } else {
        config
    })
}
