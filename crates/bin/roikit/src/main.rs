//! # roikit: savings calculator and roadmap session runner
//!
//! Composition root that wires the adapters together and replays an intent log.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging to stderr
//! - Construct the session store adapter and the in-process event bus
//! - Construct the session, injecting adapters via port traits
//! - Replay intents (JSON lines) from the file given as first argument, or stdin
//! - Print the resulting session view as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::broadcast::error::TryRecvError;
use tracing_subscriber::EnvFilter;

use roikit_adapter_session_memory::InMemorySessionStore;
use roikit_app::event_bus::InProcessEventBus;
use roikit_app::replay::replay;
use roikit_app::services::progress_tracker::ProgressTracker;
use roikit_app::session::Session;
use roikit_domain::calculator::SavingsEngine;

fn main() -> anyhow::Result<()> {
    let config = config::Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(io::stderr)
        .init();

    // Session store
    let store = match config.session_quota() {
        Some(quota) => InMemorySessionStore::with_quota(quota),
        None => InMemorySessionStore::new(),
    };

    // Event bus
    let bus = Arc::new(InProcessEventBus::new(256));
    let mut events = bus.subscribe();

    // Session
    let mut session = Session::new(
        SavingsEngine::new(config.calculator.default_hourly_rate),
        ProgressTracker::new(store),
        Arc::clone(&bus),
    );
    let outcome = session.restore();
    tracing::debug!(?outcome, "roadmap loaded");

    let summary = match std::env::args_os().nth(1) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.to_string_lossy()))?;
            replay(&mut session, BufReader::new(file))
        }
        None => replay(&mut session, io::stdin().lock()),
    }
    .context("failed to replay intent log")?;

    loop {
        match events.try_recv() {
            Ok(event) => tracing::debug!(kind = ?event.kind, "state changed"),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "older change events dropped");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    tracing::info!(
        dispatched = summary.dispatched,
        applied = summary.applied,
        "session replayed"
    );

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &session.view())
        .context("failed to write session view")?;
    writeln!(stdout)?;

    Ok(())
}
