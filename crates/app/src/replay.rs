//! Intent-log replay: one JSON-encoded [`Intent`] per line.
//!
//! Replaying the same log against a fresh session always produces the same
//! state, which makes a recorded log a reproducible description of a user
//! session. Blank lines are skipped. The first undecodable line stops the
//! replay; intents before it stay applied.

use std::io::BufRead;

use crate::intent::Intent;
use crate::ports::{EventPublisher, SessionStore};
use crate::session::Session;

/// Errors raised while reading an intent log.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The underlying reader failed.
    #[error("failed to read intent log")]
    Io(#[from] std::io::Error),

    /// A line is not a valid intent.
    #[error("line {line}: invalid intent")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Counts reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Intents read and dispatched.
    pub dispatched: usize,
    /// Intents that changed state.
    pub applied: usize,
}

/// Dispatch every intent read from `reader`, in order.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] when reading fails and
/// [`ReplayError::Decode`] for the first line that is not a valid intent.
pub fn replay<S, P, R>(session: &mut Session<S, P>, reader: R) -> Result<ReplaySummary, ReplayError>
where
    S: SessionStore,
    P: EventPublisher,
    R: BufRead,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let intent: Intent = serde_json::from_str(&line).map_err(|source| ReplayError::Decode {
            line: index + 1,
            source,
        })?;

        summary.dispatched += 1;
        if session.dispatch(intent) {
            summary.applied += 1;
        }
    }

    tracing::debug!(
        dispatched = summary.dispatched,
        applied = summary.applied,
        "intent log replayed"
    );
    Ok(summary)
}
