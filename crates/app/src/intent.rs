//! Intents: the requests a renderer sends to mutate core state.
//!
//! Identifiers arrive as text because they come straight from the UI or an
//! intent log. Text that does not resolve (unknown automation, unknown
//! week/task) makes the intent a no-op rather than an error.

use serde::{Deserialize, Serialize};

use roikit_domain::calculator::SavingsEngine;
use roikit_domain::id::AutomationId;
use roikit_domain::savings::AutomationUpdate;

/// Reference to one automation record.
///
/// A number is a 1-based display position, a string is an automation id.
/// Positions let a recorded log address records whose ids are only
/// generated when the log is replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordRef {
    Position(usize),
    Id(String),
}

impl RecordRef {
    /// Resolve against the records currently held by `engine`.
    #[must_use]
    pub fn resolve(&self, engine: &SavingsEngine) -> Option<AutomationId> {
        match self {
            Self::Position(position) => position
                .checked_sub(1)
                .and_then(|index| engine.automations().get(index))
                .map(|record| record.id),
            Self::Id(text) => {
                let id = text.parse::<AutomationId>().ok()?;
                engine.get(id).map(|record| record.id)
            }
        }
    }
}

impl From<AutomationId> for RecordRef {
    fn from(id: AutomationId) -> Self {
        Self::Id(id.to_string())
    }
}

/// A user intent dispatched to a [`Session`](crate::session::Session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    SetHourlyRate { value: f64 },
    AddAutomation,
    RemoveAutomation { target: RecordRef },
    UpdateAutomation { target: RecordRef, update: AutomationUpdate },
    ResetCalculator,
    ToggleTask { week: String, task: String },
    UpdateNote { week: String, text: String },
    ResetRoadmap,
}
