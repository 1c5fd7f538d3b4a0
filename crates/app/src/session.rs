//! Session: one savings engine and one progress tracker behind a single
//! dispatch entry point.
//!
//! Renderers send [`Intent`]s to [`Session::dispatch`]. Each intent that
//! changes state publishes exactly one [`Event`]; renderers then pull a
//! fresh [`SessionView`] computed on demand from the owned state.

use serde::Serialize;

use roikit_domain::calculator::SavingsEngine;
use roikit_domain::event::{Event, EventKind};
use roikit_domain::roadmap::{RoadmapProgress, RoadmapState, Task, Week};
use roikit_domain::savings::{AutomationRecord, RecordSavings, Totals};

use crate::intent::Intent;
use crate::ports::{EventPublisher, SessionStore};
use crate::services::progress_tracker::{LoadOutcome, ProgressTracker};

/// One automation row as rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomationView {
    pub display_index: usize,
    #[serde(flatten)]
    pub record: AutomationRecord,
    pub savings: RecordSavings,
}

/// Everything a renderer needs, derived from current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub hourly_rate: f64,
    pub automations: Vec<AutomationView>,
    pub totals: Totals,
    pub can_add_automation: bool,
    pub can_remove_automation: bool,
    pub roadmap: RoadmapState,
    pub progress: RoadmapProgress,
}

/// Calculator and roadmap state for one browser tab.
pub struct Session<S, P> {
    engine: SavingsEngine,
    tracker: ProgressTracker<S>,
    publisher: P,
}

impl<S: SessionStore, P: EventPublisher> Session<S, P> {
    /// Create a session from its parts. The tracker is not loaded; call
    /// [`restore`](Self::restore) once the store is available.
    pub fn new(engine: SavingsEngine, tracker: ProgressTracker<S>, publisher: P) -> Self {
        Self {
            engine,
            tracker,
            publisher,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &SavingsEngine {
        &self.engine
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker<S> {
        &self.tracker
    }

    /// Load the persisted roadmap, announcing it when something was restored.
    pub fn restore(&mut self) -> LoadOutcome {
        let outcome = self.tracker.load();
        if outcome == LoadOutcome::Restored {
            self.notify(EventKind::RoadmapRestored);
        }
        outcome
    }

    /// Apply `intent`, returning whether state changed.
    pub fn dispatch(&mut self, intent: Intent) -> bool {
        match self.apply(intent) {
            Some(kind) => {
                self.notify(kind);
                true
            }
            None => false,
        }
    }

    /// Build the derived view of the current state.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let automations = self
            .engine
            .record_savings()
            .enumerate()
            .map(|(index, (record, savings))| AutomationView {
                display_index: index + 1,
                record: record.clone(),
                savings,
            })
            .collect();
        let roadmap = self.tracker.state().clone();

        SessionView {
            hourly_rate: self.engine.hourly_rate(),
            automations,
            totals: self.engine.totals(),
            can_add_automation: self.engine.can_add(),
            can_remove_automation: self.engine.can_remove(),
            progress: roadmap.progress(),
            roadmap,
        }
    }

    fn apply(&mut self, intent: Intent) -> Option<EventKind> {
        match intent {
            Intent::SetHourlyRate { value } => {
                self.engine.set_hourly_rate(value);
                Some(EventKind::HourlyRateChanged { rate: value })
            }
            Intent::AddAutomation => match self.engine.add_automation() {
                Some(automation_id) => Some(EventKind::AutomationAdded { automation_id }),
                None => {
                    tracing::debug!("automation limit reached, add ignored");
                    None
                }
            },
            Intent::RemoveAutomation { target } => {
                let Some(automation_id) = target.resolve(&self.engine) else {
                    tracing::debug!(record = ?target, "unknown automation, remove ignored");
                    return None;
                };
                if !self.engine.remove_automation(automation_id) {
                    tracing::debug!(%automation_id, "last automation kept, remove ignored");
                    return None;
                }
                Some(EventKind::AutomationRemoved {
                    automation_id,
                    remaining: self.engine.automations().len(),
                })
            }
            Intent::UpdateAutomation { target, update } => {
                let Some(automation_id) = target.resolve(&self.engine) else {
                    tracing::debug!(record = ?target, "unknown automation, update ignored");
                    return None;
                };
                self.engine
                    .update_automation(automation_id, update)
                    .then_some(EventKind::AutomationUpdated { automation_id })
            }
            Intent::ResetCalculator => {
                self.engine.reset();
                Some(EventKind::CalculatorReset)
            }
            Intent::ToggleTask { week, task } => {
                let (Ok(week), Ok(task)) = (week.parse::<Week>(), task.parse::<Task>()) else {
                    tracing::debug!(%week, %task, "unknown roadmap task, toggle ignored");
                    return None;
                };
                let done = self.tracker.toggle_task(week, task);
                Some(EventKind::TaskToggled { week, task, done })
            }
            Intent::UpdateNote { week, text } => {
                let Ok(week) = week.parse::<Week>() else {
                    tracing::debug!(%week, "unknown roadmap week, note ignored");
                    return None;
                };
                self.tracker.update_note(week, text);
                Some(EventKind::NoteUpdated { week })
            }
            Intent::ResetRoadmap => {
                self.tracker.reset();
                Some(EventKind::RoadmapReset)
            }
        }
    }

    fn notify(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)) {
            tracing::warn!(error = %err, "failed to publish change event");
        }
    }
}
