//! Event: an immutable record of a state change that was applied.
//!
//! Events are produced only for intents that actually changed state; a
//! rejected intent (unknown id, bound reached) publishes nothing. Renderers
//! subscribe to them to know when to recompute their views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AutomationId, EventId};
use crate::roadmap::{Task, Week};

/// UTC timestamp attached to every event.
pub type Timestamp = DateTime<Utc>;

/// What changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    HourlyRateChanged {
        rate: f64,
    },
    AutomationAdded {
        automation_id: AutomationId,
    },
    AutomationRemoved {
        automation_id: AutomationId,
        /// Records left after the removal.
        remaining: usize,
    },
    AutomationUpdated {
        automation_id: AutomationId,
    },
    CalculatorReset,
    TaskToggled {
        week: Week,
        task: Task,
        done: bool,
    },
    NoteUpdated {
        week: Week,
    },
    /// A persisted roadmap snapshot replaced the defaults.
    RoadmapRestored,
    RoadmapReset,
}

/// A state change notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    #[serde(flatten)]
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_event_with_current_time() {
        let before = Utc::now();
        let event = Event::new(EventKind::CalculatorReset);
        let after = Utc::now();
        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn should_flatten_kind_into_tagged_json() {
        let event = Event::new(EventKind::TaskToggled {
            week: Week::Week2,
            task: Task::Task1,
            done: true,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "task_toggled");
        assert_eq!(json["week"], "week2");
        assert_eq!(json["task"], "task1");
        assert_eq!(json["done"], true);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let event = Event::new(EventKind::AutomationRemoved {
            automation_id: AutomationId::new(),
            remaining: 3,
        });
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
