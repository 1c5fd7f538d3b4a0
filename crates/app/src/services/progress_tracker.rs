//! Progress tracker: the roadmap state plus its session persistence.
//!
//! Every mutation is written through to the [`SessionStore`]. Persistence
//! failures never reach the caller: they are logged and the in-memory
//! state stays authoritative for the rest of the session.

use serde::Serialize;
use serde::de::DeserializeOwned;

use roikit_domain::error::RoikitError;
use roikit_domain::roadmap::{Checklist, Notes, RoadmapState, Task, Week};

use crate::ports::SessionStore;

/// Store key holding the serialized checklist.
pub const CHECKLIST_KEY: &str = "roadmap-checklist";
/// Store key holding the serialized notes.
pub const NOTES_KEY: &str = "roadmap-notes";

/// Result of [`ProgressTracker::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// At least one persisted value was found and applied.
    Restored,
    /// Nothing was persisted; defaults kept.
    Missing,
    /// A persisted value did not decode; defaults kept.
    Malformed,
    /// The store could not be read; defaults kept.
    Unavailable,
}

/// Roadmap state backed by a session-scoped store.
pub struct ProgressTracker<S> {
    store: S,
    state: RoadmapState,
}

impl<S: SessionStore> ProgressTracker<S> {
    /// Create a tracker holding the default state. Nothing is read from
    /// the store until [`load`](Self::load) is called.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: RoadmapState::default(),
        }
    }

    pub fn state(&self) -> &RoadmapState {
        &self.state
    }

    /// Flip one task flag, persist, and return the new value.
    pub fn toggle_task(&mut self, week: Week, task: Task) -> bool {
        let done = self.state.toggle_task(week, task);
        self.save();
        done
    }

    /// Replace the note of `week` verbatim and persist.
    pub fn update_note(&mut self, week: Week, text: impl Into<String>) {
        self.state.update_note(week, text);
        self.save();
    }

    /// Restore a previously persisted snapshot.
    ///
    /// Values are decoded before anything is applied: if either key holds
    /// malformed data, or the store cannot be read, the current state is
    /// left untouched. A key that is simply absent keeps its default.
    #[tracing::instrument(skip(self))]
    pub fn load(&mut self) -> LoadOutcome {
        match self.read_snapshot() {
            Ok((None, None)) => LoadOutcome::Missing,
            Ok((checklist, notes)) => {
                if let Some(checklist) = checklist {
                    self.state.checklist = checklist;
                }
                if let Some(notes) = notes {
                    self.state.notes = notes;
                }
                tracing::debug!("restored roadmap from session store");
                LoadOutcome::Restored
            }
            Err(err @ RoikitError::Malformed { .. }) => {
                tracing::warn!(error = %err, "ignoring malformed roadmap snapshot");
                LoadOutcome::Malformed
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load roadmap snapshot");
                LoadOutcome::Unavailable
            }
        }
    }

    /// Write the checklist and notes to the store.
    ///
    /// Returns `false` when a write failed; the failure is logged.
    #[tracing::instrument(skip(self))]
    pub fn save(&self) -> bool {
        let checklist = self.write(CHECKLIST_KEY, &self.state.checklist);
        let notes = self.write(NOTES_KEY, &self.state.notes);
        checklist && notes
    }

    /// Restore the all-false / all-empty state and clear the snapshot.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state.reset();
        for key in [CHECKLIST_KEY, NOTES_KEY] {
            if let Err(err) = self.store.remove(key) {
                tracing::warn!(error = %err, key, "failed to clear roadmap snapshot");
            }
        }
    }

    fn read_snapshot(&self) -> Result<(Option<Checklist>, Option<Notes>), RoikitError> {
        let checklist = self.read(CHECKLIST_KEY)?;
        let notes = self.read(NOTES_KEY)?;
        Ok((checklist, notes))
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, RoikitError> {
        self.store
            .get(key)?
            .map(|text| {
                serde_json::from_str(&text).map_err(|source| RoikitError::Malformed { key, source })
            })
            .transpose()
    }

    fn write<T: Serialize>(&self, key: &'static str, value: &T) -> bool {
        let result = serde_json::to_string(value)
            .map_err(RoikitError::from)
            .and_then(|json| self.store.set(key, &json));
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, key, "failed to persist roadmap");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, thiserror::Error)]
    #[error("quota exceeded")]
    struct QuotaExceeded;

    #[derive(Default)]
    struct InMemoryStore {
        values: Mutex<HashMap<String, String>>,
        reject_writes: Mutex<bool>,
    }

    impl InMemoryStore {
        fn with(entries: &[(&str, &str)]) -> Self {
            let store = Self::default();
            for (key, value) in entries {
                store
                    .values
                    .lock()
                    .unwrap()
                    .insert((*key).to_string(), (*value).to_string());
            }
            store
        }

        fn value(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }

        fn reject_writes(&self) {
            *self.reject_writes.lock().unwrap() = true;
        }
    }

    impl SessionStore for InMemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, RoikitError> {
            Ok(self.value(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), RoikitError> {
            if *self.reject_writes.lock().unwrap() {
                return Err(RoikitError::Storage(Box::new(QuotaExceeded)));
            }
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), RoikitError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    struct UnreadableStore;

    impl SessionStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, RoikitError> {
            Err(RoikitError::Storage(Box::new(QuotaExceeded)))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), RoikitError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), RoikitError> {
            Ok(())
        }
    }

    #[test]
    fn should_persist_after_every_mutation() {
        let store = Arc::new(InMemoryStore::default());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));

        tracker.toggle_task(Week::Week1, Task::Task1);
        let checklist: serde_json::Value =
            serde_json::from_str(&store.value(CHECKLIST_KEY).unwrap()).unwrap();
        assert_eq!(checklist["week1"]["task1"], true);

        tracker.update_note(Week::Week2, "pilot: inbox triage");
        let notes: serde_json::Value =
            serde_json::from_str(&store.value(NOTES_KEY).unwrap()).unwrap();
        assert_eq!(notes["week2"], "pilot: inbox triage");
    }

    #[test]
    fn should_reproduce_state_on_fresh_instance_after_save_and_load() {
        let store = Arc::new(InMemoryStore::default());
        let mut first = ProgressTracker::new(Arc::clone(&store));
        first.toggle_task(Week::Week1, Task::Task2);
        first.toggle_task(Week::Week4, Task::Task3);
        first.update_note(Week::Week3, "share the workflow with finance");
        assert!(first.save());

        let mut second = ProgressTracker::new(Arc::clone(&store));
        assert_eq!(second.load(), LoadOutcome::Restored);

        assert_eq!(second.state(), first.state());
    }

    #[test]
    fn should_keep_defaults_when_nothing_persisted() {
        let mut tracker = ProgressTracker::new(InMemoryStore::default());
        assert_eq!(tracker.load(), LoadOutcome::Missing);
        assert_eq!(tracker.state(), &RoadmapState::default());
    }

    #[test]
    fn should_keep_defaults_when_stored_text_is_corrupted() {
        let store = InMemoryStore::with(&[
            (CHECKLIST_KEY, "{\"week1\": {\"task1\": tru"),
            (NOTES_KEY, "{\"week1\":\"kept?\",\"week2\":\"\",\"week3\":\"\",\"week4\":\"\"}"),
        ]);
        let mut tracker = ProgressTracker::new(store);

        assert_eq!(tracker.load(), LoadOutcome::Malformed);
        assert_eq!(tracker.state(), &RoadmapState::default());
    }

    #[test]
    fn should_treat_shape_mismatch_as_malformed() {
        let store = InMemoryStore::with(&[(NOTES_KEY, "{\"week1\":\"only one week\"}")]);
        let mut tracker = ProgressTracker::new(store);

        assert_eq!(tracker.load(), LoadOutcome::Malformed);
        assert_eq!(tracker.state().note(Week::Week1), "");
    }

    #[test]
    fn should_restore_checklist_when_notes_absent() {
        let mut source = RoadmapState::default();
        source.toggle_task(Week::Week2, Task::Task2);
        let json = serde_json::to_string(&source.checklist).unwrap();
        let store = InMemoryStore::with(&[(CHECKLIST_KEY, json.as_str())]);
        let mut tracker = ProgressTracker::new(store);

        assert_eq!(tracker.load(), LoadOutcome::Restored);
        assert!(tracker.state().is_done(Week::Week2, Task::Task2));
        assert_eq!(tracker.state().note(Week::Week1), "");
    }

    #[test]
    fn should_keep_defaults_when_store_unreadable() {
        let mut tracker = ProgressTracker::new(UnreadableStore);
        assert_eq!(tracker.load(), LoadOutcome::Unavailable);
        assert_eq!(tracker.state(), &RoadmapState::default());
    }

    #[test]
    fn should_keep_memory_state_when_write_fails() {
        let store = Arc::new(InMemoryStore::default());
        store.reject_writes();
        let mut tracker = ProgressTracker::new(Arc::clone(&store));

        assert!(tracker.toggle_task(Week::Week1, Task::Task3));
        tracker.update_note(Week::Week1, "still here");

        assert!(!tracker.save());
        assert!(tracker.state().is_done(Week::Week1, Task::Task3));
        assert_eq!(tracker.state().note(Week::Week1), "still here");
        assert!(store.value(CHECKLIST_KEY).is_none());
    }

    #[test]
    fn should_clear_state_and_store_on_reset() {
        let store = Arc::new(InMemoryStore::default());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        tracker.toggle_task(Week::Week3, Task::Task1);
        tracker.update_note(Week::Week3, "x");

        tracker.reset();

        assert_eq!(tracker.state(), &RoadmapState::default());
        assert!(store.value(CHECKLIST_KEY).is_none());
        assert!(store.value(NOTES_KEY).is_none());
    }

    #[test]
    fn should_be_idempotent_on_repeated_reset() {
        let store = Arc::new(InMemoryStore::default());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        tracker.toggle_task(Week::Week1, Task::Task1);

        tracker.reset();
        let once = tracker.state().clone();
        tracker.reset();

        assert_eq!(tracker.state(), &once);
        assert!(store.value(CHECKLIST_KEY).is_none());
    }

    #[test]
    fn should_keep_defaults_after_reset_and_reload() {
        let store = Arc::new(InMemoryStore::default());
        let mut tracker = ProgressTracker::new(Arc::clone(&store));
        tracker.toggle_task(Week::Week2, Task::Task1);
        tracker.reset();

        let mut fresh = ProgressTracker::new(Arc::clone(&store));
        assert_eq!(fresh.load(), LoadOutcome::Missing);
        assert_eq!(fresh.state(), &RoadmapState::default());
    }
}
