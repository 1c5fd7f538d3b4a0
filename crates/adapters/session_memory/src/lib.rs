//! # roikit-adapter-session-memory
//!
//! In-process implementation of the [`SessionStore`] port.
//!
//! Values live as long as the store value itself, which is the native
//! equivalent of a browser tab's session storage. An optional quota mimics
//! the browser's per-origin limit so that write failures can be exercised
//! outside a browser. Like the browser, the quota is measured in UTF-16 code
//! units of keys plus values, not in bytes.
//!
//! ## Dependency rule
//!
//! Depends on `roikit-app` (port traits) and `roikit-domain` only.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use roikit_app::ports::SessionStore;
use roikit_domain::error::RoikitError;

/// Raised when a write would push the store over its quota.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session storage quota of {quota} code units exceeded ({required} required)")]
pub struct QuotaExceeded {
    pub quota: usize,
    pub required: usize,
}

impl From<QuotaExceeded> for RoikitError {
    fn from(err: QuotaExceeded) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// String key/value store held in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    values: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemorySessionStore {
    /// Create an unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once keys and values together
    /// would exceed `quota` UTF-16 code units.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: Mutex::default(),
            quota: Some(quota),
        }
    }

    /// UTF-16 code units currently used by keys and values.
    #[must_use]
    pub fn used_units(&self) -> usize {
        self.lock()
            .iter()
            .map(|(key, value)| entry_units(key, value))
            .sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // Entries are replaced whole, so a poisoned map is still consistent.
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn entry_units(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, RoikitError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RoikitError> {
        let mut values = self.lock();
        if let Some(quota) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(existing, _)| existing.as_str() != key)
                .map(|(k, v)| entry_units(k, v))
                .sum();
            let required = others + entry_units(key, value);
            if required > quota {
                tracing::debug!(key, required, quota, "session store write rejected");
                return Err(QuotaExceeded { quota, required }.into());
            }
        }
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), RoikitError> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_none_for_absent_key() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get("roadmap-notes").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn should_replace_value_on_set() {
        let store = InMemorySessionStore::new();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("two"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn should_succeed_when_removing_absent_key() {
        let store = InMemorySessionStore::new();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn should_reject_write_beyond_quota() {
        let store = InMemorySessionStore::with_quota(10);
        store.set("ab", "cdef").unwrap();

        let err = store.set("gh", "ijklmn").unwrap_err();

        assert!(matches!(err, RoikitError::Storage(_)));
        assert_eq!(store.get("gh").unwrap(), None);
        assert_eq!(store.used_units(), 6);
    }

    #[test]
    fn should_not_count_replaced_value_against_quota() {
        let store = InMemorySessionStore::with_quota(8);
        store.set("k", "1234567").unwrap();
        store.set("k", "7654321").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("7654321"));
    }

    #[test]
    fn should_count_utf16_code_units_against_quota() {
        // 4 code units but 7 bytes.
        let store = InMemorySessionStore::with_quota(4);
        store.set("k", "ééé").unwrap();
        assert_eq!(store.used_units(), 4);

        // An astral character takes two code units.
        let store = InMemorySessionStore::with_quota(3);
        let err = store.set("k", "a\u{1F600}").unwrap_err();
        assert!(matches!(err, RoikitError::Storage(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn should_describe_quota_failure() {
        let err = QuotaExceeded {
            quota: 10,
            required: 12,
        };
        assert_eq!(
            err.to_string(),
            "session storage quota of 10 code units exceeded (12 required)"
        );
    }
}
