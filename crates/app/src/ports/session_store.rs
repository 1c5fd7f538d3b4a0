//! Session store port: tab-scoped string key/value persistence.
//!
//! Values live only as long as the current browser tab or session; the
//! store is not durable across restarts and is not shared between tabs.
//! The core encodes and decodes its own values, the store only holds text.

use roikit_domain::error::RoikitError;

/// String key/value storage scoped to the current session.
pub trait SessionStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RoikitError::Storage`] when the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, RoikitError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`RoikitError::Storage`] when the write is rejected, for
    /// example because the quota is exhausted.
    fn set(&self, key: &str, value: &str) -> Result<(), RoikitError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`RoikitError::Storage`] when the store cannot be modified.
    fn remove(&self, key: &str) -> Result<(), RoikitError>;
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, RoikitError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RoikitError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), RoikitError> {
        (**self).remove(key)
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, RoikitError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RoikitError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), RoikitError> {
        (**self).remove(key)
    }
}
