//! # roikit-adapter-session-web
//!
//! [`SessionStore`] backed by the browser's `window.sessionStorage`.
//!
//! Session storage is scoped to the current tab: it survives reloads but
//! not closing the tab, and it is not shared with other tabs. This crate
//! only builds for `wasm32` targets and is excluded from the native
//! workspace.

use roikit_app::ports::SessionStore;
use roikit_domain::error::RoikitError;
use wasm_bindgen::JsValue;

/// Failures reported by the browser storage API.
#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    /// No `window`, or session storage is disabled (e.g. privacy mode).
    #[error("session storage is unavailable")]
    Unavailable,

    /// The browser rejected the call, typically `QuotaExceededError`.
    #[error("session storage call failed: {0}")]
    Js(String),
}

impl From<WebStorageError> for RoikitError {
    fn from(err: WebStorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

fn js_error(value: &JsValue) -> WebStorageError {
    WebStorageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// Handle to the current tab's session storage.
///
/// The storage object is looked up on every call so that a store created
/// before the page finished loading still works.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSessionStore;

impl WebSessionStore {
    fn storage() -> Result<web_sys::Storage, WebStorageError> {
        web_sys::window()
            .and_then(|window| window.session_storage().ok().flatten())
            .ok_or(WebStorageError::Unavailable)
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, RoikitError> {
        let storage = Self::storage()?;
        storage
            .get_item(key)
            .map_err(|err| js_error(&err).into())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), RoikitError> {
        let storage = Self::storage()?;
        storage
            .set_item(key, value)
            .map_err(|err| js_error(&err).into())
    }

    fn remove(&self, key: &str) -> Result<(), RoikitError> {
        let storage = Self::storage()?;
        storage
            .remove_item(key)
            .map_err(|err| js_error(&err).into())
    }
}
