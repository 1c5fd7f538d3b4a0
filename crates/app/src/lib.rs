//! # roikit-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SessionStore`: tab-scoped string key/value persistence
//!   - `EventPublisher`: change notifications for renderers
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ProgressTracker`: roadmap state with write-through persistence
//!   - `Session`: intent dispatch over the savings engine and the tracker
//! - Provide **in-process infrastructure** (event bus, intent-log replay)
//!   that doesn't need IO beyond a caller-supplied reader
//!
//! ## Dependency rule
//! Depends on `roikit-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod event_bus;
pub mod intent;
pub mod ports;
pub mod replay;
pub mod services;
pub mod session;
