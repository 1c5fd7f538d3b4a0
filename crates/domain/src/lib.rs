//! # roikit-domain
//!
//! Pure domain model for the roikit savings calculator and roadmap tracker.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, change events
//! - Define **automation records** and the savings arithmetic over them
//! - Define the **savings engine** (hourly rate + 1..=10 records)
//! - Define the **roadmap** (fixed 4-week × 3-task checklist plus notes)
//! - Contain all invariant enforcement and derived-value computation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! Persistence and notification boundaries are traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod calculator;
pub mod event;
pub mod roadmap;
pub mod savings;
