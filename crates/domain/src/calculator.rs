//! Savings engine: the hourly rate and a bounded list of automation records.
//!
//! The engine owns its state exclusively. Callers mutate it through the
//! operations below and read derived figures on demand via [`SavingsEngine::totals`]
//! and [`SavingsEngine::record_savings`]. Rejected operations (unknown id,
//! bound reached) leave the state untouched and report `false`/`None`.

use crate::id::AutomationId;
use crate::savings::{
    AutomationRecord, AutomationUpdate, RecordSavings, Totals, compute_record_savings,
    compute_totals,
};

pub const MAX_AUTOMATIONS: usize = 10;
pub const MIN_AUTOMATIONS: usize = 1;
pub const DEFAULT_HOURLY_RATE: f64 = 50.0;

/// Hourly rate plus between [`MIN_AUTOMATIONS`] and [`MAX_AUTOMATIONS`] records.
///
/// The engine has no serialized form: every instance is built by
/// [`new`](Self::new) and changed only through the bounded operations, so it
/// cannot be decoded from an arbitrary record list.
///
/// ```compile_fail
/// let engine: roikit_domain::calculator::SavingsEngine =
///     serde_json::from_str(r#"{"automations":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsEngine {
    hourly_rate: f64,
    default_hourly_rate: f64,
    automations: Vec<AutomationRecord>,
}

impl Default for SavingsEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_RATE)
    }
}

impl SavingsEngine {
    /// Create an engine holding one zero-valued record.
    ///
    /// `default_hourly_rate` is both the initial rate and the rate restored
    /// by [`reset`](Self::reset).
    #[must_use]
    pub fn new(default_hourly_rate: f64) -> Self {
        Self {
            hourly_rate: default_hourly_rate,
            default_hourly_rate,
            automations: vec![AutomationRecord::new()],
        }
    }

    #[must_use]
    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Records in insertion order.
    #[must_use]
    pub fn automations(&self) -> &[AutomationRecord] {
        &self.automations
    }

    #[must_use]
    pub fn get(&self, id: AutomationId) -> Option<&AutomationRecord> {
        self.automations.iter().find(|record| record.id == id)
    }

    /// 1-based display position of the record with `id`.
    #[must_use]
    pub fn display_index(&self, id: AutomationId) -> Option<usize> {
        self.automations
            .iter()
            .position(|record| record.id == id)
            .map(|index| index + 1)
    }

    #[must_use]
    pub fn can_add(&self) -> bool {
        self.automations.len() < MAX_AUTOMATIONS
    }

    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.automations.len() > MIN_AUTOMATIONS
    }

    /// Replace the hourly rate. Negative values are not rejected.
    pub fn set_hourly_rate(&mut self, value: f64) {
        self.hourly_rate = value;
    }

    /// Append a zero-valued record, returning its id.
    ///
    /// Returns `None` without touching the list when it is already full.
    pub fn add_automation(&mut self) -> Option<AutomationId> {
        if !self.can_add() {
            return None;
        }
        let record = AutomationRecord::new();
        let id = record.id;
        self.automations.push(record);
        Some(id)
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` when the id is unknown or only one record remains.
    pub fn remove_automation(&mut self, id: AutomationId) -> bool {
        if !self.can_remove() {
            return false;
        }
        let before = self.automations.len();
        self.automations.retain(|record| record.id != id);
        self.automations.len() != before
    }

    /// Replace one field of the record with `id`.
    ///
    /// Returns `false` when the id is unknown.
    pub fn update_automation(&mut self, id: AutomationId, update: AutomationUpdate) -> bool {
        match self.automations.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.apply(update);
                true
            }
            None => false,
        }
    }

    /// Restore the default rate and a single zero-valued record.
    pub fn reset(&mut self) {
        self.hourly_rate = self.default_hourly_rate;
        self.automations = vec![AutomationRecord::new()];
    }

    /// Weekly savings of every record, paired with the record, in display order.
    pub fn record_savings(&self) -> impl Iterator<Item = (&AutomationRecord, RecordSavings)> {
        let rate = self.hourly_rate;
        self.automations
            .iter()
            .map(move |record| (record, compute_record_savings(record, rate)))
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        compute_totals(&self.automations, self.hourly_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_engine() -> SavingsEngine {
        let mut engine = SavingsEngine::default();
        while engine.add_automation().is_some() {}
        engine
    }

    #[test]
    fn should_start_with_one_zero_record_and_default_rate() {
        let engine = SavingsEngine::default();
        assert_eq!(engine.hourly_rate(), DEFAULT_HOURLY_RATE);
        assert_eq!(engine.automations().len(), 1);
        assert_eq!(engine.automations()[0].task_name, "");
        assert_eq!(engine.automations()[0].frequency_per_week, 0.0);
    }

    #[test]
    fn should_append_zero_valued_record_with_fresh_id() {
        let mut engine = SavingsEngine::default();
        let first = engine.automations()[0].id;

        let id = engine.add_automation().unwrap();

        assert_ne!(id, first);
        assert_eq!(engine.automations().len(), 2);
        assert_eq!(engine.display_index(id), Some(2));
        assert_eq!(engine.get(id).unwrap().time_before_minutes, 0.0);
    }

    #[test]
    fn should_reject_eleventh_automation() {
        let mut engine = full_engine();
        assert_eq!(engine.automations().len(), MAX_AUTOMATIONS);
        let snapshot = engine.clone();

        assert!(engine.add_automation().is_none());
        assert!(!engine.can_add());
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn should_reject_removing_last_automation() {
        let mut engine = SavingsEngine::default();
        let only = engine.automations()[0].id;

        assert!(!engine.remove_automation(only));
        assert!(!engine.can_remove());
        assert_eq!(engine.automations().len(), 1);
        assert_eq!(engine.automations()[0].id, only);
    }

    #[test]
    fn should_remove_record_by_id() {
        let mut engine = SavingsEngine::default();
        let first = engine.automations()[0].id;
        let second = engine.add_automation().unwrap();

        assert!(engine.remove_automation(first));

        assert_eq!(engine.automations().len(), 1);
        assert_eq!(engine.display_index(second), Some(1));
        assert!(engine.get(first).is_none());
    }

    #[test]
    fn should_ignore_removal_of_unknown_id() {
        let mut engine = SavingsEngine::default();
        engine.add_automation();
        let snapshot = engine.clone();

        assert!(!engine.remove_automation(AutomationId::new()));
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn should_keep_count_within_bounds_for_any_add_remove_sequence() {
        let mut engine = SavingsEngine::default();
        // Deterministic pseudo-random walk over add/remove.
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                let victim = engine.automations()[seed as usize % engine.automations().len()].id;
                engine.remove_automation(victim);
            } else if seed % 3 == 1 {
                engine.add_automation();
            } else {
                let first = engine.automations()[0].id;
                engine.remove_automation(first);
            }
            let len = engine.automations().len();
            assert!((MIN_AUTOMATIONS..=MAX_AUTOMATIONS).contains(&len));
        }
    }

    #[test]
    fn should_update_single_field_by_id() {
        let mut engine = SavingsEngine::default();
        let id = engine.automations()[0].id;

        assert!(engine.update_automation(id, AutomationUpdate::TimeBeforeMinutes(30.0)));

        let record = engine.get(id).unwrap();
        assert_eq!(record.time_before_minutes, 30.0);
        assert_eq!(record.time_after_minutes, 0.0);
        assert_eq!(record.task_name, "");
    }

    #[test]
    fn should_ignore_update_of_unknown_id() {
        let mut engine = SavingsEngine::default();
        let snapshot = engine.clone();

        assert!(!engine.update_automation(
            AutomationId::new(),
            AutomationUpdate::TaskName("ghost".to_string())
        ));
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn should_change_dollars_but_not_hours_when_rate_changes() {
        let mut engine = SavingsEngine::default();
        let id = engine.automations()[0].id;
        engine.update_automation(id, AutomationUpdate::TimeBeforeMinutes(30.0));
        engine.update_automation(id, AutomationUpdate::TimeAfterMinutes(5.0));
        engine.update_automation(id, AutomationUpdate::FrequencyPerWeek(10.0));
        let before = engine.totals();

        engine.set_hourly_rate(100.0);
        let after = engine.totals();

        assert_eq!(after.weekly.hours, before.weekly.hours);
        assert_eq!(after.yearly.hours, before.yearly.hours);
        assert!((after.weekly.dollars - 2.0 * before.weekly.dollars).abs() < 1e-9);
    }

    #[test]
    fn should_accept_zero_and_negative_rates() {
        let mut engine = SavingsEngine::default();
        engine.set_hourly_rate(0.0);
        assert_eq!(engine.hourly_rate(), 0.0);
        engine.set_hourly_rate(-5.0);
        assert_eq!(engine.hourly_rate(), -5.0);
    }

    #[test]
    fn should_restore_defaults_on_reset() {
        let mut engine = SavingsEngine::new(75.0);
        engine.set_hourly_rate(120.0);
        engine.add_automation();
        engine.add_automation();

        engine.reset();

        assert_eq!(engine.hourly_rate(), 75.0);
        assert_eq!(engine.automations().len(), 1);
        assert_eq!(engine.totals(), Totals::default());
    }

    #[test]
    fn should_be_idempotent_on_repeated_reset() {
        let mut engine = full_engine();
        engine.reset();
        let once_rate = engine.hourly_rate();
        let once_len = engine.automations().len();
        let once_totals = engine.totals();

        engine.reset();

        assert_eq!(engine.hourly_rate(), once_rate);
        assert_eq!(engine.automations().len(), once_len);
        assert_eq!(engine.totals(), once_totals);
    }

    #[test]
    fn should_pair_records_with_savings_in_display_order() {
        let mut engine = SavingsEngine::default();
        let first = engine.automations()[0].id;
        let second = engine.add_automation().unwrap();
        engine.update_automation(second, AutomationUpdate::TimeBeforeMinutes(60.0));
        engine.update_automation(second, AutomationUpdate::FrequencyPerWeek(1.0));

        let rows: Vec<_> = engine.record_savings().collect();

        assert_eq!(rows[0].0.id, first);
        assert_eq!(rows[0].1.weekly_hours, 0.0);
        assert_eq!(rows[1].0.id, second);
        assert_eq!(rows[1].1.weekly_dollars, DEFAULT_HOURLY_RATE);
    }
}
