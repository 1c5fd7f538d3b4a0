//! Savings arithmetic: per-record and aggregate time/cost savings.
//!
//! Everything here is a pure function of an [`AutomationRecord`] and an
//! hourly rate. The single source of truth is `before - after`; every
//! aggregate horizon is a linear transform of the weekly sums.
//!
//! No rounding happens here and negative savings are never clamped: an
//! automation that takes longer than the manual task yields negative hours
//! and dollars so that the cost shows up in the totals.

use serde::{Deserialize, Serialize};

use crate::id::AutomationId;

pub const MINUTES_PER_HOUR: f64 = 60.0;
/// Average number of weeks in a calendar month.
pub const WEEKS_PER_MONTH: f64 = 4.33;
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const HOURS_PER_WORK_WEEK: f64 = 40.0;
/// Standard annual working hours of one full-time employee.
pub const FTE_HOURS_PER_YEAR: f64 = 2080.0;

/// One task being evaluated for time and cost savings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRecord {
    pub id: AutomationId,
    pub task_name: String,
    pub time_before_minutes: f64,
    pub time_after_minutes: f64,
    pub frequency_per_week: f64,
}

impl AutomationRecord {
    /// Create a zero-valued record with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(AutomationId::new())
    }

    /// Create a zero-valued record with the given id.
    #[must_use]
    pub fn with_id(id: AutomationId) -> Self {
        Self {
            id,
            task_name: String::new(),
            time_before_minutes: 0.0,
            time_after_minutes: 0.0,
            frequency_per_week: 0.0,
        }
    }

    /// Replace the single field carried by `update`.
    pub fn apply(&mut self, update: AutomationUpdate) {
        match update {
            AutomationUpdate::TaskName(name) => self.task_name = name,
            AutomationUpdate::TimeBeforeMinutes(value) => self.time_before_minutes = value,
            AutomationUpdate::TimeAfterMinutes(value) => self.time_after_minutes = value,
            AutomationUpdate::FrequencyPerWeek(value) => self.frequency_per_week = value,
        }
    }
}

impl Default for AutomationRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-field edit of an [`AutomationRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum AutomationUpdate {
    TaskName(String),
    TimeBeforeMinutes(f64),
    TimeAfterMinutes(f64),
    FrequencyPerWeek(f64),
}

/// Weekly savings of one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordSavings {
    /// Minutes saved per occurrence; negative when the automation is slower.
    pub time_saved_minutes: f64,
    pub weekly_hours: f64,
    pub weekly_dollars: f64,
    /// Share of the manual time saved, in percent. `None` when the manual
    /// time is zero.
    pub savings_percentage: Option<f64>,
}

impl RecordSavings {
    /// Whether the automation costs more time than it saves.
    #[must_use]
    pub fn is_net_cost(&self) -> bool {
        self.time_saved_minutes < 0.0
    }
}

/// Hours and dollars over one horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    pub hours: f64,
    pub dollars: f64,
}

impl Savings {
    fn scaled(self, factor: f64) -> Self {
        Self {
            hours: self.hours * factor,
            dollars: self.dollars * factor,
        }
    }
}

/// Aggregate savings over all records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub weekly: Savings,
    pub monthly: Savings,
    pub yearly: Savings,
    /// Yearly hours expressed as 40-hour work weeks.
    pub work_weeks_saved: f64,
    /// Yearly hours as a percentage of one FTE.
    pub fte_percentage: f64,
}

/// Compute the weekly savings of a single record at `hourly_rate`.
#[must_use]
pub fn compute_record_savings(record: &AutomationRecord, hourly_rate: f64) -> RecordSavings {
    let time_saved_minutes = record.time_before_minutes - record.time_after_minutes;
    let weekly_hours = (time_saved_minutes / MINUTES_PER_HOUR) * record.frequency_per_week;
    let weekly_dollars = weekly_hours * hourly_rate;
    let savings_percentage = (record.time_before_minutes != 0.0)
        .then(|| time_saved_minutes / record.time_before_minutes * 100.0);

    RecordSavings {
        time_saved_minutes,
        weekly_hours,
        weekly_dollars,
        savings_percentage,
    }
}

/// Sum the weekly savings of `records` and derive every other horizon.
#[must_use]
pub fn compute_totals<'a, I>(records: I, hourly_rate: f64) -> Totals
where
    I: IntoIterator<Item = &'a AutomationRecord>,
{
    let weekly = records
        .into_iter()
        .map(|record| compute_record_savings(record, hourly_rate))
        .fold(Savings::default(), |acc, savings| Savings {
            hours: acc.hours + savings.weekly_hours,
            dollars: acc.dollars + savings.weekly_dollars,
        });

    let yearly = weekly.scaled(WEEKS_PER_YEAR);

    Totals {
        weekly,
        monthly: weekly.scaled(WEEKS_PER_MONTH),
        yearly,
        work_weeks_saved: yearly.hours / HOURS_PER_WORK_WEEK,
        fte_percentage: (yearly.hours / FTE_HOURS_PER_YEAR) * 100.0,
    }
}
