//! Roadmap: a fixed four-week checklist with one note per week.
//!
//! Weeks and tasks are closed enumerations indexing fixed-size arrays, so
//! every one of the 4 × 3 flags and the 4 notes always exists. Mutations
//! only flip flags or replace note text.
//!
//! The serialized shape is keyed by the textual ids:
//! `{"week1":{"task1":false,"task2":false,"task3":false},…}` for the
//! checklist and `{"week1":"",…}` for the notes. Decoding rejects missing
//! or unknown keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseIdError;

/// One week of the roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Week {
    Week1,
    Week2,
    Week3,
    Week4,
}

impl Week {
    pub const COUNT: usize = 4;
    pub const ALL: [Self; Self::COUNT] = [Self::Week1, Self::Week2, Self::Week3, Self::Week4];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Week1 => 0,
            Self::Week2 => 1,
            Self::Week3 => 2,
            Self::Week4 => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week1 => "week1",
            Self::Week2 => "week2",
            Self::Week3 => "week3",
            Self::Week4 => "week4",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Week1 => "Week 1: AUDIT",
            Self::Week2 => "Week 2: BUILD",
            Self::Week3 => "Week 3: REFINE",
            Self::Week4 => "Week 4: SCALE",
        }
    }

    /// Hint shown in an empty note field.
    #[must_use]
    pub const fn note_placeholder(self) -> &'static str {
        match self {
            Self::Week1 => "My pilot automation will be...",
            Self::Week2 => "Tools I used / Time saved...",
            Self::Week3 => "What I learned / Next automation...",
            Self::Week4 => "Total time saved / Next quarter goals...",
        }
    }

    #[must_use]
    pub const fn task_label(self, task: Task) -> &'static str {
        match (self, task) {
            (Self::Week1, Task::Task1) => "List your top 10 time-consuming tasks",
            (Self::Week1, Task::Task2) => {
                "Apply the 3 Criteria Test (Repetitive, Rule-based, Time-consuming)"
            }
            (Self::Week1, Task::Task3) => "Select your pilot automation (start with ONE)",
            (Self::Week2, Task::Task1) => "Create your first automated workflow",
            (Self::Week2, Task::Task2) => "Document the process (prompts, tools, steps)",
            (Self::Week2, Task::Task3) => "Measure baseline metrics (time before vs after)",
            (Self::Week3, Task::Task1) => "Optimize based on Week 2 results",
            (Self::Week3, Task::Task2) => "Train others if applicable (share your workflow)",
            (Self::Week3, Task::Task3) => "Identify workflow #2 to automate",
            (Self::Week4, Task::Task1) => "Implement second automation",
            (Self::Week4, Task::Task2) => "Calculate cumulative ROI (total time saved)",
            (Self::Week4, Task::Task3) => "Plan your next quarter automation priorities",
        }
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Week {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|week| week.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "week",
                value: s.to_string(),
            })
    }
}

/// One checklist item within a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Task1,
    Task2,
    Task3,
}

impl Task {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Task1, Self::Task2, Self::Task3];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Task1 => 0,
            Self::Task2 => 1,
            Self::Task3 => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task1 => "task1",
            Self::Task2 => "task2",
            Self::Task3 => "task3",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| ParseIdError {
                kind: "task",
                value: s.to_string(),
            })
    }
}

/// Completion flags for every task of every week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ChecklistRepr", into = "ChecklistRepr")]
pub struct Checklist([[bool; Task::COUNT]; Week::COUNT]);

impl Checklist {
    #[must_use]
    pub fn is_done(&self, week: Week, task: Task) -> bool {
        self.0[week.index()][task.index()]
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, week: Week, task: Task) -> bool {
        let flag = &mut self.0[week.index()][task.index()];
        *flag = !*flag;
        *flag
    }

    #[must_use]
    pub fn completed_in(&self, week: Week) -> usize {
        self.0[week.index()].iter().filter(|done| **done).count()
    }
}

/// Free-text note per week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NotesRepr", into = "NotesRepr")]
pub struct Notes([String; Week::COUNT]);

impl Notes {
    #[must_use]
    pub fn get(&self, week: Week) -> &str {
        &self.0[week.index()]
    }

    pub fn set(&mut self, week: Week, text: String) {
        self.0[week.index()] = text;
    }
}

/// Task completion summary across the whole roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadmapProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

/// Checklist and notes of the four-week roadmap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapState {
    pub checklist: Checklist,
    pub notes: Notes,
}

impl RoadmapState {
    /// Flip the completion flag of `task` in `week`, returning the new value.
    pub fn toggle_task(&mut self, week: Week, task: Task) -> bool {
        self.checklist.toggle(week, task)
    }

    /// Replace the note of `week` verbatim.
    pub fn update_note(&mut self, week: Week, text: impl Into<String>) {
        self.notes.set(week, text.into());
    }

    #[must_use]
    pub fn is_done(&self, week: Week, task: Task) -> bool {
        self.checklist.is_done(week, task)
    }

    #[must_use]
    pub fn note(&self, week: Week) -> &str {
        self.notes.get(week)
    }

    #[must_use]
    pub fn completed_in(&self, week: Week) -> usize {
        self.checklist.completed_in(week)
    }

    #[must_use]
    pub fn is_week_complete(&self, week: Week) -> bool {
        self.completed_in(week) == Task::COUNT
    }

    #[must_use]
    pub fn progress(&self) -> RoadmapProgress {
        let completed: usize = Week::ALL.into_iter().map(|w| self.completed_in(w)).sum();
        let total = Week::COUNT * Task::COUNT;
        #[allow(clippy::cast_precision_loss)]
        let percentage = completed as f64 / total as f64 * 100.0;
        RoadmapProgress {
            completed,
            total,
            percentage,
        }
    }

    /// Restore the all-false / all-empty shape.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// Keyed representations used on the wire.

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WeekTasksRepr {
    task1: bool,
    task2: bool,
    task3: bool,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChecklistRepr {
    week1: WeekTasksRepr,
    week2: WeekTasksRepr,
    week3: WeekTasksRepr,
    week4: WeekTasksRepr,
}

impl From<[bool; Task::COUNT]> for WeekTasksRepr {
    fn from([task1, task2, task3]: [bool; Task::COUNT]) -> Self {
        Self {
            task1,
            task2,
            task3,
        }
    }
}

impl From<WeekTasksRepr> for [bool; Task::COUNT] {
    fn from(repr: WeekTasksRepr) -> Self {
        [repr.task1, repr.task2, repr.task3]
    }
}

impl From<ChecklistRepr> for Checklist {
    fn from(repr: ChecklistRepr) -> Self {
        Self([
            repr.week1.into(),
            repr.week2.into(),
            repr.week3.into(),
            repr.week4.into(),
        ])
    }
}

impl From<Checklist> for ChecklistRepr {
    fn from(Checklist([week1, week2, week3, week4]): Checklist) -> Self {
        Self {
            week1: week1.into(),
            week2: week2.into(),
            week3: week3.into(),
            week4: week4.into(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct NotesRepr {
    week1: String,
    week2: String,
    week3: String,
    week4: String,
}

impl From<NotesRepr> for Notes {
    fn from(repr: NotesRepr) -> Self {
        Self([repr.week1, repr.week2, repr.week3, repr.week4])
    }
}

impl From<Notes> for NotesRepr {
    fn from(Notes([week1, week2, week3, week4]): Notes) -> Self {
        Self {
            week1,
            week2,
            week3,
            week4,
        }
    }
}
