//! Goal tree data model.
//!
//! Pure domain types with no IO and no async: a [`GoalArea`] owns
//! [`Phase`]s and direct [`MicroHabit`]s, and each micro-habit owns its
//! append-only [`CheckIn`] history. Ownership is strictly tree-shaped;
//! storage backends persist the whole tree as one document.
//!
//! Wire compatibility: field names and status strings match the data files
//! written by earlier versions (`micro_goals`, `self_talk_generated`,
//! lowercase status literals), so existing documents load unchanged.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::id::NodeId;

/// Raised when a required name is empty after trimming whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("name must not be empty after trimming whitespace")]
pub struct NameError;

fn valid_name(raw: impl Into<String>) -> Result<String, NameError> {
    let trimmed = raw.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(NameError);
    }
    Ok(trimmed)
}

/// Legacy documents may carry surrounding whitespace; trim on parse the way
/// writes always have.
fn trimmed<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    Ok(raw.trim().to_string())
}

/// Lifecycle stage of a [`MicroHabit`].
///
/// `Cancelled` and `Complete` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Cancelled,
    Complete,
}

impl Status {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Complete)
    }
}

/// One dated success/failure record for a micro-habit.
///
/// Immutable once created and only ever appended to a habit's history.
/// Insertion order is chronological-ish but not guaranteed sorted; consumers
/// that need date order sort for themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub date: NaiveDate,
    pub success: bool,
    #[serde(default)]
    pub note: Option<String>,
    /// Pep talk chosen at check-in time, if any.
    #[serde(default, rename = "self_talk_generated")]
    pub generated_message: Option<String>,
}

impl CheckIn {
    /// Check-in for an explicit date. Backfills and tests rely on this.
    #[must_use]
    pub fn on(date: NaiveDate, success: bool) -> Self {
        Self {
            date,
            success,
            note: None,
            generated_message: None,
        }
    }

    /// Check-in dated today (local calendar date).
    #[must_use]
    pub fn today(success: bool) -> Self {
        Self::on(Local::now().date_naive(), success)
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn with_generated_message(mut self, message: impl Into<String>) -> Self {
        self.generated_message = Some(message.into());
        self
    }
}

/// The smallest trackable behaviour: a tiny habit with a lifecycle status
/// and a check-in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroHabit {
    pub id: NodeId,
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub checkins: Vec<CheckIn>,
    /// Per-habit override of the configured advancement window (days).
    #[serde(default)]
    pub advancement_window: Option<u32>,
    /// Per-habit override of the configured advancement success ratio.
    #[serde(default)]
    pub advancement_threshold: Option<f64>,
}

impl MicroHabit {
    /// Create an active habit with a fresh id, empty history and a
    /// now-UTC creation timestamp.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        Ok(Self {
            id: NodeId::generate(),
            name: valid_name(name)?,
            status: Status::Active,
            created_at: Utc::now(),
            checkins: Vec::new(),
            advancement_window: None,
            advancement_threshold: None,
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_advancement(mut self, window: u32, threshold: f64) -> Self {
        self.advancement_window = Some(window);
        self.advancement_threshold = Some(threshold);
        self
    }

    /// Append a check-in to the history. Check-ins are never edited or
    /// removed once recorded.
    pub fn record(&mut self, checkin: CheckIn) {
        self.checkins.push(checkin);
    }

    /// Graduated or manually finished. Terminal.
    pub fn complete(&mut self) {
        self.status = Status::Complete;
    }

    /// Abandoned without deleting its history. Terminal.
    pub fn cancel(&mut self) {
        self.status = Status::Cancelled;
    }
}

/// Named stage of progress grouping micro-habits within a goal area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub id: NodeId,
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "micro_goals")]
    pub micro_habits: Vec<MicroHabit>,
    pub created_at: DateTime<Utc>,
}

impl Phase {
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        Ok(Self {
            id: NodeId::generate(),
            name: valid_name(name)?,
            notes: None,
            micro_habits: Vec::new(),
            created_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_habits(mut self, habits: Vec<MicroHabit>) -> Self {
        self.micro_habits = habits;
        self
    }
}

/// Top-level tracked objective. Holds micro-habits both inside phases and
/// directly; both lists are first-class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalArea {
    pub id: NodeId,
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default, rename = "micro_goals")]
    pub micro_habits: Vec<MicroHabit>,
    pub created_at: DateTime<Utc>,
}

impl GoalArea {
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        Ok(Self {
            id: NodeId::generate(),
            name: valid_name(name)?,
            notes: None,
            phases: Vec::new(),
            micro_habits: Vec::new(),
            created_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_phases(mut self, phases: Vec<Phase>) -> Self {
        self.phases = phases;
        self
    }

    #[must_use]
    pub fn with_habits(mut self, habits: Vec<MicroHabit>) -> Self {
        self.micro_habits = habits;
        self
    }

    /// The micro-habit currently "in scope" for advancement: first Active
    /// habit scanning phases in declaration order, else first Active direct
    /// habit. This is a lookup convention, not an enforced constraint -
    /// several Active habits may coexist, only the scan order is fixed.
    #[must_use]
    pub fn active_micro_habit(&self) -> Option<&MicroHabit> {
        self.phases
            .iter()
            .flat_map(|ph| &ph.micro_habits)
            .find(|mh| mh.status == Status::Active)
            .or_else(|| {
                self.micro_habits
                    .iter()
                    .find(|mh| mh.status == Status::Active)
            })
    }

    /// Mutable variant of [`Self::active_micro_habit`], same scan order.
    pub fn active_micro_habit_mut(&mut self) -> Option<&mut MicroHabit> {
        if let Some(found) = self
            .phases
            .iter_mut()
            .flat_map(|ph| &mut ph.micro_habits)
            .find(|mh| mh.status == Status::Active)
        {
            return Some(found);
        }
        self.micro_habits
            .iter_mut()
            .find(|mh| mh.status == Status::Active)
    }
}
