//! The `Song` model: one practiced piece and its scheduling state.

use chrono::NaiveDate;

use crate::scheduler::{self, Grade, INITIAL_EASE_FACTOR, INITIAL_INTERVAL_DAYS};

/// One piece under practice, as persisted in the store.
///
/// Songs have no stable identifier; selection in the CLI is by 1-based
/// position in store order, and names are not required to be unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    /// Display name.
    pub name: String,
    /// Free-text link or note; opaque to the scheduler.
    pub reference: String,
    /// Date of the most recent review (no time component).
    pub last_practiced: NaiveDate,
    /// Days until the song is due again. Always >= 1.
    pub interval_days: u32,
    /// Interval growth multiplier, clamped to `[EASE_MIN, EASE_MAX]`.
    pub ease_factor: f64,
}

impl Song {
    /// Create a song with the initial scheduling state, due tomorrow.
    pub fn new(name: impl Into<String>, reference: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            reference: reference.into(),
            last_practiced: today,
            interval_days: INITIAL_INTERVAL_DAYS,
            ease_factor: INITIAL_EASE_FACTOR,
        }
    }

    /// The date this song becomes due again.
    pub fn due_date(&self) -> NaiveDate {
        scheduler::due_date(self.last_practiced, self.interval_days)
    }

    /// Whether this song is due on `today` (date-only comparison).
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date() <= today
    }

    /// Record a graded review performed on `today`.
    pub fn apply_review(&mut self, grade: Grade, today: NaiveDate) {
        let review = scheduler::apply(grade, self.interval_days, self.ease_factor);
        self.last_practiced = today;
        self.interval_days = review.interval_days;
        self.ease_factor = review.ease_factor;
    }
}
