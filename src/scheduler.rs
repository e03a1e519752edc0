//! Spaced-repetition scheduling: review grades, the interval/ease update
//! rule, and the due-date computation that drives the daily review queue.
//!
//! The update rule is a simplified SM-2: `hard` resets the interval and
//! shrinks the ease factor, `easy` grows both, and `medium` sits strictly
//! between the two.

use chrono::{Days, NaiveDate};

use crate::library::Song;

/// Lower clamp for a song's ease factor.
pub const EASE_MIN: f64 = 1.3;
/// Upper clamp for a song's ease factor.
pub const EASE_MAX: f64 = 2.5;

/// Scheduling state given to every newly added song.
pub const INITIAL_INTERVAL_DAYS: u32 = 1;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// How a review went, as reported by the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Grade {
    Hard,
    Medium,
    Easy,
}

impl Grade {
    /// Parse a one-letter grade as typed at the review prompt.
    ///
    /// Whitespace and case are ignored. Anything that is not `h`, `m` or
    /// `e` is rejected; the caller skips the song without touching it.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "h" => Some(Self::Hard),
            "m" => Some(Self::Medium),
            "e" => Some(Self::Easy),
            _ => None,
        }
    }
}

/// The scheduling state produced by grading one review.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Review {
    pub interval_days: u32,
    pub ease_factor: f64,
}

/// Apply `grade` to a song's current scheduling state.
///
/// The returned state always satisfies `interval_days >= 1` and
/// `ease_factor` in `[EASE_MIN, EASE_MAX]` rounded to 2 decimal places.
pub fn apply(grade: Grade, interval_days: u32, ease_factor: f64) -> Review {
    let interval = f64::from(interval_days);
    let (raw_interval, raw_ease) = match grade {
        Grade::Hard => (1.0, ease_factor * 0.9),
        Grade::Medium => ((interval * ease_factor * 1.15).round(), ease_factor * 1.02),
        Grade::Easy => ((interval * ease_factor * 1.3).floor(), ease_factor * 1.1),
    };

    Review {
        interval_days: raw_interval.max(1.0) as u32,
        ease_factor: round2(raw_ease.clamp(EASE_MIN, EASE_MAX)),
    }
}

/// The date a song becomes due again: `last_practiced + interval_days`.
pub fn due_date(last_practiced: NaiveDate, interval_days: u32) -> NaiveDate {
    last_practiced
        .checked_add_days(Days::new(u64::from(interval_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Indices of the songs due on `today`, in store order.
pub fn due_indices(songs: &[Song], today: NaiveDate) -> Vec<usize> {
    songs
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_due(today))
        .map(|(i, _)| i)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
