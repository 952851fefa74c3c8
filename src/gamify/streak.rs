//! Day-streak evaluation
//!
//! The streak counts consecutive days with at least one study session. The
//! gap between two activities is measured in whole elapsed days (truncated
//! duration), not calendar dates: a session 23 hours after the last one is
//! still "the same day", one 25 hours later is the next day.

use chrono::{DateTime, Utc};

/// Compute the streak value after an activity at `now`.
///
/// Evaluated in order, first match wins:
/// - no prior activity: the streak starts at 1
/// - gap of 0 days: unchanged
/// - gap of exactly 1 day: continuation
/// - gap over 1 day: reset to 1
/// - negative gap (event older than the recorded last activity, e.g. clock
///   skew or an out-of-order import): treated as same-day, count unchanged
///
/// The caller must set `last_activity = now` afterwards regardless of the
/// outcome; that is what makes the next day's gap come out to exactly one.
pub fn next_streak(current: u32, last_activity: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let Some(last) = last_activity else {
        return 1;
    };

    match (now - last).num_days() {
        1 => current + 1,
        d if d > 1 => 1,
        // 0 or negative: same day, keep the count
        _ => current,
    }
}
