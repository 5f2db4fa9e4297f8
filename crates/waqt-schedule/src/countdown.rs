//! Countdown to a target instant.

use chrono::{DateTime, Utc};
use waqt_types::CountdownDuration;

/// Whole hours/minutes/seconds from `now` until `target`.
///
/// Clamped to zero when `target` is not in the future. Sub-second remainders
/// are truncated, and hours are never wrapped into days.
pub fn time_until(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownDuration {
    let delta = target.signed_duration_since(now).num_seconds().max(0);
    CountdownDuration::from_seconds(delta as u64)
}
