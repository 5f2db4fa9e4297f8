//! Prayer time widget engine.
//!
//! Ties the pure schedule calculator to configuration, a render snapshot
//! and, with the `async` feature, the remote timetable and a 1 Hz ticker.

pub mod board;
pub mod clock;
pub mod config;
#[cfg(feature = "async")]
pub mod ticker;

pub use board::{BoardRow, PrayerBoard};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{WidgetConfig, WidgetConfigBuilder};
pub use waqt_schedule::{parse_wall_clock, resolve_day_schedule, resolve_timestamp, select_next_prayer, time_until};
pub use waqt_types::{CountdownDuration, DaySchedule, PrayerName, PrayerTimePoint, TimetableQuery, WaqtError};

#[cfg(feature = "async")]
pub use ticker::{CountdownTicker, WidgetState};

/// Remote timetable types, re-exported from `waqt-network`.
#[cfg(feature = "async")]
pub mod network {
    pub use waqt_network::aladhan::{map_timings, Timings, DEFAULT_BASE_URL};
    pub use waqt_network::*;
}

pub use chrono_tz::Tz;

pub mod prelude {
    pub use crate::{
        CountdownDuration, DaySchedule, PrayerBoard, PrayerName, PrayerTimePoint, WaqtError, WidgetConfig,
    };
    pub use crate::{select_next_prayer, time_until};
}

use chrono::{DateTime, Utc};

/// Evaluates a day of `(name, "HH:mm")` entries at `now`.
///
/// The date is taken from `now` in the configured zone.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use waqt_core::{board_for, PrayerName, WidgetConfig};
///
/// let config = WidgetConfig::default(); // Copenhagen
/// let now = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap(); // 10:00 local
/// let board = board_for(&config, now, [(PrayerName::Fajr, "05:41"), (PrayerName::Dhuhr, "12:14")]).unwrap();
/// assert_eq!(board.next.unwrap().name, PrayerName::Dhuhr);
/// ```
pub fn board_for<I, S>(config: &WidgetConfig, now: DateTime<Utc>, entries: I) -> Result<PrayerBoard, WaqtError>
where
    I: IntoIterator<Item = (PrayerName, S)>,
    S: AsRef<str>,
{
    let schedule = resolve_day_schedule(config.today(now), config.timezone, entries)?;
    Ok(PrayerBoard::evaluate(schedule, now))
}
