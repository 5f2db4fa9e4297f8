//! Wall-clock parsing and day resolution.
//!
//! Timetable providers hand out `HH:mm` strings for a single day. These are
//! combined with the reference date in the configured IANA zone once per
//! load, so the calculator only ever compares absolute instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use waqt_types::{DaySchedule, PrayerName, PrayerTimePoint, WaqtError};

/// Parses `HH:mm` or `HH:mm:ss` into a minute-resolution time of day.
///
/// Trailing annotations after whitespace are ignored (`"05:41 (CET)"`).
/// Seconds are validated and then dropped.
pub fn parse_wall_clock(input: &str) -> Result<NaiveTime, WaqtError> {
    let clock = input
        .split_whitespace()
        .next()
        .ok_or_else(|| WaqtError::invalid_time(input))?;

    let fields: Vec<&str> = clock.split(':').collect();
    if !(2..=3).contains(&fields.len()) {
        return Err(WaqtError::invalid_time(input));
    }

    let hours = parse_field(fields[0], 23);
    let minutes = parse_field(fields[1], 59);
    let seconds_ok = fields.get(2).is_none_or(|s| parse_field(s, 59).is_some());

    match (hours, minutes) {
        (Some(h), Some(m)) if seconds_ok => {
            NaiveTime::from_hms_opt(h, m, 0).ok_or_else(|| WaqtError::invalid_time(input))
        }
        _ => Err(WaqtError::invalid_time(input)),
    }
}

fn parse_field(field: &str, max: u32) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok().filter(|v| *v <= max)
}

/// Combines `date` and `time` in `tz` into an absolute instant.
///
/// Repeated local times (DST fall-back) take the earlier instant. Skipped
/// local times (DST spring-forward) are shifted one hour later.
pub fn resolve_timestamp(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<DateTime<Utc>, WaqtError> {
    let local = date.and_time(time);

    let resolved = tz.from_local_datetime(&local).earliest().or_else(|| {
        local
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
    });

    resolved
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| WaqtError::UnresolvableLocalTime {
            date,
            time,
            zone: tz.name().to_string(),
        })
}

/// Builds a day schedule from `(name, wall-clock)` pairs, keeping their order.
pub fn resolve_day_schedule<I, S>(date: NaiveDate, tz: Tz, entries: I) -> Result<DaySchedule, WaqtError>
where
    I: IntoIterator<Item = (PrayerName, S)>,
    S: AsRef<str>,
{
    let points = entries
        .into_iter()
        .map(|(name, raw)| {
            let time = parse_wall_clock(raw.as_ref())?;
            let timestamp = resolve_timestamp(date, time, tz)?;
            Ok(PrayerTimePoint::new(name, time, timestamp))
        })
        .collect::<Result<Vec<_>, WaqtError>>()?;

    Ok(DaySchedule::new(date, points))
}
