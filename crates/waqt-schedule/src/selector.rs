//! Next-prayer selection.

use chrono::{DateTime, Utc};
use tracing::warn;
use waqt_types::{PrayerName, PrayerTimePoint};

/// Picks the prayer that comes next after `now`.
///
/// Candidates are every point except `Shoroq` whose timestamp is strictly
/// after `now`; the soonest wins, first-encountered on ties. Input order is
/// not assumed.
///
/// When nothing is left today the day's `Fajr` is returned with its
/// timestamp moved forward by exactly 24 hours. If the list has no `Fajr`
/// the first element is returned unmodified, even when it is `Shoroq` or
/// already past. Returns `None` only for an empty list.
///
/// # Example
/// ```rust
/// use chrono::{NaiveTime, TimeZone, Utc};
/// use waqt_types::{PrayerName, PrayerTimePoint};
/// use waqt_schedule::select_next_prayer;
///
/// let at = |h, m| Utc.with_ymd_and_hms(2025, 1, 10, h, m, 0).unwrap();
/// let point = |name, h, m| PrayerTimePoint::new(name, NaiveTime::from_hms_opt(h, m, 0).unwrap(), at(h, m));
///
/// let day = [point(PrayerName::Fajr, 5, 41), point(PrayerName::Dhuhr, 12, 14)];
/// let next = select_next_prayer(&day, at(10, 0)).unwrap();
/// assert_eq!(next.name, PrayerName::Dhuhr);
/// ```
pub fn select_next_prayer(points: &[PrayerTimePoint], now: DateTime<Utc>) -> Option<PrayerTimePoint> {
    let first = points.first()?;

    let upcoming = points
        .iter()
        .filter(|p| p.name.is_prayer() && p.timestamp > now)
        .min_by_key(|p| p.timestamp);

    if let Some(next) = upcoming {
        return Some(*next);
    }

    if let Some(fajr) = points.iter().find(|p| p.name == PrayerName::Fajr) {
        return Some(fajr.rolled_over());
    }

    warn!(
        fallback = %first.name,
        count = points.len(),
        "no Fajr in schedule for rollover, falling back to first entry"
    );
    Some(*first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, TimeZone};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, h, m, 0).unwrap()
    }

    fn point(name: PrayerName, h: u32, m: u32) -> PrayerTimePoint {
        PrayerTimePoint::new(name, NaiveTime::from_hms_opt(h, m, 0).unwrap(), at(h, m))
    }

    fn copenhagen_winter() -> Vec<PrayerTimePoint> {
        vec![
            point(PrayerName::Fajr, 5, 41),
            point(PrayerName::Shoroq, 8, 39),
            point(PrayerName::Dhuhr, 12, 14),
            point(PrayerName::Asr, 13, 34),
            point(PrayerName::Maghrib, 15, 49),
        ]
    }

    #[test]
    fn test_empty_is_none() {
        assert_eq!(select_next_prayer(&[], at(10, 0)), None);
    }

    #[test]
    fn test_skips_past_fajr_and_shoroq() {
        let next = select_next_prayer(&copenhagen_winter(), at(10, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);
        assert_eq!(next.timestamp, at(12, 14));
    }

    #[test]
    fn test_shoroq_ignored_when_earliest_future() {
        let day = [
            point(PrayerName::Shoroq, 8, 39),
            point(PrayerName::Dhuhr, 12, 14),
        ];
        let next = select_next_prayer(&day, at(7, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Dhuhr);
    }

    #[test]
    fn test_unordered_input() {
        let mut day = copenhagen_winter();
        day.reverse();
        let next = select_next_prayer(&day, at(13, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
    }

    #[test]
    fn test_exact_timestamp_counts_as_passed() {
        let next = select_next_prayer(&copenhagen_winter(), at(12, 14)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
    }

    #[test]
    fn test_rollover_to_tomorrows_fajr() {
        let day = copenhagen_winter();
        let next = select_next_prayer(&day, at(23, 59)).unwrap();
        assert_eq!(next.name, PrayerName::Fajr);
        assert_eq!(next.timestamp, at(5, 41) + Duration::hours(24));
        assert_eq!(next.time_label(), "05:41");
    }

    #[test]
    fn test_missing_fajr_falls_back_to_first_entry() {
        let day = [
            point(PrayerName::Shoroq, 8, 39),
            point(PrayerName::Dhuhr, 12, 14),
        ];
        let next = select_next_prayer(&day, at(23, 0)).unwrap();
        assert_eq!(next, day[0]);
    }

    #[test]
    fn test_tie_picks_first_encountered() {
        let mut asr = point(PrayerName::Asr, 13, 34);
        asr.timestamp = at(12, 14);
        let day = [asr, point(PrayerName::Dhuhr, 12, 14)];
        let next = select_next_prayer(&day, at(10, 0)).unwrap();
        assert_eq!(next.name, PrayerName::Asr);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let day = copenhagen_winter();
        let before = day.clone();
        let _ = select_next_prayer(&day, at(23, 59));
        assert_eq!(day, before);
    }
}
