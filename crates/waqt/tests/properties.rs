use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use proptest::prelude::*;
use waqt::prelude::*;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
}

fn arb_name() -> impl Strategy<Value = PrayerName> {
    prop::sample::select(PrayerName::ALL.to_vec())
}

/// Points anywhere within a two-day window, arbitrary order and names.
fn arb_points() -> impl Strategy<Value = Vec<PrayerTimePoint>> {
    prop::collection::vec((arb_name(), 0i64..172_800), 0..8).prop_map(|raw| {
        raw.into_iter()
            .map(|(name, secs)| {
                let timestamp = base() + Duration::seconds(secs);
                let time = NaiveTime::from_num_seconds_from_midnight_opt((secs % 86_400) as u32, 0).unwrap();
                PrayerTimePoint::new(name, time, timestamp)
            })
            .collect()
    })
}

fn arb_now() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..172_800).prop_map(|secs| base() + Duration::seconds(secs))
}

proptest! {
    /// Invariant: countdown components never negative and stay in range.
    #[test]
    fn countdown_non_negative(offset in -1_000_000i64..1_000_000, now in arb_now()) {
        let c = time_until(now + Duration::seconds(offset), now);
        prop_assert!(c.minutes < 60);
        prop_assert!(c.seconds < 60);
    }

    /// Invariant: targets at or before now clamp to zero.
    #[test]
    fn past_clamps_to_zero(back in 0i64..10_000_000, now in arb_now()) {
        prop_assert_eq!(time_until(now - Duration::seconds(back), now), CountdownDuration::ZERO);
    }

    /// Invariant: hours/minutes/seconds reconstruct the delta exactly.
    #[test]
    fn decomposition_is_lossless(delta in 0i64..100_000_000, now in arb_now()) {
        let c = time_until(now + Duration::seconds(delta), now);
        prop_assert_eq!(c.hours * 3600 + u64::from(c.minutes) * 60 + u64::from(c.seconds), delta as u64);
    }

    /// Invariant: Shoroq is never selected while any other option exists.
    #[test]
    fn shoroq_never_next_when_fajr_present(points in arb_points(), now in arb_now()) {
        prop_assume!(points.iter().any(|p| p.name == PrayerName::Fajr));
        let next = select_next_prayer(&points, now).unwrap();
        prop_assert_ne!(next.name, PrayerName::Shoroq);
    }

    /// Invariant: non-rollover picks are strictly in the future and the soonest.
    #[test]
    fn selection_is_strict_future(points in arb_points(), now in arb_now()) {
        let eligible: Vec<_> = points.iter().filter(|p| p.name.is_prayer() && p.timestamp > now).collect();
        if let Some(soonest) = eligible.iter().map(|p| p.timestamp).min() {
            let next = select_next_prayer(&points, now).unwrap();
            prop_assert!(next.timestamp > now);
            prop_assert_eq!(next.timestamp, soonest);
            prop_assert!(points.contains(&next));
        }
    }

    /// Invariant: with nothing left, result is the first Fajr plus exactly 24h.
    #[test]
    fn rollover_is_fajr_plus_one_day(points in arb_points(), now in arb_now()) {
        let none_left = points.iter().all(|p| !p.name.is_prayer() || p.timestamp <= now);
        let fajr = points.iter().find(|p| p.name == PrayerName::Fajr);
        if let (true, Some(fajr)) = (none_left, fajr) {
            let next = select_next_prayer(&points, now).unwrap();
            prop_assert_eq!(next.name, PrayerName::Fajr);
            prop_assert_eq!(next.timestamp, fajr.timestamp + Duration::hours(24));
        }
    }

    /// Invariant: empty input yields none for any instant.
    #[test]
    fn empty_is_none(now in arb_now()) {
        prop_assert!(select_next_prayer(&[], now).is_none());
    }

    /// Invariant: some result exists for any non-empty input.
    #[test]
    fn total_over_non_empty(points in arb_points(), now in arb_now()) {
        prop_assume!(!points.is_empty());
        prop_assert!(select_next_prayer(&points, now).is_some());
    }
}
