use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Europe::Copenhagen;
use waqt::{
    resolve_day_schedule, select_next_prayer, time_until, CountdownDuration, DaySchedule, PrayerBoard, PrayerName,
    PrayerTimePoint, WidgetConfig,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

fn local(h: u32, m: u32) -> DateTime<Utc> {
    Copenhagen
        .with_ymd_and_hms(2025, 1, 10, h, m, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// Copenhagen winter day; Isha is unset and therefore absent.
fn winter_day() -> DaySchedule {
    resolve_day_schedule(
        date(),
        Copenhagen,
        [
            (PrayerName::Fajr, "05:41"),
            (PrayerName::Shoroq, "08:39"),
            (PrayerName::Dhuhr, "12:14"),
            (PrayerName::Asr, "13:34"),
            (PrayerName::Maghrib, "15:49"),
        ],
    )
    .unwrap()
}

#[test]
fn scenario_mid_morning_selects_dhuhr() {
    let next = select_next_prayer(winter_day().as_slice(), local(10, 0)).unwrap();
    assert_eq!(next.name, PrayerName::Dhuhr);
    assert_eq!(next.time_label(), "12:14");
}

#[test]
fn scenario_late_night_rolls_over_to_fajr() {
    let day = winter_day();
    let now = local(23, 59);
    let next = select_next_prayer(day.as_slice(), now).unwrap();

    assert_eq!(next.name, PrayerName::Fajr);
    assert_eq!(next.timestamp, day.get(PrayerName::Fajr).unwrap().timestamp + Duration::hours(24));
    assert_eq!(
        time_until(next.timestamp, now),
        CountdownDuration { hours: 5, minutes: 42, seconds: 0 }
    );
}

#[test]
fn scenario_countdown_decomposes() {
    let now = local(12, 0);
    assert_eq!(
        time_until(now + Duration::seconds(3661), now),
        CountdownDuration { hours: 1, minutes: 1, seconds: 1 }
    );
}

#[test]
fn scenario_past_target_clamps_to_zero() {
    let now = local(12, 0);
    assert_eq!(time_until(now - Duration::seconds(5), now), CountdownDuration::ZERO);
}

#[test]
fn scenario_empty_list_is_none() {
    assert!(select_next_prayer(&[], local(12, 0)).is_none());
}

#[test]
fn scenario_missing_fajr_returns_first_entry() {
    let day = resolve_day_schedule(
        date(),
        Copenhagen,
        [(PrayerName::Shoroq, "08:39"), (PrayerName::Dhuhr, "12:14"), (PrayerName::Asr, "13:34")],
    )
    .unwrap();

    let next = select_next_prayer(day.as_slice(), local(22, 0)).unwrap();
    assert_eq!(next, day.points[0]);
    assert_eq!(next.name, PrayerName::Shoroq);
}

#[test]
fn now_equal_to_last_prayer_rolls_over() {
    let day = winter_day();
    let maghrib = day.get(PrayerName::Maghrib).unwrap().timestamp;
    let next = select_next_prayer(day.as_slice(), maghrib).unwrap();
    assert_eq!(next.name, PrayerName::Fajr);
    assert!(next.timestamp > maghrib);
}

#[test]
fn all_future_ignores_shoroq() {
    let at = |h, m| Utc.with_ymd_and_hms(2025, 1, 10, h, m, 0).unwrap();
    let point = |name, h, m| {
        PrayerTimePoint::new(name, chrono::NaiveTime::from_hms_opt(h, m, 0).unwrap(), at(h, m))
    };
    let day = [
        point(PrayerName::Shoroq, 1, 0),
        point(PrayerName::Isha, 20, 0),
        point(PrayerName::Fajr, 5, 0),
    ];

    let next = select_next_prayer(&day, at(0, 30)).unwrap();
    assert_eq!(next.name, PrayerName::Fajr);
}

#[test]
fn board_snapshot_for_widget() {
    let board = PrayerBoard::evaluate(winter_day(), local(13, 0));
    assert_eq!(board.next.unwrap().name, PrayerName::Asr);
    assert_eq!(board.countdown.unwrap().to_string(), "00:34:00");

    let highlighted: Vec<_> = board.rows().into_iter().filter(|r| r.is_next).map(|r| r.name).collect();
    assert_eq!(highlighted, [PrayerName::Asr]);
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let day = winter_day();
    let now = local(14, 0);
    let a = select_next_prayer(day.as_slice(), now);
    let b = select_next_prayer(day.as_slice(), now);
    assert_eq!(a, b);
    assert_eq!(day, winter_day());
}

#[test]
fn config_date_drives_refresh_key() {
    let config = WidgetConfig::builder().city("Aarhus").build().unwrap();
    let before_midnight = local(23, 59);
    let after_midnight = before_midnight + Duration::minutes(2);

    assert_ne!(
        config.query_for(config.today(before_midnight)),
        config.query_for(config.today(after_midnight))
    );
}
