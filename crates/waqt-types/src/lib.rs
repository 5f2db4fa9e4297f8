//! Core types for waqt.
//!
//! Named prayer time points for one calendar day, the countdown shape the
//! widget renders, and the shared error type.

mod error;

pub use error::WaqtError;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// The six daily time points, in chronological order.
///
/// `Shoroq` (sunrise) is carried for display only and is never a prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    #[serde(alias = "Sunrise")]
    Shoroq,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    /// All time points in chronological order.
    pub const ALL: [PrayerName; 6] = [
        PrayerName::Fajr,
        PrayerName::Shoroq,
        PrayerName::Dhuhr,
        PrayerName::Asr,
        PrayerName::Maghrib,
        PrayerName::Isha,
    ];

    /// False only for `Shoroq`.
    pub fn is_prayer(&self) -> bool {
        !matches!(self, PrayerName::Shoroq)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Shoroq => "Shoroq",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }

    /// Key used by timetable providers (`Sunrise` for `Shoroq`).
    pub fn provider_key(&self) -> &'static str {
        match self {
            PrayerName::Shoroq => "Sunrise",
            other => other.as_str(),
        }
    }

    /// Arabic label shown next to the time.
    pub fn arabic(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "الفجر",
            PrayerName::Shoroq => "الشروق",
            PrayerName::Dhuhr => "الظهر",
            PrayerName::Asr => "العصر",
            PrayerName::Maghrib => "المغرب",
            PrayerName::Isha => "العشاء",
        }
    }
}

impl fmt::Display for PrayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrayerName {
    type Err = WaqtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PrayerName::ALL
            .into_iter()
            .find(|name| {
                name.as_str().eq_ignore_ascii_case(trimmed)
                    || name.provider_key().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| WaqtError::UnknownPrayer(trimmed.to_string()))
    }
}

/// A named instant within one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrayerTimePoint {
    pub name: PrayerName,
    /// Wall-clock time of day, minute resolution.
    pub time: NaiveTime,
    /// Resolved instant the calculator compares against.
    pub timestamp: DateTime<Utc>,
}

impl PrayerTimePoint {
    /// Creates a point, truncating `time` to whole minutes.
    pub fn new(name: PrayerName, time: NaiveTime, timestamp: DateTime<Utc>) -> Self {
        let time = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self { name, time, timestamp }
    }

    /// `HH:mm` label.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Same point with `timestamp` advanced by exactly 24 hours.
    ///
    /// Saturates at the largest representable instant.
    pub fn rolled_over(&self) -> Self {
        Self {
            timestamp: self
                .timestamp
                .checked_add_signed(Duration::days(1))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            ..*self
        }
    }
}

/// Non-negative time remaining until a target instant.
///
/// Hours are not wrapped into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CountdownDuration {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl CountdownDuration {
    pub const ZERO: CountdownDuration = CountdownDuration { hours: 0, minutes: 0, seconds: 0 };

    /// Decomposes whole seconds into hours/minutes/seconds.
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: ((total % 3600) / 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Saturates at `u64::MAX` for out-of-range `hours`.
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for CountdownDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Every time point for one calendar day.
///
/// Replaced wholesale when the day, city or country changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub points: SmallVec<[PrayerTimePoint; 6]>,
}

impl DaySchedule {
    pub fn new(date: NaiveDate, points: impl IntoIterator<Item = PrayerTimePoint>) -> Self {
        Self {
            date,
            points: points.into_iter().collect(),
        }
    }

    /// First point with the given name.
    pub fn get(&self, name: PrayerName) -> Option<&PrayerTimePoint> {
        self.points.iter().find(|p| p.name == name)
    }

    pub fn as_slice(&self) -> &[PrayerTimePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PrayerTimePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<'a> IntoIterator for &'a DaySchedule {
    type Item = &'a PrayerTimePoint;
    type IntoIter = std::slice::Iter<'a, PrayerTimePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// One request for a day's timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimetableQuery {
    pub city: String,
    pub country: String,
    pub date: NaiveDate,
    /// Provider calculation method (2 = ISNA).
    pub method: u8,
    /// Asr juristic school (0 = Shafi'i, 1 = Hanafi).
    pub school: u8,
}
