//! Snapshot the widget renders each tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waqt_schedule::{select_next_prayer, time_until};
use waqt_types::{CountdownDuration, DaySchedule, PrayerName, PrayerTimePoint};

/// The day's times plus the next prayer and its countdown at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerBoard {
    pub schedule: DaySchedule,
    pub next: Option<PrayerTimePoint>,
    pub countdown: Option<CountdownDuration>,
    pub evaluated_at: DateTime<Utc>,
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardRow {
    pub name: PrayerName,
    pub arabic: &'static str,
    pub time: String,
    pub is_next: bool,
}

impl PrayerBoard {
    /// Evaluates `schedule` at `now`. Pure.
    pub fn evaluate(schedule: DaySchedule, now: DateTime<Utc>) -> Self {
        let next = select_next_prayer(schedule.as_slice(), now);
        let countdown = next.map(|p| time_until(p.timestamp, now));
        Self {
            schedule,
            next,
            countdown,
            evaluated_at: now,
        }
    }

    /// Rows in schedule order, with the next prayer flagged.
    pub fn rows(&self) -> Vec<BoardRow> {
        let next_name = self.next.map(|p| p.name);
        self.schedule
            .iter()
            .map(|p| BoardRow {
                name: p.name,
                arabic: p.name.arabic(),
                time: p.time_label(),
                is_next: Some(p.name) == next_name,
            })
            .collect()
    }

    /// True when the next prayer is tomorrow's Fajr.
    pub fn is_rolled_over(&self) -> bool {
        match (self.next, self.schedule.get(PrayerName::Fajr)) {
            (Some(next), Some(fajr)) => next.name == PrayerName::Fajr && next.timestamp > fajr.timestamp,
            _ => false,
        }
    }
}
