//! Per-day schedule cache.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use tracing::debug;
use waqt_types::{DaySchedule, TimetableQuery};

/// Cache key: one schedule per city, country, calendar date and
/// calculation settings.
///
/// City and country are compared case-insensitively. Method and school are
/// part of the key so timetables sharing one cache never serve each other's
/// times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub city: String,
    pub country: String,
    pub date: NaiveDate,
    pub method: u8,
    pub school: u8,
}

impl ScheduleKey {
    pub fn new(city: &str, country: &str, date: NaiveDate, method: u8, school: u8) -> Self {
        Self {
            city: city.trim().to_lowercase(),
            country: country.trim().to_lowercase(),
            date,
            method,
            school,
        }
    }
}

impl From<&TimetableQuery> for ScheduleKey {
    fn from(query: &TimetableQuery) -> Self {
        Self::new(&query.city, &query.country, query.date, query.method, query.school)
    }
}

/// A fetched day and when it was fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSchedule {
    pub schedule: DaySchedule,
    pub fetched_at: DateTime<Utc>,
}

/// Explicit, injectable schedule cache.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    entries: HashMap<ScheduleKey, CachedSchedule>,
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ScheduleKey) -> Option<&CachedSchedule> {
        self.entries.get(key)
    }

    /// Stores a day, replacing any previous list for the same key wholesale.
    pub fn insert(&mut self, key: ScheduleKey, schedule: DaySchedule, fetched_at: DateTime<Utc>) {
        debug!(city = %key.city, country = %key.country, date = %key.date, "caching schedule");
        self.entries.insert(key, CachedSchedule { schedule, fetched_at });
    }

    /// Drops every day strictly before `date`. Returns how many were removed.
    pub fn prune_before(&mut self, date: NaiveDate) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| key.date >= date);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
