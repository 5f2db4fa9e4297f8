//! Timetable provider seam and the caching wrapper around it.

use crate::cache::{ScheduleCache, ScheduleKey};
use chrono::Utc;
use chrono_tz::Tz;
use std::future::Future;
use tracing::debug;
use waqt_types::{DaySchedule, TimetableQuery, WaqtError};

/// Source of one day's prayer times.
pub trait TimetableProvider {
    /// Fetches the day named by `query`, resolving wall-clock times in `tz`.
    fn fetch_day(
        &self,
        query: &TimetableQuery,
        tz: Tz,
    ) -> impl Future<Output = Result<DaySchedule, WaqtError>> + Send;
}

/// Provider wrapped with a [`ScheduleCache`].
///
/// Fetches at most once per [`ScheduleKey`]; a new key triggers a
/// fresh lookup, anything else is served from the cache.
#[derive(Debug)]
pub struct CachedTimetable<P> {
    provider: P,
    cache: ScheduleCache,
}

impl<P: TimetableProvider> CachedTimetable<P> {
    pub fn new(provider: P) -> Self {
        Self::with_cache(provider, ScheduleCache::new())
    }

    pub fn with_cache(provider: P, cache: ScheduleCache) -> Self {
        Self { provider, cache }
    }

    /// Returns the schedule for `query`, fetching it on a cache miss.
    ///
    /// Days before the requested one are evicted after a successful fetch.
    ///
    /// # Errors
    /// Propagates provider failures; nothing is cached on error.
    pub async fn schedule_for(&mut self, query: &TimetableQuery, tz: Tz) -> Result<DaySchedule, WaqtError> {
        let key = ScheduleKey::from(query);
        if let Some(hit) = self.cache.get(&key) {
            debug!(city = %key.city, date = %key.date, "schedule cache hit");
            return Ok(hit.schedule.clone());
        }

        debug!(city = %key.city, date = %key.date, "schedule cache miss");
        let schedule = self.provider.fetch_day(query, tz).await?;
        self.cache.prune_before(key.date);
        self.cache.insert(key, schedule.clone(), Utc::now());
        Ok(schedule)
    }

    pub fn cache(&self) -> &ScheduleCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ScheduleCache {
        &mut self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
