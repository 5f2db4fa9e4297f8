//! Widget configuration.
//!
//! Defaults mirror the community site: Copenhagen, Denmark, ISNA method,
//! Shafi'i Asr, one-second countdown refresh.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use waqt_types::{TimetableQuery, WaqtError};

pub const DEFAULT_CITY: &str = "Copenhagen";
pub const DEFAULT_COUNTRY: &str = "Denmark";
/// Islamic Society of North America.
pub const DEFAULT_METHOD: u8 = 2;
/// Shafi'i.
pub const DEFAULT_SCHOOL: u8 = 0;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Copenhagen;
pub const DEFAULT_TICK_MS: u64 = 1_000;

/// Highest calculation method id the provider accepts.
pub const MAX_METHOD: u8 = 23;

/// Configuration for one prayer-time widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub city: String,
    pub country: String,
    pub method: u8,
    pub school: u8,
    /// IANA zone used for wall-clock times and the calendar date.
    pub timezone: Tz,
    /// Countdown refresh period in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            method: DEFAULT_METHOD,
            school: DEFAULT_SCHOOL,
            timezone: DEFAULT_TIMEZONE,
            tick_interval_ms: DEFAULT_TICK_MS,
        }
    }
}

impl WidgetConfig {
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::new()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Calendar date of `now` in the configured zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    /// Timetable request for `date`.
    pub fn query_for(&self, date: NaiveDate) -> TimetableQuery {
        TimetableQuery {
            city: self.city.clone(),
            country: self.country.clone(),
            date,
            method: self.method,
            school: self.school,
        }
    }
}

/// Builder with validation for `WidgetConfig`.
#[derive(Debug, Default, Clone)]
pub struct WidgetConfigBuilder {
    city: Option<String>,
    country: Option<String>,
    method: Option<u8>,
    school: Option<u8>,
    timezone: Option<Tz>,
    tick_interval_ms: Option<u64>,
}

impl WidgetConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn city(mut self, city: impl Into<String>) -> Self { self.city = Some(city.into()); self }
    pub fn country(mut self, country: impl Into<String>) -> Self { self.country = Some(country.into()); self }
    pub fn method(mut self, method: u8) -> Self { self.method = Some(method); self }
    pub fn school(mut self, school: u8) -> Self { self.school = Some(school); self }
    pub fn timezone(mut self, tz: Tz) -> Self { self.timezone = Some(tz); self }
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = Some(interval.as_millis().min(u128::from(u64::MAX)) as u64);
        self
    }

    /// Parses an IANA zone name such as `Europe/Copenhagen`.
    pub fn timezone_name(mut self, name: &str) -> Result<Self, WaqtError> {
        let tz = name
            .trim()
            .parse::<Tz>()
            .map_err(|_| WaqtError::invalid_config(format!("Unknown timezone {:?}", name)))?;
        self.timezone = Some(tz);
        Ok(self)
    }

    /// Seeds a builder from `WAQT_*` environment variables.
    ///
    /// Reads `WAQT_CITY`, `WAQT_COUNTRY`, `WAQT_METHOD`, `WAQT_SCHOOL`,
    /// `WAQT_TIMEZONE` and `WAQT_TICK_MS`; unset ones keep their defaults.
    pub fn from_env() -> Result<Self, WaqtError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, WaqtError> {
        let mut builder = Self::new();

        if let Some(city) = lookup("WAQT_CITY") {
            builder = builder.city(city);
        } else {
            info!("WAQT_CITY not set, using default: {DEFAULT_CITY}");
        }
        if let Some(country) = lookup("WAQT_COUNTRY") {
            builder = builder.country(country);
        } else {
            info!("WAQT_COUNTRY not set, using default: {DEFAULT_COUNTRY}");
        }
        if let Some(method) = lookup("WAQT_METHOD") {
            builder = builder.method(parse_var("WAQT_METHOD", &method)?);
        }
        if let Some(school) = lookup("WAQT_SCHOOL") {
            builder = builder.school(parse_var("WAQT_SCHOOL", &school)?);
        }
        if let Some(tz) = lookup("WAQT_TIMEZONE") {
            builder = builder.timezone_name(&tz)?;
        }
        if let Some(ms) = lookup("WAQT_TICK_MS") {
            builder = builder.tick_interval(Duration::from_millis(parse_var("WAQT_TICK_MS", &ms)?));
        }

        Ok(builder)
    }

    /// Builds and validates.
    pub fn build(self) -> Result<WidgetConfig, WaqtError> {
        let city = self.city.unwrap_or_else(|| DEFAULT_CITY.to_string()).trim().to_string();
        let country = self.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()).trim().to_string();
        let method = self.method.unwrap_or(DEFAULT_METHOD);
        let school = self.school.unwrap_or(DEFAULT_SCHOOL);
        let tick_interval_ms = self.tick_interval_ms.unwrap_or(DEFAULT_TICK_MS);

        if city.is_empty() {
            return Err(WaqtError::invalid_config("city must not be empty"));
        }
        if country.is_empty() {
            return Err(WaqtError::invalid_config("country must not be empty"));
        }
        if method > MAX_METHOD {
            return Err(WaqtError::invalid_config(format!(
                "Method {} outside supported range [0, {}]", method, MAX_METHOD
            )));
        }
        if school > 1 {
            return Err(WaqtError::invalid_config(format!(
                "School {} must be 0 (Shafi'i) or 1 (Hanafi)", school
            )));
        }
        if tick_interval_ms == 0 {
            return Err(WaqtError::invalid_config("tick interval must be positive"));
        }

        Ok(WidgetConfig {
            city,
            country,
            method,
            school,
            timezone: self.timezone.unwrap_or(DEFAULT_TIMEZONE),
            tick_interval_ms,
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, WaqtError>
where
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        WaqtError::invalid_config(format!("Invalid {}={:?}: {}", key, raw, e))
    })
}
