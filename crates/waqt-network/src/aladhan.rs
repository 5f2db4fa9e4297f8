//! Aladhan timetable client.
//!
//! Fetches a single day's timings from `GET /v1/timingsByCity` and maps
//! them into a [`DaySchedule`].

use crate::provider::TimetableProvider;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{debug, warn};
use waqt_types::{DaySchedule, PrayerName, TimetableQuery, WaqtError};

/// Public Aladhan API host.
pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com";

/// Aladhan API response envelope.
#[derive(Debug, Deserialize)]
struct TimingsResponse {
    code: u16,
    status: String,
    data: TimingsData,
}

#[derive(Debug, Deserialize)]
struct TimingsData {
    timings: Timings,
    date: ApiDate,
}

/// Times as returned by the API. Extra keys (Imsak, Midnight, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Timings {
    pub fajr: Option<String>,
    pub sunrise: Option<String>,
    pub dhuhr: Option<String>,
    pub asr: Option<String>,
    pub maghrib: Option<String>,
    pub isha: Option<String>,
}

impl Timings {
    fn get(&self, name: PrayerName) -> Option<&str> {
        let value = match name {
            PrayerName::Fajr => &self.fajr,
            PrayerName::Shoroq => &self.sunrise,
            PrayerName::Dhuhr => &self.dhuhr,
            PrayerName::Asr => &self.asr,
            PrayerName::Maghrib => &self.maghrib,
            PrayerName::Isha => &self.isha,
        };
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiDate {
    readable: String,
}

/// Maps provider timings for `date` into a schedule in chronological key order.
///
/// Missing or blank timings are skipped; malformed ones are an error.
pub fn map_timings(date: NaiveDate, tz: Tz, timings: &Timings) -> Result<DaySchedule, WaqtError> {
    let entries = PrayerName::ALL
        .into_iter()
        .filter_map(|name| timings.get(name).map(|raw| (name, raw)));
    waqt_schedule::resolve_day_schedule(date, tz, entries)
}

/// HTTP client for the Aladhan `timingsByCity` endpoint.
#[derive(Debug, Clone)]
pub struct AladhanClient {
    http: reqwest::Client,
    base_url: String,
}

impl AladhanClient {
    /// Client against the public API.
    ///
    /// # Errors
    /// Returns `NetworkError` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, WaqtError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against another host, e.g. a mirror or a test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, WaqtError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("waqt/", env!("CARGO_PKG_VERSION"), " (prayer time widget)"))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| WaqtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the raw timings for `query`.
    ///
    /// # Errors
    /// `NetworkError` for transport failures, 5xx and 429 responses;
    /// `ProviderError` for other rejected requests, unparsable bodies and a
    /// non-200 `code`.
    pub async fn fetch_timings(&self, query: &TimetableQuery) -> Result<Timings, WaqtError> {
        let url = format!("{}/v1/timingsByCity", self.base_url);
        let date = query.date.format("%d-%m-%Y").to_string();
        let method = query.method.to_string();
        let school = query.school.to_string();

        debug!(city = %query.city, country = %query.country, %date, "requesting timings");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("city", query.city.as_str()),
                ("country", query.country.as_str()),
                ("method", method.as_str()),
                ("school", school.as_str()),
                ("date", date.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WaqtError::NetworkError(format!("Aladhan request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, city = %query.city, "timings request rejected");
            let message = format!("HTTP {}: {}", status, body.trim());
            // 4xx means the query itself is wrong; asking again will not help.
            return Err(if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                WaqtError::NetworkError(message)
            } else {
                WaqtError::ProviderError(message)
            });
        }

        let data: TimingsResponse = response
            .json()
            .await
            .map_err(|e| WaqtError::ProviderError(format!("Failed to parse Aladhan response: {}", e)))?;

        if data.code != 200 {
            warn!(code = data.code, status = %data.status, "timings response not OK");
            return Err(WaqtError::ProviderError(format!(
                "Invalid API response: code {} ({})",
                data.code, data.status
            )));
        }

        debug!(readable = %data.data.date.readable, "timings received");
        Ok(data.data.timings)
    }
}

impl TimetableProvider for AladhanClient {
    async fn fetch_day(&self, query: &TimetableQuery, tz: Tz) -> Result<DaySchedule, WaqtError> {
        let timings = self.fetch_timings(query).await?;
        map_timings(query.date, tz, &timings)
    }
}
