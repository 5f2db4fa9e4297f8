//! WASM bindings for Waqt - prayer time widget engine
//!
//! Lets the browser widget pick the next prayer and drive its countdown
//! without reimplementing the rules in JavaScript. Instants cross the
//! boundary as epoch milliseconds (`Date.getTime()`).

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use waqt_core::{
    resolve_day_schedule, CountdownDuration, DaySchedule, PrayerBoard, PrayerName, PrayerTimePoint,
};

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Picks the next prayer from an array of points.
///
/// # Example (JavaScript)
/// ```js
/// const next = nextPrayer([
///   { name: "Fajr", time: "05:41", timestampMs: fajr.getTime() },
///   { name: "Dhuhr", time: "12:14", timestampMs: dhuhr.getTime() },
/// ], Date.now());
/// console.log(next?.name);
/// ```
#[wasm_bindgen(js_name = nextPrayer)]
pub fn next_prayer(points: JsValue, now_ms: f64) -> Result<JsValue, JsValue> {
    let points: Vec<WasmPrayerPoint> = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid prayer points: {}", e)))?;
    let next = next_from_points(&points, now_ms).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&next).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Countdown from `now_ms` to `target_ms`, never negative.
#[wasm_bindgen(js_name = timeUntil)]
pub fn time_until(target_ms: f64, now_ms: f64) -> Result<JsValue, JsValue> {
    let countdown = countdown_between(target_ms, now_ms).map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&countdown).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Class-based API holding one day's schedule.
///
/// # Example (JavaScript)
/// ```js
/// const widget = new PrayerWidget(response.data.timings, "2025-01-10", "Europe/Copenhagen");
/// setInterval(() => render(widget.board(Date.now())), 1000);
/// ```
#[wasm_bindgen]
pub struct PrayerWidget {
    schedule: DaySchedule,
}

#[wasm_bindgen]
impl PrayerWidget {
    /// Builds the day from a provider timings object (`{ Fajr: "05:41", Sunrise: ... }`).
    #[wasm_bindgen(constructor)]
    pub fn new(timings: JsValue, date_str: &str, timezone: &str) -> Result<PrayerWidget, JsValue> {
        console_error_panic_hook::set_once();
        let timings: HashMap<String, String> = serde_wasm_bindgen::from_value(timings)
            .map_err(|e| JsValue::from_str(&format!("Invalid timings object: {}", e)))?;
        let schedule = schedule_from_timings(&timings, date_str, timezone).map_err(|e| JsValue::from_str(&e))?;
        Ok(PrayerWidget { schedule })
    }

    /// The day's points in display order.
    pub fn points(&self) -> Result<JsValue, JsValue> {
        let points: Vec<WasmPrayerPoint> = self.schedule.iter().map(WasmPrayerPoint::from).collect();
        serde_wasm_bindgen::to_value(&points).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Snapshot to render at `now_ms`.
    pub fn board(&self, now_ms: f64) -> Result<JsValue, JsValue> {
        let now = instant_from_ms(now_ms).map_err(|e| JsValue::from_str(&e))?;
        let board = WasmBoard::from(PrayerBoard::evaluate(self.schedule.clone(), now));
        serde_wasm_bindgen::to_value(&board).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// WASM-friendly prayer time point for TypeScript generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerPoint {
    pub name: String,
    #[serde(default)]
    pub arabic: String,
    pub time: String,
    pub timestamp_ms: f64,
}

impl From<&PrayerTimePoint> for WasmPrayerPoint {
    fn from(point: &PrayerTimePoint) -> Self {
        Self {
            name: point.name.to_string(),
            arabic: point.name.arabic().to_string(),
            time: point.time_label(),
            timestamp_ms: point.timestamp.timestamp_millis() as f64,
        }
    }
}

impl TryFrom<&WasmPrayerPoint> for PrayerTimePoint {
    type Error = String;

    fn try_from(point: &WasmPrayerPoint) -> Result<Self, Self::Error> {
        let name: PrayerName = point.name.parse().map_err(|e: waqt_core::WaqtError| e.to_string())?;
        let time = waqt_core::parse_wall_clock(&point.time).map_err(|e| e.to_string())?;
        let timestamp = instant_from_ms(point.timestamp_ms)?;
        Ok(PrayerTimePoint::new(name, time, timestamp))
    }
}

/// WASM-friendly countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct WasmCountdown {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
}

impl From<CountdownDuration> for WasmCountdown {
    fn from(c: CountdownDuration) -> Self {
        Self {
            hours: u32::try_from(c.hours).unwrap_or(u32::MAX),
            minutes: c.minutes,
            seconds: c.seconds,
        }
    }
}

/// WASM-friendly board snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmBoard {
    pub date: String,
    pub points: Vec<WasmPrayerPoint>,
    pub next: Option<WasmPrayerPoint>,
    pub countdown: Option<WasmCountdown>,
    pub countdown_label: Option<String>,
}

impl From<PrayerBoard> for WasmBoard {
    fn from(board: PrayerBoard) -> Self {
        Self {
            date: board.schedule.date.format("%Y-%m-%d").to_string(),
            points: board.schedule.iter().map(WasmPrayerPoint::from).collect(),
            next: board.next.as_ref().map(WasmPrayerPoint::from),
            countdown: board.countdown.map(WasmCountdown::from),
            countdown_label: board.countdown.map(|c| c.to_string()),
        }
    }
}

fn instant_from_ms(ms: f64) -> Result<DateTime<Utc>, String> {
    if !ms.is_finite() {
        return Err(format!("Invalid timestamp: {}", ms));
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64).ok_or_else(|| format!("Timestamp out of range: {}", ms))
}

fn next_from_points(points: &[WasmPrayerPoint], now_ms: f64) -> Result<Option<WasmPrayerPoint>, String> {
    let now = instant_from_ms(now_ms)?;
    let points = points
        .iter()
        .map(PrayerTimePoint::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(waqt_core::select_next_prayer(&points, now).as_ref().map(WasmPrayerPoint::from))
}

fn countdown_between(target_ms: f64, now_ms: f64) -> Result<WasmCountdown, String> {
    let target = instant_from_ms(target_ms)?;
    let now = instant_from_ms(now_ms)?;
    Ok(waqt_core::time_until(target, now).into())
}

fn schedule_from_timings(timings: &HashMap<String, String>, date_str: &str, timezone: &str) -> Result<DaySchedule, String> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| format!("Invalid date format: {}", e))?;
    let tz: Tz = timezone.parse().map_err(|_| format!("Unknown timezone {:?}", timezone))?;

    let entries = PrayerName::ALL.into_iter().filter_map(|name| {
        timings
            .get(name.provider_key())
            .or_else(|| timings.get(name.as_str()))
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
            .map(|raw| (name, raw))
    });
    resolve_day_schedule(date, tz, entries).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ms(h: u32, m: u32) -> f64 {
        Utc.with_ymd_and_hms(2025, 1, 10, h, m, 0).unwrap().timestamp_millis() as f64
    }

    fn timings() -> HashMap<String, String> {
        [("Fajr", "05:41"), ("Sunrise", "08:39"), ("Dhuhr", "12:14"), ("Imsak", "05:31"), ("Maghrib", "")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_schedule_from_timings_maps_sunrise_and_skips_blank() {
        let schedule = schedule_from_timings(&timings(), "2025-01-10", "Europe/Copenhagen").unwrap();
        let names: Vec<_> = schedule.iter().map(|p| p.name).collect();
        assert_eq!(names, [PrayerName::Fajr, PrayerName::Shoroq, PrayerName::Dhuhr]);
    }

    #[test]
    fn test_schedule_from_timings_rejects_bad_input() {
        assert!(schedule_from_timings(&timings(), "10/01/2025", "Europe/Copenhagen").is_err());
        assert!(schedule_from_timings(&timings(), "2025-01-10", "Nowhere/City").is_err());
    }

    #[test]
    fn test_next_from_points() {
        let points = vec![
            WasmPrayerPoint { name: "Fajr".into(), arabic: String::new(), time: "05:41".into(), timestamp_ms: ms(5, 41) },
            WasmPrayerPoint { name: "Shoroq".into(), arabic: String::new(), time: "08:39".into(), timestamp_ms: ms(8, 39) },
            WasmPrayerPoint { name: "Dhuhr".into(), arabic: String::new(), time: "12:14".into(), timestamp_ms: ms(12, 14) },
        ];

        let next = next_from_points(&points, ms(7, 0)).unwrap().unwrap();
        assert_eq!(next.name, "Dhuhr");
        assert_eq!(next.arabic, "الظهر");

        let rolled = next_from_points(&points, ms(23, 0)).unwrap().unwrap();
        assert_eq!(rolled.name, "Fajr");
        assert_eq!(rolled.timestamp_ms, ms(5, 41) + 86_400_000.0);

        assert_eq!(next_from_points(&[], ms(7, 0)).unwrap(), None);
    }

    #[test]
    fn test_next_from_points_rejects_unknown_name() {
        let points = vec![WasmPrayerPoint { name: "Duha".into(), arabic: String::new(), time: "09:00".into(), timestamp_ms: ms(9, 0) }];
        assert!(next_from_points(&points, ms(7, 0)).is_err());
    }

    #[test]
    fn test_countdown_between() {
        let c = countdown_between(ms(1, 1) + 1_000.0, ms(0, 0)).unwrap();
        assert_eq!((c.hours, c.minutes, c.seconds), (1, 1, 1));
        let zero = countdown_between(ms(0, 0), ms(1, 0)).unwrap();
        assert_eq!((zero.hours, zero.minutes, zero.seconds), (0, 0, 0));
        assert!(countdown_between(f64::NAN, ms(0, 0)).is_err());
    }

    #[test]
    fn test_board_conversion() {
        let schedule = schedule_from_timings(&timings(), "2025-01-10", "Europe/Copenhagen").unwrap();
        let now = instant_from_ms(ms(9, 0)).unwrap();
        let board = WasmBoard::from(PrayerBoard::evaluate(schedule, now));
        assert_eq!(board.date, "2025-01-10");
        assert_eq!(board.next.unwrap().name, "Dhuhr");
        assert_eq!(board.countdown_label.as_deref(), Some("02:14:00"));
    }
}
