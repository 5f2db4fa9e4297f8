//! # Waqt
//!
//! Prayer-time scheduling for community website widgets: which prayer is
//! next, how long until it, and one timetable lookup per day.
//!
//! This crate is a facade that re-exports functionality from the `waqt` ecosystem.
//!
//! ## Modules
//!
//! - `waqt-types`: Core types (PrayerName, PrayerTimePoint, CountdownDuration, ...)
//! - `waqt-schedule`: Next-prayer selection, countdowns, wall-clock resolution
//! - `board` / `config`: Render snapshot and widget configuration
//! - `network`: Aladhan timetable client and daily cache (feature `async`)
//! - `ticker`: 1 Hz countdown driver (feature `async`)
//!
//! ## Usage
//!
//! ```rust
//! use waqt::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 1, 10, 22, 59, 0).unwrap(); // 23:59 in Copenhagen
//! let board = waqt::board_for(&WidgetConfig::default(), now, [
//!     (PrayerName::Fajr, "05:41"),
//!     (PrayerName::Maghrib, "15:49"),
//! ]).unwrap();
//!
//! assert!(board.is_rolled_over()); // tomorrow's Fajr
//! println!("{} in {}", board.next.unwrap().name, board.countdown.unwrap());
//! ```

pub use waqt_core::*;
