//! Network module for remote timetable fetching.
//!
//! Provides the Aladhan timetable client and the per-day schedule cache
//! that keeps the widget to one lookup per (city, country, date).

pub mod aladhan;
pub mod cache;
pub mod provider;

pub use aladhan::AladhanClient;
pub use cache::{CachedSchedule, ScheduleCache, ScheduleKey};
pub use provider::{CachedTimetable, TimetableProvider};
