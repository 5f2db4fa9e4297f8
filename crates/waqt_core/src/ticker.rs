//! One-second countdown driver.
//!
//! Owns the interval timer and the day refresh, and publishes a fresh
//! [`WidgetState`] through a `watch` channel on every tick. The calculator
//! stays a plain function; all timer and subscription lifecycle lives here.

use crate::board::PrayerBoard;
use crate::clock::Clock;
use crate::config::WidgetConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use waqt_network::{CachedTimetable, TimetableProvider};
use waqt_types::{DaySchedule, WaqtError};

/// Wait before asking the provider again after a transient failure.
pub const REFRESH_RETRY_SECS: i64 = 30;

/// Wait after a failure that retrying soon will not fix (unknown city,
/// malformed timings).
pub const REFRESH_RETRY_PERMANENT_SECS: i64 = 600;

/// What the widget shows: the board plus load status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Last successfully loaded day, evaluated at the latest tick.
    pub board: Option<PrayerBoard>,
    /// A refresh is in flight.
    pub loading: bool,
    /// Error from the most recent refresh; cleared on success.
    pub last_error: Option<WaqtError>,
}

impl WidgetState {
    /// Loaded day in the provider's readable form, e.g. `10 Jan 2025`.
    pub fn current_date(&self) -> Option<String> {
        self.board
            .as_ref()
            .map(|b| b.schedule.date.format("%d %b %Y").to_string())
    }

    /// Nothing loaded and the last attempt failed.
    pub fn is_failed(&self) -> bool {
        self.board.is_none() && !self.loading && self.last_error.is_some()
    }
}

/// Handle to a running countdown task. Dropping it stops the task.
#[derive(Debug)]
pub struct CountdownTicker {
    receiver: watch::Receiver<WidgetState>,
    task: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawns the ticker on the current tokio runtime.
    pub fn spawn<P, C>(config: WidgetConfig, timetable: CachedTimetable<P>, clock: C) -> Self
    where
        P: TimetableProvider + Send + Sync + 'static,
        C: Clock + 'static,
    {
        let (sender, receiver) = watch::channel(WidgetState { loading: true, ..Default::default() });
        let task = tokio::spawn(run(config, timetable, clock, sender));
        Self { receiver, task }
    }

    /// Receiver that sees every published state.
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.receiver.clone()
    }

    /// Latest published state.
    pub fn state(&self) -> WidgetState {
        self.receiver.borrow().clone()
    }

    /// Most recent board, if any day has loaded yet.
    pub fn current(&self) -> Option<PrayerBoard> {
        self.receiver.borrow().board.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the task.
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn retry_delay(error: &WaqtError) -> Duration {
    if error.is_transient() {
        Duration::seconds(REFRESH_RETRY_SECS)
    } else {
        Duration::seconds(REFRESH_RETRY_PERMANENT_SECS)
    }
}

async fn run<P, C>(
    config: WidgetConfig,
    mut timetable: CachedTimetable<P>,
    clock: C,
    sender: watch::Sender<WidgetState>,
) where
    P: TimetableProvider + Send + Sync,
    C: Clock,
{
    let mut interval = tokio::time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut schedule: Option<DaySchedule> = None;
    let mut retry_at: Option<DateTime<Utc>> = None;

    info!(city = %config.city, country = %config.country, tz = %config.timezone, "countdown ticker started");

    loop {
        interval.tick().await;
        let now = clock.now();
        let today = config.today(now);

        let stale = schedule.as_ref().is_none_or(|s| s.date != today);
        let may_retry = retry_at.is_none_or(|at| now >= at);

        if stale && may_retry {
            sender.send_modify(|state| state.loading = true);
            match timetable.schedule_for(&config.query_for(today), config.timezone).await {
                Ok(day) => {
                    info!(date = %day.date, points = day.len(), "loaded prayer schedule");
                    schedule = Some(day);
                    retry_at = None;
                    sender.send_modify(|state| state.last_error = None);
                }
                Err(e) => {
                    let delay = retry_delay(&e);
                    warn!(error = %e, date = %today, retry_in = delay.num_seconds(), "failed to refresh prayer schedule");
                    retry_at = Some(now + delay);
                    sender.send_modify(|state| state.last_error = Some(e));
                }
            }
        }

        let board = schedule.as_ref().map(|day| PrayerBoard::evaluate(day.clone(), now));
        if let Some(board) = &board {
            debug!(next = ?board.next.map(|p| p.name), countdown = ?board.countdown, "tick");
        }
        sender.send_modify(|state| {
            state.loading = false;
            if board.is_some() {
                state.board = board;
            }
        });
    }
}
