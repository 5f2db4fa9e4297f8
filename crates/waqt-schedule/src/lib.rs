//! Prayer schedule calculation.
//!
//! Pure, synchronous functions: pick the next prayer from a day's time
//! points, measure the countdown to it, and resolve provider wall-clock
//! strings into instants. Nothing here holds timers or performs I/O, so
//! every function is safe to call once per second from any context.

pub mod countdown;
pub mod selector;
pub mod wall_clock;

pub use countdown::time_until;
pub use selector::select_next_prayer;
pub use wall_clock::{parse_wall_clock, resolve_day_schedule, resolve_timestamp};
