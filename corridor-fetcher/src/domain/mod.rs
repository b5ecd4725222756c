//! Domain types for the corridor fetcher.
//!
//! Stations as resolved against the timetable source, and the rules for
//! turning upstream timestamps into display times.

mod station;
mod time;

pub use station::Station;
pub use time::{
    CORRIDOR_TZ, NOT_AVAILABLE, TimeError, delayed_hhmm, format_hhmm, local_hhmm,
    parse_departure_time,
};
