//! Departure time handling.
//!
//! HAFAS provides departure times as RFC 3339 strings carrying the offset of
//! the backend's local zone. Display times are always rendered in
//! Europe/Vienna as two-digit 24-hour "HH:MM", which is what `de-AT`
//! formatting produces.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// The zone all corridor times are rendered in.
pub const CORRIDOR_TZ: Tz = chrono_tz::Europe::Vienna;

/// Placeholder for a departure without a usable scheduled time.
pub const NOT_AVAILABLE: &str = "N/A";

/// Error returned when parsing an invalid timestamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

/// Parse a timestamp into Vienna local time.
///
/// Accepts RFC 3339 with any offset. A timestamp without an offset is taken
/// to be Vienna wall-clock time already.
///
/// # Examples
///
/// ```
/// use corridor_fetcher::domain::parse_departure_time;
///
/// let t = parse_departure_time("2025-07-27T08:17:00Z").unwrap();
/// assert_eq!(t.format("%H:%M").to_string(), "10:17");
///
/// assert!(parse_departure_time("soon").is_err());
/// ```
pub fn parse_departure_time(s: &str) -> Result<DateTime<Tz>, TimeError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant.with_timezone(&CORRIDOR_TZ));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| TimeError {
            input: s.to_string(),
            reason: "expected RFC 3339 timestamp",
        })?;

    CORRIDOR_TZ
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimeError {
            input: s.to_string(),
            reason: "local time does not exist in Europe/Vienna",
        })
}

/// Format a time as "HH:MM" in the corridor zone.
pub fn format_hhmm(time: &DateTime<Tz>) -> String {
    time.with_timezone(&CORRIDOR_TZ).format("%H:%M").to_string()
}

/// Scheduled time of day for display, or `None` if unparseable.
pub fn local_hhmm(s: &str) -> Option<String> {
    parse_departure_time(s).ok().map(|t| format_hhmm(&t))
}

/// Time of day after applying a delay in seconds.
///
/// `None` if the time is unparseable or the delay is out of range.
pub fn delayed_hhmm(s: &str, delay_secs: i64) -> Option<String> {
    let scheduled = parse_departure_time(s).ok()?;
    let actual = scheduled.checked_add_signed(Duration::try_seconds(delay_secs)?)?;
    Some(format_hhmm(&actual))
}
