//! HAFAS timetable source.
//!
//! This module provides an HTTP client for a `hafas-rest-api` instance
//! serving the ÖBB HAFAS backend, plus an in-memory mock.
//!
//! Key characteristics of the API:
//! - Station ids are numeric strings (e.g. "1291501" for Wien Hbf)
//! - Times are RFC 3339 with the local offset
//! - Delays are in seconds and may be `null` when no realtime data exists
//! - The departures endpoint returns either a bare list or an object with a
//!   `departures` list, depending on the server version

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HafasClient, HafasConfig};
pub use error::HafasError;
pub use mock::MockTimetable;
pub use source::TimetableSource;
pub use types::{DeparturesResponse, Line, Location, RawDeparture, StopRef};
