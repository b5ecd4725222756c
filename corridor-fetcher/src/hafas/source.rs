//! The timetable source abstraction.

use super::error::HafasError;
use super::types::{Location, RawDeparture};

/// Trait for querying a timetable backend.
///
/// This abstraction allows the fetch pipeline to be tested with mock data.
#[allow(async_fn_in_trait)]
pub trait TimetableSource {
    /// Search for locations matching a free-text query.
    ///
    /// `results` is a hint for how many candidates to return.
    async fn locations(&self, query: &str, results: u8) -> Result<Vec<Location>, HafasError>;

    /// Get upcoming departures at a station.
    ///
    /// Returns at most `results` departures within the next `duration_mins`.
    async fn departures(
        &self,
        station_id: &str,
        duration_mins: u32,
        results: u32,
    ) -> Result<Vec<RawDeparture>, HafasError>;
}
