//! Fetch pipeline error types.

use crate::hafas::HafasError;
use crate::snapshot::SnapshotError;

/// Errors from resolving, fetching and persisting corridor departures.
///
/// `NoStationsFound` and `Upstream` only ever end one direction's pipeline;
/// the others end the whole run.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The location search returned no usable candidate
    #[error("no stations found for {query:?}")]
    NoStationsFound { query: String },

    /// The timetable source failed
    #[error("upstream fetch failed: {0}")]
    Upstream(#[from] HafasError),

    /// The snapshot could not be written
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Neither direction produced a single departure
    #[error("no departures found in either direction")]
    BothDirectionsEmpty,
}
