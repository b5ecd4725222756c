//! The snapshot file shared with the display layer.
//!
//! One JSON document, overwritten on every run. It holds both directions'
//! departures, the stations they were fetched for, and a generation
//! timestamp.

mod error;
mod store;
mod types;

pub use error::SnapshotError;
pub use types::{Snapshot, Stations, format_timestamp};
