//! Corridor fetch pipeline.
//!
//! Resolves both corridor stations, fetches and filters their departure
//! boards concurrently, and writes the combined snapshot.

mod config;
mod fetcher;


pub use config::FetchConfig;
pub use fetcher::{DirectionOutcome, Fetcher};
