//! Departure fetcher for the Bad Vöslau ↔ Wien Hauptbahnhof corridor.
//!
//! Answers one question per run: "which trains leave in the next two hours,
//! in either direction?" The result is a JSON snapshot read by a separate
//! display.

pub mod config;
pub mod corridor;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod hafas;
pub mod snapshot;
pub mod transform;
