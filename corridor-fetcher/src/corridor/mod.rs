//! Corridor-specific policy: which station each direction departs from and
//! which of its departures belong to the corridor.

mod config;
mod filter;
mod resolve;

pub use config::{
    CorridorConfig, DepartureFilter, Direction, DirectionConfig, FallbackPolicy,
    InvalidLinePattern, LinePattern, LineRestriction, StationQuery,
};
pub use resolve::{resolve_station, select_station};
