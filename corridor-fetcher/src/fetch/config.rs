//! Departure fetch configuration.

/// How much of each departure board to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Window of upcoming departures to request (minutes).
    pub duration_mins: u32,

    /// Maximum number of departures to request per station.
    pub results: u32,
}

impl FetchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(duration_mins: u32, results: u32) -> Self {
        Self {
            duration_mins,
            results,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            duration_mins: 120, // 2 hours
            results: 30,
        }
    }
}
