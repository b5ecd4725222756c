//! Process configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use crate::fetch::FetchConfig;
use crate::hafas::{DEFAULT_BASE_URL, HafasConfig};

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_SNAPSHOT_PATH: &str = "departures.json";

/// Error returned for an unusable environment value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: {message}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    message: String,
}

/// Everything the binary needs to run once.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Timetable API client settings.
    pub hafas: HafasConfig,

    /// Departure board request settings.
    pub fetch: FetchConfig,

    /// Where the snapshot is written.
    pub snapshot_path: PathBuf,

    /// Serve timetable data from this directory instead of the API.
    pub mock_data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// | Variable                  | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HAFAS_BASE_URL`          | `http://localhost:3000` |
    /// | `HAFAS_TIMEOUT_SECS`      | `30`                    |
    /// | `SNAPSHOT_PATH`           | `departures.json`       |
    /// | `DEPARTURE_DURATION_MINS` | `120`                   |
    /// | `DEPARTURE_RESULTS`       | `30`                    |
    /// | `MOCK_DATA_DIR`           | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let base_url = get("HAFAS_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut hafas = HafasConfig::new(base_url);
        if let Some(secs) = parse_var(&get, "HAFAS_TIMEOUT_SECS")? {
            hafas = hafas.with_timeout(secs);
        }

        let defaults = FetchConfig::default();
        let fetch = FetchConfig::new(
            parse_var(&get, "DEPARTURE_DURATION_MINS")?.unwrap_or(defaults.duration_mins),
            parse_var(&get, "DEPARTURE_RESULTS")?.unwrap_or(defaults.results),
        );

        let snapshot_path = get("SNAPSHOT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));

        Ok(Self {
            hafas,
            fetch,
            snapshot_path,
            mock_data_dir: get("MOCK_DATA_DIR").map(PathBuf::from),
        })
    }
}

fn parse_var<T>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(var)
        .map(|value| {
            value.trim().parse().map_err(|e: T::Err| ConfigError {
                var,
                value: value.clone(),
                message: e.to_string(),
            })
        })
        .transpose()
}
