//! Reading and writing the snapshot file.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::Station;
use crate::transform::NormalizedDeparture;

use super::error::SnapshotError;
use super::types::{Snapshot, Stations};

/// Snapshot as found on disk, in the current or the single-direction
/// legacy layout.
///
/// The legacy layout only tracked Bad Vöslau → Wien:
/// `{ "journey": [...], "station": {...}, "lastUpdated": "..." }`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSnapshot {
    bad_voeslau_to_wien: Option<Vec<NormalizedDeparture>>,
    wien_to_bad_voeslau: Option<Vec<NormalizedDeparture>>,
    last_updated: Option<String>,
    stations: Option<Stations>,

    journey: Option<Vec<NormalizedDeparture>>,
    station: Option<Station>,
}

impl From<StoredSnapshot> for Snapshot {
    fn from(stored: StoredSnapshot) -> Self {
        let mut stations = stored.stations.unwrap_or_default();
        if stations.bad_voeslau.is_none() {
            stations.bad_voeslau = stored.station;
        }

        Snapshot {
            bad_voeslau_to_wien: stored
                .bad_voeslau_to_wien
                .or(stored.journey)
                .unwrap_or_default(),
            wien_to_bad_voeslau: stored.wien_to_bad_voeslau.unwrap_or_default(),
            last_updated: stored.last_updated.unwrap_or_default(),
            stations,
        }
    }
}

impl Snapshot {
    /// Serialize with 2-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot, replacing any existing file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            departures = self.total_departures(),
            "snapshot written"
        );
        Ok(())
    }

    /// Load a snapshot, converting the legacy layout.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, SnapshotError> {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SnapshotError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::from_json(&contents).map(Some)
    }

    /// Parse a snapshot document, converting the legacy layout.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(SnapshotError::NotAnObject);
        }

        let stored: StoredSnapshot = serde_json::from_value(value)?;
        Ok(stored.into())
    }
}
