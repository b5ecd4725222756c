//! Mock timetable source for testing without API access.
//!
//! Serves canned location searches and departure boards, either built in
//! code or loaded from a directory of JSON files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use super::client::parse_departures;
use super::error::HafasError;
use super::source::TimetableSource;
use super::types::{Location, RawDeparture};

/// A canned response: data, or an HTTP status to fail with.
#[derive(Debug, Clone)]
enum Canned<T> {
    Ok(T),
    Fail(u16),
}

impl<T: Clone> Canned<T> {
    fn get(&self) -> Result<T, HafasError> {
        match self {
            Canned::Ok(value) => Ok(value.clone()),
            Canned::Fail(status) => Err(HafasError::Api {
                status: *status,
                message: "mock failure".to_string(),
            }),
        }
    }
}

/// Mock timetable source that serves pre-loaded data.
///
/// Unknown queries return no locations; unknown stations return no
/// departures.
#[derive(Debug, Default)]
pub struct MockTimetable {
    locations: HashMap<String, Canned<Vec<Location>>>,
    departures: HashMap<String, Canned<Vec<RawDeparture>>>,
    calls: Mutex<Vec<String>>,
}

impl MockTimetable {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `locations` for the given search query.
    pub fn with_locations(mut self, query: &str, locations: Vec<Location>) -> Self {
        self.locations
            .insert(query.to_string(), Canned::Ok(locations));
        self
    }

    /// Fail searches for `query` with the given HTTP status.
    pub fn with_failing_locations(mut self, query: &str, status: u16) -> Self {
        self.locations
            .insert(query.to_string(), Canned::Fail(status));
        self
    }

    /// Serve `departures` for the given station id.
    pub fn with_departures(mut self, station_id: &str, departures: Vec<RawDeparture>) -> Self {
        self.departures
            .insert(station_id.to_string(), Canned::Ok(departures));
        self
    }

    /// Fail departure requests for `station_id` with the given HTTP status.
    pub fn with_failing_departures(mut self, station_id: &str, status: u16) -> Self {
        self.departures
            .insert(station_id.to_string(), Canned::Fail(status));
        self
    }

    /// Load mock data from a directory.
    ///
    /// Expects `locations.json` (an object mapping queries to location
    /// lists) and `departures/{station_id}.json` files in any shape the
    /// departures endpoint produces.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, HafasError> {
        let data_dir = data_dir.as_ref();
        let mut mock = Self::new();

        let locations_path = data_dir.join("locations.json");
        let json = std::fs::read_to_string(&locations_path).map_err(|e| {
            HafasError::MockData(format!("Failed to read {:?}: {}", locations_path, e))
        })?;
        let by_query: HashMap<String, Vec<Location>> =
            serde_json::from_str(&json).map_err(|e| HafasError::Json {
                message: format!("Failed to parse {:?}: {}", locations_path, e),
                body: None,
            })?;
        for (query, locations) in by_query {
            mock.locations.insert(query, Canned::Ok(locations));
        }

        let departures_dir = data_dir.join("departures");
        let entries = std::fs::read_dir(&departures_dir).map_err(|e| {
            HafasError::MockData(format!("Failed to read {:?}: {}", departures_dir, e))
        })?;

        for entry in entries {
            let path = entry
                .map_err(|e| {
                    HafasError::MockData(format!("Failed to read directory entry: {}", e))
                })?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(station_id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let body = std::fs::read_to_string(&path)
                .map_err(|e| HafasError::MockData(format!("Failed to read {:?}: {}", path, e)))?;
            let departures = parse_departures(&body)?;
            mock.departures
                .insert(station_id.to_string(), Canned::Ok(departures));
        }

        Ok(mock)
    }

    /// Requests made so far, as `locations:{query}` / `departures:{id}`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl TimetableSource for MockTimetable {
    async fn locations(&self, query: &str, results: u8) -> Result<Vec<Location>, HafasError> {
        self.record(format!("locations:{query}"));
        match self.locations.get(query) {
            Some(canned) => canned
                .get()
                .map(|found| found.into_iter().take(results as usize).collect()),
            None => Ok(Vec::new()),
        }
    }

    async fn departures(
        &self,
        station_id: &str,
        _duration_mins: u32,
        results: u32,
    ) -> Result<Vec<RawDeparture>, HafasError> {
        self.record(format!("departures:{station_id}"));
        match self.departures.get(station_id) {
            Some(canned) => canned
                .get()
                .map(|found| found.into_iter().take(results as usize).collect()),
            None => Ok(Vec::new()),
        }
    }
}
