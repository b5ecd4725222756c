//! HAFAS REST API response DTOs.
//!
//! These types map directly to the JSON returned by a `hafas-rest-api`
//! instance. They use `Option` liberally because HAFAS omits fields (or sends
//! `null`) whenever the backend has no data for them.

use serde::{Deserialize, Serialize};

/// A result of the `/locations` search.
///
/// Searches can return stops, stations, addresses and points of interest.
/// Addresses carry no id, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Location {
    /// Location type (`station`, `stop`, `location`).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// HAFAS station id (e.g. "1130603").
    pub id: Option<String>,

    /// Human-readable name.
    pub name: Option<String>,
}

/// A single departure as returned by `/stops/{id}/departures`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDeparture {
    /// Trip id, stable for the lifetime of the trip.
    pub trip_id: Option<String>,

    /// Prognosed departure time (RFC 3339), includes the delay.
    pub when: Option<String>,

    /// Scheduled departure time (RFC 3339).
    pub planned_when: Option<String>,

    /// Delay in seconds. Negative for early departures.
    pub delay: Option<i64>,

    /// Prognosed platform.
    pub platform: Option<String>,

    /// Scheduled platform.
    pub planned_platform: Option<String>,

    /// Free-text headsign.
    pub direction: Option<String>,

    /// Final stop of the trip.
    pub destination: Option<StopRef>,

    /// Line serving this departure.
    pub line: Option<Line>,

    /// Whether this departure is cancelled.
    pub cancelled: Option<bool>,
}

impl RawDeparture {
    /// Scheduled departure time, falling back to the prognosed one.
    pub fn scheduled_time(&self) -> Option<&str> {
        self.planned_when.as_deref().or(self.when.as_deref())
    }

    /// Destination stop name, if present.
    pub fn destination_name(&self) -> Option<&str> {
        self.destination.as_ref().and_then(|d| d.name.as_deref())
    }

    /// Line name, if present.
    pub fn line_name(&self) -> Option<&str> {
        self.line.as_ref().and_then(|l| l.name.as_deref())
    }

    /// Line mode (`train`, `bus`, ...), if present.
    pub fn line_mode(&self) -> Option<&str> {
        self.line.as_ref().and_then(|l| l.mode.as_deref())
    }

    /// Platform, falling back to the scheduled platform.
    pub fn platform(&self) -> Option<&str> {
        self.platform
            .as_deref()
            .or(self.planned_platform.as_deref())
    }
}

/// Reference to a stop inside a departure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StopRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Line information attached to a departure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Line {
    /// Display name (e.g. "REX 3").
    pub name: Option<String>,

    /// Transport mode (`train`, `bus`, `watercraft`, ...).
    pub mode: Option<String>,

    /// Product category (`regional`, `suburban`, `bus`, ...).
    pub product: Option<String>,
}

/// Response from the departures endpoint.
///
/// Older `hafas-rest-api` releases return a bare array; newer ones wrap it in
/// an object alongside `realtimeDataUpdatedAt`. Both occur in the wild.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeparturesResponse {
    List(Vec<RawDeparture>),
    Wrapped {
        #[serde(default)]
        departures: Option<Vec<RawDeparture>>,
    },
}

impl DeparturesResponse {
    /// Flatten either shape into a list. A missing list is empty.
    pub fn into_departures(self) -> Vec<RawDeparture> {
        match self {
            DeparturesResponse::List(departures) => departures,
            DeparturesResponse::Wrapped { departures } => departures.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_list() {
        let json = r#"[{"tripId": "1|2", "plannedWhen": "2025-07-27T10:17:00+02:00", "line": {"name": "REX 3", "mode": "train"}}]"#;
        let response: DeparturesResponse = serde_json::from_str(json).unwrap();
        let departures = response.into_departures();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].line_name(), Some("REX 3"));
        assert_eq!(departures[0].line_mode(), Some("train"));
    }

    #[test]
    fn parses_wrapped_object() {
        let json = r#"{"departures": [{"direction": "Wien Hbf"}], "realtimeDataUpdatedAt": 1753603879}"#;
        let response: DeparturesResponse = serde_json::from_str(json).unwrap();
        let departures = response.into_departures();
        assert_eq!(departures.len(), 1);
        assert_eq!(departures[0].direction.as_deref(), Some("Wien Hbf"));
    }

    #[test]
    fn object_without_list_is_empty() {
        let response: DeparturesResponse =
            serde_json::from_str(r#"{"realtimeDataUpdatedAt": null}"#).unwrap();
        assert!(response.into_departures().is_empty());

        let response: DeparturesResponse =
            serde_json::from_str(r#"{"departures": null}"#).unwrap();
        assert!(response.into_departures().is_empty());
    }

    #[test]
    fn scheduled_time_falls_back_to_when() {
        let dep = RawDeparture {
            when: Some("2025-07-27T10:19:00+02:00".into()),
            ..Default::default()
        };
        assert_eq!(dep.scheduled_time(), Some("2025-07-27T10:19:00+02:00"));

        let dep = RawDeparture {
            when: Some("2025-07-27T10:19:00+02:00".into()),
            planned_when: Some("2025-07-27T10:17:00+02:00".into()),
            ..Default::default()
        };
        assert_eq!(dep.scheduled_time(), Some("2025-07-27T10:17:00+02:00"));
    }

    #[test]
    fn platform_falls_back_to_planned() {
        let dep = RawDeparture {
            planned_platform: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(dep.platform(), Some("2"));
    }

    #[test]
    fn null_fields_deserialize_as_none() {
        let json = r#"{"when": null, "delay": null, "platform": null, "line": null, "cancelled": null}"#;
        let dep: RawDeparture = serde_json::from_str(json).unwrap();
        assert!(dep.when.is_none());
        assert!(dep.delay.is_none());
        assert!(dep.line_name().is_none());
        assert!(dep.cancelled.is_none());
    }

    #[test]
    fn location_with_type_field() {
        let json = r#"{"type": "stop", "id": "1130603", "name": "Bad Vöslau Bahnhof"}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.kind.as_deref(), Some("stop"));
        assert_eq!(loc.id.as_deref(), Some("1130603"));
    }
}
