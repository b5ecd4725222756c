//! Snapshot document types.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::transform::NormalizedDeparture;

/// The stations each direction departed from.
///
/// A station is `None` when its direction failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stations {
    pub bad_voeslau: Option<Station>,
    pub wien_hbf: Option<Station>,
}

/// The JSON document written on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Departures from Bad Vöslau towards Vienna.
    pub bad_voeslau_to_wien: Vec<NormalizedDeparture>,

    /// Departures from Wien Hbf towards Bad Vöslau.
    pub wien_to_bad_voeslau: Vec<NormalizedDeparture>,

    /// Generation time, ISO 8601 UTC with milliseconds.
    pub last_updated: String,

    pub stations: Stations,
}

impl Snapshot {
    /// Assemble a snapshot generated at `generated_at`.
    pub fn new(
        bad_voeslau_to_wien: Vec<NormalizedDeparture>,
        wien_to_bad_voeslau: Vec<NormalizedDeparture>,
        stations: Stations,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            bad_voeslau_to_wien,
            wien_to_bad_voeslau,
            last_updated: format_timestamp(generated_at),
            stations,
        }
    }

    /// Total departures across both directions.
    pub fn total_departures(&self) -> usize {
        self.bad_voeslau_to_wien.len() + self.wien_to_bad_voeslau.len()
    }

    /// Whether both directions are empty.
    pub fn is_empty(&self) -> bool {
        self.total_departures() == 0
    }

    /// Parsed `lastUpdated`, if present and valid.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// How long ago the snapshot was generated.
    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_updated_at().map(|t| now - t)
    }

    /// Whether the snapshot is older than `max_age`.
    ///
    /// A snapshot without a valid timestamp is always stale.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.age(now) {
            Some(age) => age > max_age,
            None => true,
        }
    }
}

/// Format a timestamp the way `Date.prototype.toISOString` does.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 27, 8, 11, 19).unwrap() + Duration::milliseconds(908)
    }

    fn record(ti: &str) -> NormalizedDeparture {
        NormalizedDeparture {
            ti: ti.into(),
            st: "Wien Hauptbahnhof".into(),
            pr: "REX 3".into(),
            tr: "1".into(),
            rt: None,
            direction: "Wien Hauptbahnhof".into(),
            delay: 0,
            cancelled: false,
        }
    }

    #[test]
    fn timestamp_format() {
        assert_eq!(format_timestamp(generated_at()), "2025-07-27T08:11:19.908Z");
    }

    #[test]
    fn serialized_keys() {
        let snapshot = Snapshot::new(
            vec![record("10:47")],
            vec![],
            Stations {
                bad_voeslau: Some(Station::new("1130603", "Bad Vöslau")),
                wien_hbf: None,
            },
            generated_at(),
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["badVoeslauToWien"].as_array().unwrap().len(), 1);
        assert!(json["wienToBadVoeslau"].as_array().unwrap().is_empty());
        assert_eq!(json["lastUpdated"], "2025-07-27T08:11:19.908Z");
        assert_eq!(json["stations"]["badVoeslau"]["id"], "1130603");
        assert!(json["stations"]["wienHbf"].is_null());
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = Snapshot::new(vec![], vec![], Stations::default(), generated_at());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.total_departures(), 0);
    }

    #[test]
    fn staleness() {
        let snapshot = Snapshot::new(
            vec![record("10:47")],
            vec![],
            Stations::default(),
            generated_at(),
        );
        let now = generated_at() + Duration::minutes(30);

        assert_eq!(snapshot.age(now), Some(Duration::minutes(30)));
        assert!(!snapshot.is_stale(now, Duration::minutes(60)));
        assert!(!snapshot.is_stale(now, Duration::minutes(30)));
        assert!(snapshot.is_stale(now, Duration::minutes(29)));
    }

    #[test]
    fn timestamp_with_offset() {
        let mut snapshot = Snapshot::new(vec![], vec![], Stations::default(), generated_at());
        snapshot.last_updated = "2025-07-27T10:11:19+02:00".into();
        assert_eq!(
            snapshot.last_updated_at(),
            Some(Utc.with_ymd_and_hms(2025, 7, 27, 8, 11, 19).unwrap())
        );
    }

    #[test]
    fn invalid_or_missing_timestamp_is_stale() {
        let mut snapshot = Snapshot::new(vec![], vec![], Stations::default(), generated_at());
        let now = generated_at();

        snapshot.last_updated = String::new();
        assert!(snapshot.is_stale(now, Duration::minutes(60)));
        assert!(snapshot.age(now).is_none());

        snapshot.last_updated = "invalid-timestamp".into();
        assert!(snapshot.is_stale(now, Duration::minutes(60)));
    }
}
