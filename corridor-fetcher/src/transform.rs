//! Conversion from HAFAS departures to output records.
//!
//! The record layout and its short field names are what the display layer
//! reads, so they are fixed.

use serde::{Deserialize, Serialize};

use crate::domain::{NOT_AVAILABLE, delayed_hhmm, local_hhmm};
use crate::hafas::RawDeparture;

/// Placeholder for a missing destination or line name.
pub const UNKNOWN: &str = "Unknown";

/// Realtime override of a departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realtime {
    /// Delayed time of day, `None` if there was no scheduled time to shift.
    pub dlt: Option<String>,
}

/// A departure as written to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDeparture {
    /// Scheduled time of day ("HH:MM") or "N/A".
    pub ti: String,

    /// Destination name.
    pub st: String,

    /// Line name.
    pub pr: String,

    /// Platform, empty if unknown.
    pub tr: String,

    /// Realtime data. Absent, not null, when the train runs on time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rt: Option<Realtime>,

    /// Corridor direction label.
    #[serde(default)]
    pub direction: String,

    /// Delay in seconds.
    #[serde(default)]
    pub delay: i64,

    #[serde(default)]
    pub cancelled: bool,
}

impl NormalizedDeparture {
    /// Whether the record carries a realtime override.
    pub fn is_delayed(&self) -> bool {
        self.rt.is_some()
    }
}

/// Normalize a filtered departure for output.
///
/// `label` is the corridor direction the departure was kept for.
pub fn normalize(departure: &RawDeparture, label: &str) -> NormalizedDeparture {
    let scheduled = departure.scheduled_time();
    let delay = departure.delay.unwrap_or(0);

    let ti = scheduled
        .and_then(local_hhmm)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let rt = (delay != 0).then(|| Realtime {
        dlt: scheduled.and_then(|s| delayed_hhmm(s, delay)),
    });

    NormalizedDeparture {
        ti,
        st: departure
            .destination_name()
            .unwrap_or(UNKNOWN)
            .to_string(),
        pr: departure.line_name().unwrap_or(UNKNOWN).to_string(),
        tr: departure.platform().unwrap_or_default().to_string(),
        rt,
        direction: label.to_string(),
        delay,
        cancelled: departure.cancelled.unwrap_or(false),
    }
}

/// Normalize a list of departures, keeping order.
pub fn normalize_all(departures: &[RawDeparture], label: &str) -> Vec<NormalizedDeparture> {
    departures.iter().map(|d| normalize(d, label)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hafas::{Line, StopRef};

    fn departure(planned: Option<&str>, delay: Option<i64>) -> RawDeparture {
        RawDeparture {
            planned_when: planned.map(str::to_string),
            delay,
            destination: Some(StopRef {
                id: Some("1291501".into()),
                name: Some("Wien Hbf".into()),
            }),
            platform: Some("2".into()),
            line: Some(Line {
                name: Some("REX 3".into()),
                mode: Some("train".into()),
                product: Some("regional".into()),
            }),
            cancelled: Some(false),
            ..Default::default()
        }
    }

    #[test]
    fn on_time_departure_has_no_realtime_key() {
        let dep = departure(Some("2025-07-27T10:47:00+02:00"), Some(0));
        let record = normalize(&dep, "Wien Hauptbahnhof");
        assert_eq!(record.ti, "10:47");
        assert!(record.rt.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("rt").is_none());
        assert_eq!(json["delay"], 0);
    }

    #[test]
    fn missing_delay_defaults_to_zero() {
        let record = normalize(&departure(Some("2025-07-27T10:47:00+02:00"), None), "x");
        assert_eq!(record.delay, 0);
        assert!(!record.is_delayed());
    }

    #[test]
    fn delayed_departure() {
        let dep = departure(Some("2025-07-27T10:17:00+02:00"), Some(120));
        let record = normalize(&dep, "Wien Hauptbahnhof");
        assert_eq!(record.ti, "10:17");
        assert_eq!(record.delay, 120);
        assert_eq!(
            record.rt,
            Some(Realtime {
                dlt: Some("10:19".into())
            })
        );
    }

    #[test]
    fn early_departure_keeps_realtime() {
        let record = normalize(&departure(Some("2025-07-27T10:17:00+02:00"), Some(-60)), "x");
        assert_eq!(record.rt.unwrap().dlt.as_deref(), Some("10:16"));
    }

    #[test]
    fn delay_without_time_has_null_dlt() {
        let record = normalize(&departure(None, Some(300)), "x");
        assert_eq!(record.ti, NOT_AVAILABLE);
        assert_eq!(record.rt, Some(Realtime { dlt: None }));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["rt"]["dlt"].is_null());
    }

    #[test]
    fn unparseable_time_is_not_available() {
        let record = normalize(&departure(Some("garbage"), None), "x");
        assert_eq!(record.ti, NOT_AVAILABLE);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let record = normalize(&RawDeparture::default(), "Bad Vöslau");
        assert_eq!(record.ti, NOT_AVAILABLE);
        assert_eq!(record.st, UNKNOWN);
        assert_eq!(record.pr, UNKNOWN);
        assert_eq!(record.tr, "");
        assert!(record.rt.is_none());
        assert_eq!(record.direction, "Bad Vöslau");
        assert_eq!(record.delay, 0);
        assert!(!record.cancelled);
    }

    #[test]
    fn cancelled_flag_copied() {
        let mut dep = departure(Some("2025-07-27T10:17:00+02:00"), None);
        dep.cancelled = Some(true);
        assert!(normalize(&dep, "x").cancelled);
    }

    #[test]
    fn serialized_field_names() {
        let dep = departure(Some("2025-07-27T10:17:00+02:00"), Some(120));
        let record = normalize(&dep, "Wien Hauptbahnhof");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ti"], "10:17");
        assert_eq!(json["st"], "Wien Hbf");
        assert_eq!(json["pr"], "REX 3");
        assert_eq!(json["tr"], "2");
        assert_eq!(json["rt"]["dlt"], "10:19");
        assert_eq!(json["direction"], "Wien Hauptbahnhof");
        assert_eq!(json["delay"], 120);
        assert_eq!(json["cancelled"], false);
    }

    #[test]
    fn normalize_all_keeps_order() {
        let deps = vec![
            departure(Some("2025-07-27T10:17:00+02:00"), None),
            departure(Some("2025-07-27T09:47:00+02:00"), None),
        ];
        let records = normalize_all(&deps, "x");
        let times: Vec<_> = records.iter().map(|r| r.ti.as_str()).collect();
        assert_eq!(times, vec!["10:17", "09:47"]);
    }

    #[test]
    fn deserializes_display_layer_records() {
        let json =
            r#"{"ti": "10:47", "st": "Wien Hauptbahnhof", "pr": "REX 3 (Zug-Nr. 19224)", "tr": "1"}"#;
        let record: NormalizedDeparture = serde_json::from_str(json).unwrap();
        assert_eq!(record.delay, 0);
        assert!(record.rt.is_none());
        assert!(!record.cancelled);
    }
}
