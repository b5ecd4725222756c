//! The per-run fetch pipeline.
//!
//! Each direction runs resolve → fetch → filter → normalize on its own. The
//! two directions are awaited together and settle independently: a failing
//! direction contributes an empty list and a `null` station, and never
//! cancels the other.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::corridor::{CorridorConfig, DirectionConfig, resolve_station};
use crate::domain::Station;
use crate::error::FetchError;
use crate::hafas::TimetableSource;
use crate::snapshot::{Snapshot, Stations};
use crate::transform::{NormalizedDeparture, normalize_all};

use super::config::FetchConfig;

/// Result of one direction's pipeline.
#[derive(Debug, Clone)]
pub struct DirectionOutcome {
    /// Station the departures were fetched for.
    pub station: Station,

    /// Departures that passed the filter, normalized.
    pub departures: Vec<NormalizedDeparture>,

    /// Departures returned by the upstream before filtering.
    pub upstream_count: usize,
}

/// Runs the corridor pipelines against a timetable source.
pub struct Fetcher<'a, S> {
    source: &'a S,
    corridor: &'a CorridorConfig,
    config: &'a FetchConfig,
}

impl<'a, S: TimetableSource> Fetcher<'a, S> {
    /// Create a new fetcher.
    pub fn new(source: &'a S, corridor: &'a CorridorConfig, config: &'a FetchConfig) -> Self {
        Self {
            source,
            corridor,
            config,
        }
    }

    /// Run one direction's pipeline.
    pub async fn fetch_direction(
        &self,
        direction: &DirectionConfig,
    ) -> Result<DirectionOutcome, FetchError> {
        let station = resolve_station(self.source, &direction.station).await?;

        let raw = self
            .source
            .departures(&station.id, self.config.duration_mins, self.config.results)
            .await?;
        let upstream_count = raw.len();

        let kept = direction.filter.apply(raw);
        let departures = normalize_all(&kept, &direction.label);

        info!(
            direction = %direction.direction,
            %station,
            upstream = upstream_count,
            kept = departures.len(),
            "direction fetched"
        );

        Ok(DirectionOutcome {
            station,
            departures,
            upstream_count,
        })
    }

    /// Run both directions concurrently and assemble the snapshot.
    ///
    /// Never fails: direction errors are logged and leave that direction
    /// empty.
    pub async fn fetch_snapshot(&self, generated_at: DateTime<Utc>) -> Snapshot {
        let (outbound, inbound) = tokio::join!(
            self.fetch_direction(&self.corridor.outbound),
            self.fetch_direction(&self.corridor.inbound)
        );

        let (bad_voeslau_to_wien, bad_voeslau) = settle(&self.corridor.outbound, outbound);
        let (wien_to_bad_voeslau, wien_hbf) = settle(&self.corridor.inbound, inbound);

        Snapshot::new(
            bad_voeslau_to_wien,
            wien_to_bad_voeslau,
            Stations {
                bad_voeslau,
                wien_hbf,
            },
            generated_at,
        )
    }

    /// Fetch, write the snapshot to `output`, and check the result.
    ///
    /// The file is written even when both directions are empty; the run
    /// then still fails with [`FetchError::BothDirectionsEmpty`].
    pub async fn run(&self, output: &Path) -> Result<Snapshot, FetchError> {
        let snapshot = self.fetch_snapshot(Utc::now()).await;
        snapshot.write(output)?;

        info!(
            path = %output.display(),
            outbound = snapshot.bad_voeslau_to_wien.len(),
            inbound = snapshot.wien_to_bad_voeslau.len(),
            "snapshot written"
        );

        if snapshot.is_empty() {
            return Err(FetchError::BothDirectionsEmpty);
        }

        Ok(snapshot)
    }
}

/// Split a settled direction into its departures and station.
fn settle(
    direction: &DirectionConfig,
    result: Result<DirectionOutcome, FetchError>,
) -> (Vec<NormalizedDeparture>, Option<Station>) {
    match result {
        Ok(outcome) => (outcome.departures, Some(outcome.station)),
        Err(e) => {
            warn!(direction = %direction.direction, error = %e, "direction failed");
            (Vec::new(), None)
        }
    }
}
