//! Station resolution against the location search.

use tracing::{debug, warn};

use crate::domain::Station;
use crate::error::FetchError;
use crate::hafas::{Location, TimetableSource};

use super::config::{FallbackPolicy, StationQuery};

/// Pick a station from search candidates.
///
/// Candidates without an id or name are unusable and skipped. The first
/// usable candidate whose lowercased name contains one of the query's
/// substrings wins, even if an earlier candidate was usable. Otherwise the
/// fallback policy applies. Returns `None` only when `FirstCandidate` has
/// nothing to fall back on.
pub fn select_station(candidates: &[Location], query: &StationQuery) -> Option<Station> {
    select(candidates, query).map(|(station, _)| station)
}

/// Like [`select_station`], also reporting whether a fallback was used.
fn select(candidates: &[Location], query: &StationQuery) -> Option<(Station, bool)> {
    let usable: Vec<Station> = candidates
        .iter()
        .filter_map(|loc| match (&loc.id, &loc.name) {
            (Some(id), Some(name)) if !id.is_empty() => Some(Station::new(id, name)),
            _ => None,
        })
        .collect();

    let matched = usable.iter().find(|station| {
        let name = station.name.to_lowercase();
        query
            .name_matches
            .iter()
            .any(|needle| name.contains(needle.as_str()))
    });

    if let Some(station) = matched {
        return Some((station.clone(), false));
    }

    let fallback = match &query.fallback {
        FallbackPolicy::FirstCandidate => usable.into_iter().next(),
        FallbackPolicy::Fixed(station) => Some(station.clone()),
    };
    fallback.map(|station| (station, true))
}

/// Resolve a station by searching the timetable source.
pub async fn resolve_station<S: TimetableSource>(
    source: &S,
    query: &StationQuery,
) -> Result<Station, FetchError> {
    let candidates = source.locations(&query.query, query.results).await?;
    debug!(
        query = %query.query,
        candidates = candidates.len(),
        "location search returned"
    );

    let (station, fell_back) =
        select(&candidates, query).ok_or_else(|| FetchError::NoStationsFound {
            query: query.query.clone(),
        })?;

    if fell_back {
        warn!(query = %query.query, %station, "no search match, using fallback station");
    }

    Ok(station)
}
