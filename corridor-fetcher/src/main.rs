use std::process::ExitCode;

use chrono::{Duration, Utc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use corridor_fetcher::config::AppConfig;
use corridor_fetcher::corridor::CorridorConfig;
use corridor_fetcher::fetch::Fetcher;
use corridor_fetcher::hafas::{HafasClient, MockTimetable, TimetableSource};
use corridor_fetcher::snapshot::Snapshot;

/// Age after which the previous snapshot is reported as stale.
const STALE_AFTER_MINS: i64 = 60;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    let corridor = CorridorConfig::bad_voeslau_wien()?;

    report_previous(&config);

    match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving timetable data from mock directory");
            let source = MockTimetable::from_dir(dir)?;
            fetch(&source, &corridor, &config).await
        }
        None => {
            let source = HafasClient::new(config.hafas.clone())?;
            info!(base_url = %source.base_url(), "fetching from timetable API");
            fetch(&source, &corridor, &config).await
        }
    }
}

async fn fetch<S: TimetableSource>(
    source: &S,
    corridor: &CorridorConfig,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = Fetcher::new(source, corridor, &config.fetch);
    let snapshot = fetcher.run(&config.snapshot_path).await?;

    info!(
        departures = snapshot.total_departures(),
        last_updated = %snapshot.last_updated,
        "fetch complete"
    );
    Ok(())
}

/// Log the state of the snapshot about to be replaced.
fn report_previous(config: &AppConfig) {
    match Snapshot::load(&config.snapshot_path) {
        Ok(Some(previous)) => {
            let now = Utc::now();
            let age = previous.age(now).map(|age| age.num_minutes());
            if previous.is_stale(now, Duration::minutes(STALE_AFTER_MINS)) {
                warn!(age_mins = ?age, "replacing stale snapshot");
            } else {
                info!(
                    age_mins = ?age,
                    departures = previous.total_departures(),
                    "replacing snapshot"
                );
            }
        }
        Ok(None) => info!(path = %config.snapshot_path.display(), "no previous snapshot"),
        Err(e) => warn!(error = %e, "previous snapshot unreadable"),
    }
}
