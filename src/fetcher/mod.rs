//! Extraction pipeline split into focused submodules.
//!
//! The [`ResultsFetcher`] methods are organized by stage:
//! - [`event`] - race list of one event
//! - [`race`] - paginated classifications of one race, flattened into rows
//!
//! [`ResultsFetcher::fetch_events`] drives both for every configured event
//! and writes the combined CSV.

mod event;
mod race;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

pub use race::build_row;

use crate::anonymize::NameHasher;
use crate::config::{Config, OutputConfig};
use crate::error::Result;
use crate::source::{self, DataSource};
use crate::splits::SplitTimePolicy;
use crate::table::{self, AthleteRow};
use crate::types::{Event, ResourceId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Number of classifications requested per page
///
/// A page with fewer entries is the last one.
pub const PAGE_SIZE: usize = 50;

/// What a full run produced
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Events processed
    pub events: usize,
    /// Per-race CSV files written, in processing order
    pub race_files: Vec<PathBuf>,
    /// Races skipped for lack of metadata
    pub races_skipped: usize,
    /// Rows in the combined table
    pub rows: usize,
    /// Combined CSV path
    pub combined_csv: PathBuf,
}

/// Per-run bookkeeping threaded through the stages
#[derive(Debug, Default)]
pub(crate) struct RunStats {
    pub(crate) race_files: Vec<PathBuf>,
    pub(crate) races_skipped: usize,
}

/// Downloads, anonymizes and tabulates race results
///
/// Everything the pipeline needs is captured at construction; the fetcher
/// never reads the environment.
pub struct ResultsFetcher {
    source: Arc<dyn DataSource>,
    hasher: NameHasher,
    output: OutputConfig,
    split_time_policy: SplitTimePolicy,
    events: Vec<Event>,
}

impl ResultsFetcher {
    /// Build a fetcher using the data source selected by `config.source`
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid (missing salt, bad
    /// base URL) or the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self> {
        let source = source::from_config(config)?;
        Self::with_source(config, source)
    }

    /// Build a fetcher around an explicit data source
    pub fn with_source(config: &Config, source: Arc<dyn DataSource>) -> Result<Self> {
        let salt = config.validate()?;
        Ok(Self {
            source,
            hasher: NameHasher::new(salt),
            output: config.output.clone(),
            split_time_policy: config.split_time_policy,
            events: config.events.clone(),
        })
    }

    /// Per-race CSV location for `event_id`/`race_id`
    pub fn race_csv_path(&self, event_id: &ResourceId, race_id: &ResourceId) -> PathBuf {
        self.output
            .race_dir
            .join(format!("{event_id}_{race_id}.csv"))
    }

    /// Fetch every configured event and write the combined CSV
    ///
    /// Events are processed in configuration order. The combined file is
    /// written once, after the last event; a failure before that leaves it
    /// untouched.
    pub async fn fetch_events(&self) -> Result<RunSummary> {
        info!(
            events = self.events.len(),
            source = self.source.name(),
            "Starting run"
        );

        let mut stats = RunStats::default();
        let mut rows: Vec<AthleteRow> = Vec::new();
        for event in &self.events {
            info!(
                event = %event.name,
                year = ?event.year,
                id = %event.id,
                "Fetching event"
            );
            let event_rows = self
                .fetch_event_tracked(&event.id, &event.name, &mut stats)
                .await?;
            rows.extend(event_rows);
        }

        let combined_csv = self.output.combined_csv.clone();
        table::write_csv(&combined_csv, &rows).await?;
        info!(rows = rows.len(), path = %combined_csv.display(), "Wrote combined results");

        Ok(RunSummary {
            events: self.events.len(),
            race_files: stats.race_files,
            races_skipped: stats.races_skipped,
            rows: rows.len(),
            combined_csv,
        })
    }
}
