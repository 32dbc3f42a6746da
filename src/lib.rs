//! # race-results-dl
//!
//! Batch extraction of race results from an event-results API into
//! anonymized CSV tables.
//!
//! A run walks every configured event, lists its races, pages through each
//! race's classifications 50 at a time and flattens every athlete into one
//! row. Athlete names are replaced by a salted BLAKE2b hash so that rows of
//! the same athlete can still be grouped within a run. Each race is written
//! to its own CSV and everything is written once more to a combined CSV.
//!
//! Responses come from a pluggable [`DataSource`](source::DataSource): the
//! live HTTP API, or JSON snapshots cached by an earlier live run.
//!
//! ## Quick Start
//!
//! ```no_run
//! use race_results_dl::{Config, ResultsFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::from_file("race-results.json")?;
//!     config.apply_env_with(|key| std::env::var(key).ok());
//!
//!     let fetcher = ResultsFetcher::new(&config)?;
//!     let summary = fetcher.fetch_events().await?;
//!     println!("{} rows -> {}", summary.rows, summary.combined_csv.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Athlete name anonymization
pub mod anonymize;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Event, race and classification fetching
pub mod fetcher;
/// Live and cached API response sources
pub mod source;
/// Split time parsing
pub mod splits;
/// Output rows and CSV rendering
pub mod table;
/// API payloads and identifiers
pub mod types;

// Re-export commonly used types
pub use anonymize::{NameHasher, Salt};
pub use config::{Config, SourceMode};
pub use error::{Error, Result};
pub use fetcher::{PAGE_SIZE, ResultsFetcher, RunSummary};
pub use splits::SplitTimePolicy;
pub use table::AthleteRow;
pub use types::{Event, ResourceId};

/// Build a fetcher from `config` and run every configured event
///
/// Equivalent to [`ResultsFetcher::new`] followed by
/// [`ResultsFetcher::fetch_events`].
pub async fn run(config: &Config) -> Result<RunSummary> {
    ResultsFetcher::new(config)?.fetch_events().await
}
