//! Sources of results API responses
//!
//! The pagination and flattening logic never talks to the network or the
//! disk directly. It asks a [`DataSource`] for the JSON behind an
//! [`ApiRequest`]. Two implementations are provided:
//!
//! - [`HttpSource`]: queries the live API and, optionally, stores every
//!   response as a snapshot for later replay
//! - [`SnapshotSource`]: replays snapshots written by an earlier live run
//!
//! [`from_config`] picks one according to [`SourceMode`](crate::config::SourceMode).
//!
//! ```no_run
//! use race_results_dl::source::{ApiRequest, DataSource, SnapshotSource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SnapshotSource::new("cached_responses");
//! let races = source.fetch(&ApiRequest::EventRaces { event_id: "123".into() }).await?;
//! println!("{races}");
//! # Ok(())
//! # }
//! ```

mod http;
mod snapshot;
mod traits;

pub use http::HttpSource;
pub use snapshot::SnapshotSource;
pub use traits::{ApiRequest, DataSource};

use crate::config::{Config, SourceMode};
use crate::error::Result;
use std::sync::Arc;

/// Build the data source selected by `config.source`
pub fn from_config(config: &Config) -> Result<Arc<dyn DataSource>> {
    Ok(match config.source {
        SourceMode::Live => {
            let snapshots = config
                .output
                .write_snapshots
                .then(|| config.output.cache_dir.clone());
            Arc::new(HttpSource::new(&config.api, snapshots)?)
        }
        SourceMode::Offline => Arc::new(SnapshotSource::new(&config.output.cache_dir)),
    })
}
