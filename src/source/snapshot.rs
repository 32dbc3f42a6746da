//! Offline replay of cached responses

use super::traits::{ApiRequest, DataSource};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads responses previously cached by [`HttpSource`](super::HttpSource)
pub struct SnapshotSource {
    dir: PathBuf,
}

impl SnapshotSource {
    /// Replay snapshots from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot file backing `request`
    pub fn path_for(&self, request: &ApiRequest) -> PathBuf {
        self.dir.join(request.snapshot_name())
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    async fn fetch(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        let path = self.path_for(request);
        debug!(path = %path.display(), "Reading cached response");

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::SnapshotMissing { path });
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }

    fn name(&self) -> &'static str {
        "snapshot"
    }
}

/// Store `value` as the cached response for `request` (pretty-printed JSON)
pub(crate) async fn write_snapshot(
    dir: &Path,
    request: &ApiRequest,
    value: &serde_json::Value,
) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(request.snapshot_name());
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(&path, json).await?;
    debug!(path = %path.display(), "Cached response");
    Ok(())
}
