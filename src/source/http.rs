//! Live results API client

use super::snapshot;
use super::traits::{ApiRequest, DataSource};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// Fetches responses from the results API over HTTP
///
/// When built with a snapshot directory, every decoded response is also
/// written there under [`ApiRequest::snapshot_name`], which is exactly what
/// [`SnapshotSource`](super::SnapshotSource) reads back.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
    snapshot_dir: Option<PathBuf>,
}

impl HttpSource {
    /// Create a client for `api`
    ///
    /// # Errors
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be created
    pub fn new(api: &ApiConfig, snapshot_dir: Option<PathBuf>) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'
        let mut base = api.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| Error::config("api.base_url", format!("invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(api.timeout)
            .user_agent(api.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url,
            snapshot_dir,
        })
    }

    /// Absolute URL of `request`, without query string
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        self.base_url
            .join(&request.path())
            .map_err(|e| Error::config("api.base_url", format!("cannot build URL: {e}")))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, request: &ApiRequest) -> Result<serde_json::Value> {
        let url = self.url_for(request)?;
        debug!(%url, query = ?request.query(), "GET");

        let response = self
            .client
            .get(url.clone())
            .query(&request.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;

        if let Some(dir) = &self.snapshot_dir {
            snapshot::write_snapshot(dir, request, &value).await?;
        }

        Ok(value)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
