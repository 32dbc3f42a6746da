//! Shared test helpers: an in-memory data source and payload builders.

use crate::anonymize::Salt;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetcher::ResultsFetcher;
use crate::source::{ApiRequest, DataSource};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Serves canned JSON keyed by snapshot name and records every request
#[derive(Default)]
pub(crate) struct MemorySource {
    responses: HashMap<String, Value>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MemorySource {
    pub(crate) fn with(mut self, request: ApiRequest, value: Value) -> Self {
        self.responses.insert(request.snapshot_name(), value);
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataSource for MemorySource {
    async fn fetch(&self, request: &ApiRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .get(&request.snapshot_name())
            .cloned()
            .ok_or_else(|| Error::SnapshotMissing {
                path: request.snapshot_name().into(),
            })
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

pub(crate) fn races_request(event_id: &str) -> ApiRequest {
    ApiRequest::EventRaces {
        event_id: event_id.into(),
    }
}

pub(crate) fn page_request(event_id: &str, race_id: &str, offset: usize) -> ApiRequest {
    ApiRequest::Classifications {
        event_id: event_id.into(),
        race_id: race_id.into(),
        count: super::PAGE_SIZE,
        offset,
    }
}

/// `{races: [...]}` for the given `(id, name)` pairs
pub(crate) fn race_list(races: &[(&str, &str)]) -> Value {
    let races: Vec<Value> = races
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    json!({ "races": races })
}

/// An athlete entry with a finish split
pub(crate) fn athlete(name: &str, finish: &str) -> Value {
    json!({
        "classification": {
            "name": name,
            "category": "M35",
            "gunTimeInSec": 3725,
            "chipTimeInSec": 3723,
            "splits": [
                {"name": "5K", "cumulativeTime": "00:25:00"},
                {"name": "Finish", "cumulativeTime": finish}
            ]
        }
    })
}

/// A classification page with `count` generated athletes starting at `first`
pub(crate) fn page(first: usize, count: usize) -> Value {
    let entries: Vec<Value> = (first..first + count)
        .map(|i| athlete(&format!("Athlete {i}"), "01:02:03"))
        .collect();
    page_with(entries)
}

/// A classification page with race metadata and the given entries
pub(crate) fn page_with(entries: Vec<Value>) -> Value {
    json!({
        "eventRace": {
            "race": {
                "distanceInMeter": 10000,
                "name": "City 10K",
                "date": "2019-10-06T09:30:00+02:00"
            }
        },
        "fullClassifications": entries
    })
}

/// Config rooted in a fresh temp directory, with a salt
pub(crate) fn test_config() -> (Config, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.salt = Salt::from_secret("test-salt");
    config.output.cache_dir = dir.path().join("cache");
    config.output.race_dir = dir.path().join("races");
    config.output.combined_csv = dir.path().join("data").join("results.csv");
    (config, dir)
}

pub(crate) fn fetcher(config: &Config, source: MemorySource) -> (ResultsFetcher, Arc<MemorySource>) {
    let source = Arc::new(source);
    let fetcher = ResultsFetcher::with_source(config, source.clone()).unwrap();
    (fetcher, source)
}
