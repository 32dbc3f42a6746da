//! Request description and the data source trait

use crate::types::ResourceId;
use async_trait::async_trait;

/// A results API resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiRequest {
    /// Race list of an event
    EventRaces {
        /// Event id
        event_id: ResourceId,
    },
    /// One page of a race's classifications
    Classifications {
        /// Event id
        event_id: ResourceId,
        /// Race id
        race_id: ResourceId,
        /// Page size requested
        count: usize,
        /// Index of the first entry on the page
        offset: usize,
    },
}

impl ApiRequest {
    /// Path below the API base URL, without a leading slash
    pub fn path(&self) -> String {
        match self {
            ApiRequest::EventRaces { event_id } => format!("events/{event_id}/races"),
            ApiRequest::Classifications {
                event_id, race_id, ..
            } => format!("events/{event_id}/races/{race_id}/classifications/search"),
        }
    }

    /// Query parameters
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiRequest::EventRaces { .. } => Vec::new(),
            ApiRequest::Classifications { count, offset, .. } => vec![
                ("count", count.to_string()),
                ("offset", offset.to_string()),
            ],
        }
    }

    /// File name of the cached response
    ///
    /// Classification pages are keyed by race id and offset only; race ids
    /// are globally unique on the API.
    pub fn snapshot_name(&self) -> String {
        match self {
            ApiRequest::EventRaces { event_id } => format!("event_{event_id}.json"),
            ApiRequest::Classifications {
                race_id, offset, ..
            } => format!("race_{race_id}_{offset}.json"),
        }
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiRequest::EventRaces { event_id } => write!(f, "races of event {event_id}"),
            ApiRequest::Classifications {
                race_id, offset, ..
            } => write!(f, "race {race_id} offset {offset}"),
        }
    }
}

/// Something that can answer [`ApiRequest`]s with JSON
///
/// Implementations decide where the JSON comes from; callers only decode it.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the JSON document for `request`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails, the server answers with a
    /// non-success status, the body is not JSON, or (for replay sources) the
    /// response was never cached.
    async fn fetch(&self, request: &ApiRequest) -> crate::Result<serde_json::Value>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
