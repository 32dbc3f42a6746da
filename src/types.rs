//! Core types for race-results-dl
//!
//! Configuration-side types ([`Event`]) and the payloads returned by the
//! event-results API. Payload structs only require the keys the pipeline
//! cannot do without; everything else is optional so that a sparse race does
//! not abort a whole event.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;

/// Identifier of an event or race
///
/// The API emits identifiers as JSON numbers for some endpoints and strings
/// for others, and numeric ids exceed `i64` in practice. Strings are kept
/// verbatim; numbers are kept exactly up to `u64::MAX`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// Create an id from its textual form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the textual form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Number(n) => Self(n.to_string()),
        })
    }
}

/// An event to download, as listed in the configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event id on the results API
    pub id: ResourceId,
    /// Display name, copied into every row's `event_name`
    pub name: String,
    /// Edition year (informational)
    #[serde(default)]
    pub year: Option<u16>,
}

/// `GET /events/{id}/races` payload
#[derive(Clone, Debug, Deserialize)]
pub struct RaceList {
    /// Races of the event, in API order
    pub races: Option<Vec<RaceSummary>>,
}

/// One entry of [`RaceList`]
#[derive(Clone, Debug, Deserialize)]
pub struct RaceSummary {
    /// Race id
    pub id: ResourceId,
    /// Race name (used for progress output only)
    #[serde(default)]
    pub name: String,
}

/// `GET .../classifications/search` payload
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPage {
    /// Race metadata; absent for races without published results
    #[serde(default)]
    pub event_race: Option<EventRace>,
    /// Athlete results on this page
    #[serde(default)]
    pub full_classifications: Option<Vec<FullClassification>>,
}

/// Wrapper around the race metadata
#[derive(Clone, Debug, Deserialize)]
pub struct EventRace {
    /// Race details
    #[serde(default)]
    pub race: Option<RaceDetails>,
}

/// Descriptive metadata of a race
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceDetails {
    /// Race distance in meters
    #[serde(default)]
    pub distance_in_meter: Option<Number>,
    /// Race name as published
    #[serde(default)]
    pub name: Option<String>,
    /// ISO-8601 start timestamp
    #[serde(default)]
    pub date: Option<String>,
}

/// One athlete entry on a classification page
#[derive(Clone, Debug, Deserialize)]
pub struct FullClassification {
    /// The athlete's result
    pub classification: Classification,
}

/// An athlete's result for one race
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Athlete name (hashed before it leaves the pipeline)
    pub name: String,
    /// Age/gender category
    #[serde(default)]
    pub category: Option<String>,
    /// Time from gun start, in seconds
    #[serde(default)]
    pub gun_time_in_sec: Option<Number>,
    /// Time from mat crossing, in seconds
    #[serde(default)]
    pub chip_time_in_sec: Option<Number>,
    /// Intermediate timing points, in course order
    #[serde(default)]
    pub splits: Vec<Split>,
}

/// Intermediate timing point
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// Timing point name (e.g., "5K")
    pub name: String,
    /// Elapsed time since race start, `HH:MM:SS`
    #[serde(default)]
    pub cumulative_time: Option<String>,
}

/// Race-level values copied into every row of a race
#[derive(Clone, Debug, PartialEq)]
pub struct RaceInfo {
    /// Race distance in meters, verbatim from the API
    pub distance: Number,
    /// Lower-cased race name with spaces replaced by underscores
    pub race: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl RaceInfo {
    /// Extract race metadata from the first page of a race
    ///
    /// Returns `None` when any of distance, name or date is missing.
    pub fn from_page(page: &ClassificationPage) -> Option<Self> {
        let details = page.event_race.as_ref()?.race.as_ref()?;
        let distance = details.distance_in_meter.clone()?;
        let race = details.name.as_deref()?.to_lowercase().replace(' ', "_");
        let date = details.date.as_deref()?.chars().take(10).collect();

        Some(Self {
            distance,
            race,
            date,
        })
    }
}
