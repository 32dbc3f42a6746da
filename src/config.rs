//! Configuration types for race-results-dl
//!
//! [`Config`] is loaded from an optional JSON file, then overlaid with
//! environment variables (see [`Config::apply_env_with`]). The resulting value
//! is handed to [`ResultsFetcher`](crate::fetcher::ResultsFetcher) at
//! construction; nothing reads the environment afterwards.

use crate::anonymize::Salt;
use crate::error::{Error, Result};
use crate::splits::SplitTimePolicy;
use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable switching to offline replay (`true`/`1`/`yes`)
pub const ENV_OFFLINE: &str = "OFFLINE";
/// Environment variable holding the name-hashing secret
pub const ENV_SALT: &str = "SALT";
/// Environment variable overriding [`ApiConfig::base_url`]
pub const ENV_API_URL: &str = "RESULTS_API_URL";
/// Environment variable overriding [`OutputConfig::cache_dir`]
pub const ENV_CACHE_DIR: &str = "RESULTS_CACHE_DIR";
/// Environment variable moving every CSV output under one directory
pub const ENV_OUTPUT_DIR: &str = "RESULTS_OUTPUT_DIR";

/// Where API responses come from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Query the results API over HTTP
    #[default]
    Live,
    /// Replay previously cached JSON responses from disk
    Offline,
}

/// Results API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, without trailing `/events`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output locations
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory of cached JSON responses (default: "cached_responses")
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Directory of per-race CSV files (default: "data_single_race")
    #[serde(default = "default_race_dir")]
    pub race_dir: PathBuf,

    /// Combined CSV of every configured event (default: "data/race_results/results.csv")
    #[serde(default = "default_combined_csv")]
    pub combined_csv: PathBuf,

    /// Persist every live response to `cache_dir` for later offline runs (default: true)
    #[serde(default = "default_true")]
    pub write_snapshots: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            cache_dir: default_cache_dir(),
            race_dir: default_race_dir(),
            combined_csv: default_combined_csv(),
            write_snapshots: true,
        }
    }
}

impl OutputConfig {
    /// Relocate the CSV outputs under `dir`, keeping their relative layout
    pub fn rebase(&mut self, dir: &Path) {
        self.race_dir = dir.join(&self.race_dir);
        self.combined_csv = dir.join(&self.combined_csv);
    }
}

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Results API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Live HTTP or offline replay
    #[serde(default)]
    pub source: SourceMode,

    /// Handling of malformed split times
    #[serde(default)]
    pub split_time_policy: SplitTimePolicy,

    /// Events to download, in output order
    #[serde(default)]
    pub events: Vec<Event>,

    /// Name-hashing secret
    ///
    /// Never written back out; usually supplied through `SALT`.
    #[serde(default, skip_serializing)]
    pub salt: Option<Salt>,
}

impl Config {
    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            key: None,
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config {
            message: format!("invalid config {}: {}", path.display(), e),
            key: None,
        })
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_with(|key| std::env::var(key).ok());
        config
    }

    /// Overlay values from an environment lookup
    ///
    /// Unset variables leave the current value alone. Taking the lookup as a
    /// closure keeps tests independent of the process environment.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(flag) = lookup(ENV_OFFLINE) {
            self.source = if parse_flag(&flag) {
                SourceMode::Offline
            } else {
                SourceMode::Live
            };
        }
        if let Some(secret) = lookup(ENV_SALT) {
            self.salt = Salt::from_secret(&secret);
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|v| !v.is_empty()) {
            self.output.cache_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output.rebase(Path::new(&dir));
        }
    }

    /// Check the configuration and return the salt to hash with
    pub fn validate(&self) -> Result<Salt> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| Error::config("api.base_url", format!("invalid base URL: {e}")))?;

        if let Some(event) = self.events.iter().find(|e| e.id.is_blank()) {
            return Err(Error::config(
                "events",
                format!("event {:?} has an empty id", event.name),
            ));
        }

        self.salt
            .clone()
            .ok_or_else(|| Error::config("salt", format!("{ENV_SALT} is not set or empty")))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

// Default value functions
fn default_base_url() -> String {
    "https://eventresults-api.sporthive.com/api".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("race-results-dl/", env!("CARGO_PKG_VERSION")).into()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cached_responses")
}

fn default_race_dir() -> PathBuf {
    PathBuf::from("data_single_race")
}

fn default_combined_csv() -> PathBuf {
    PathBuf::from("data").join("race_results").join("results.csv")
}

fn default_true() -> bool {
    true
}

// Durations are written as whole seconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(deserializer)?))
    }
}
