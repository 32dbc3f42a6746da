//! Mock results API and payload builders

use race_results_dl::{Config, Event, Salt};
use serde_json::{Value, json};
use std::path::Path;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Salt used by every integration test
pub const TEST_SECRET: &str = "integration-salt";

/// Config pointing at `server`, with every output under `dir`
pub fn config_for(server: &MockServer, dir: &Path, events: Vec<Event>) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.salt = Salt::from_secret(TEST_SECRET);
    config.output.cache_dir = dir.join("cached_responses");
    config.output.race_dir = dir.join("data_single_race");
    config.output.combined_csv = dir.join("data").join("race_results").join("results.csv");
    config.events = events;
    config
}

/// Event helper
pub fn event(id: &str, name: &str) -> Event {
    Event {
        id: id.into(),
        name: name.into(),
        year: Some(2019),
    }
}

/// Serve the race list of `event_id`
pub async fn mount_races(server: &MockServer, event_id: &str, races: &[(&str, &str)]) {
    let races: Vec<Value> = races
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/api/events/{event_id}/races")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "races": races })))
        .mount(server)
        .await;
}

/// Serve one classification page
pub async fn mount_page(
    server: &MockServer,
    event_id: &str,
    race_id: &str,
    offset: usize,
    body: Value,
) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/events/{event_id}/races/{race_id}/classifications/search"
        )))
        .and(query_param("count", "50"))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Classification page for a race with the given athlete names
pub fn classification_page(race: &str, distance: u64, date: &str, athletes: &[String]) -> Value {
    let entries: Vec<Value> = athletes
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let category = if i % 2 == 0 { "M" } else { "W" };
            let finish = format!("00:30:{:02}", i % 60);
            json!({
                "classification": {
                    "name": name,
                    "category": category,
                    "gunTimeInSec": 1800 + i,
                    "chipTimeInSec": 1790 + i,
                    "splits": [
                        {"name": "Half", "cumulativeTime": "00:15:00"},
                        {"name": "Finish", "cumulativeTime": finish}
                    ]
                }
            })
        })
        .collect();

    json!({
        "eventRace": {
            "race": {"distanceInMeter": distance, "name": race, "date": date}
        },
        "fullClassifications": entries
    })
}

/// `count` athlete names starting at `first`
pub fn names(first: usize, count: usize) -> Vec<String> {
    (first..first + count).map(|i| format!("Runner {i}")).collect()
}

/// Number of classification requests the server received
pub async fn classification_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path().ends_with("/classifications/search"))
        .count()
}

/// Parse a CSV file into header and records
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let text = std::fs::read_to_string(path).unwrap();
    let mut lines = text.lines();
    let header = lines
        .next()
        .unwrap()
        .split(',')
        .map(String::from)
        .collect();
    let rows = lines
        .map(|l| l.split(',').map(String::from).collect())
        .collect();
    (header, rows)
}

/// Value of `column` in `row`
pub fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let idx = header
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("no column {column}"));
    &row[idx]
}
