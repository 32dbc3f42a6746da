//! Full runs over several events

mod common;

use common::*;
use race_results_dl::{NameHasher, ResultsFetcher, Salt};
use std::collections::HashSet;
use wiremock::MockServer;

#[tokio::test]
async fn two_events_three_athletes_each() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(
        &server,
        dir.path(),
        vec![event("100", "city-marathon"), event("200", "trail-run")],
    );

    mount_races(&server, "100", &[("1000", "Marathon")]).await;
    mount_page(
        &server,
        "100",
        "1000",
        0,
        classification_page("Marathon", 42195, "2019-10-06T08:00:00Z", &names(0, 3)),
    )
    .await;

    mount_races(&server, "200", &[("2000", "Trail 21K")]).await;
    mount_page(
        &server,
        "200",
        "2000",
        0,
        classification_page("Trail 21K", 21000, "2020-05-17T10:00:00Z", &names(0, 3)),
    )
    .await;

    let summary = race_results_dl::run(&config).await.unwrap();
    assert_eq!(summary.events, 2);
    assert_eq!(summary.rows, 6);
    assert_eq!(summary.race_files.len(), 2);

    let (header, rows) = read_csv(&config.output.combined_csv);
    assert_eq!(rows.len(), 6);
    assert_eq!(
        &header[..9],
        &[
            "id",
            "hashed_name",
            "event_name",
            "date",
            "race",
            "distance",
            "category",
            "gun_time_seconds",
            "chip_time_seconds"
        ]
    );
    assert_eq!(&header[9..], &["split_half", "split_finish"]);

    for row in &rows[..3] {
        assert_eq!(cell(&header, row, "event_name"), "city-marathon");
        assert_eq!(cell(&header, row, "race"), "marathon");
        assert_eq!(cell(&header, row, "distance"), "42195");
        assert_eq!(cell(&header, row, "date"), "2019-10-06");
    }
    for row in &rows[3..] {
        assert_eq!(cell(&header, row, "event_name"), "trail-run");
        assert_eq!(cell(&header, row, "race"), "trail_21k");
        assert_eq!(cell(&header, row, "distance"), "21000");
        assert_eq!(cell(&header, row, "date"), "2020-05-17");
    }

    // The same three names ran both events
    let hasher = NameHasher::new(Salt::from_secret(TEST_SECRET).unwrap());
    for (i, row) in rows.iter().enumerate() {
        let hashed = cell(&header, row, "hashed_name");
        assert!(!hashed.is_empty());
        assert_eq!(hashed, hasher.hash(&format!("Runner {}", i % 3)));
    }
    let ids: HashSet<&str> = rows.iter().map(|r| cell(&header, r, "id")).collect();
    assert_eq!(ids.len(), 6);

    // No raw names leak into any output file
    for path in summary.race_files.iter().chain([&summary.combined_csv]) {
        let text = std::fs::read_to_string(path).unwrap();
        assert!(!text.contains("Runner"), "{} leaks names", path.display());
    }
}

#[tokio::test]
async fn per_race_files_match_the_combined_table() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path(), vec![event("100", "city-run")]);

    mount_races(&server, "100", &[("1", "5K"), ("2", "10K")]).await;
    mount_page(
        &server,
        "100",
        "1",
        0,
        classification_page("5K", 5000, "2019-10-06", &names(0, 4)),
    )
    .await;
    mount_page(
        &server,
        "100",
        "2",
        0,
        classification_page("10K", 10000, "2019-10-06", &names(10, 2)),
    )
    .await;

    let summary = ResultsFetcher::new(&config)
        .unwrap()
        .fetch_events()
        .await
        .unwrap();

    let (_, five) = read_csv(&config.output.race_dir.join("100_1.csv"));
    let (_, ten) = read_csv(&config.output.race_dir.join("100_2.csv"));
    let (_, combined) = read_csv(&summary.combined_csv);

    assert_eq!(five.len(), 4);
    assert_eq!(ten.len(), 2);
    let mut expected = five.clone();
    expected.extend(ten);
    assert_eq!(combined, expected);
}

#[tokio::test]
async fn no_events_writes_header_only() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path(), vec![]);

    let summary = race_results_dl::run(&config).await.unwrap();

    assert_eq!(summary.rows, 0);
    let (header, rows) = read_csv(&summary.combined_csv);
    assert_eq!(header.len(), 9);
    assert!(rows.is_empty());
}

