//! Athlete rows and their CSV rendering
//!
//! Rows are accumulated in plain vectors and only turned into a table when a
//! file is written. The column set is the fixed columns followed by every
//! `split_*` column in order of first appearance across the rows.

use crate::error::Result;
use serde_json::Number;
use std::path::Path;
use tracing::debug;

/// Columns present in every output file, in order
pub const FIXED_COLUMNS: [&str; 9] = [
    "id",
    "hashed_name",
    "event_name",
    "date",
    "race",
    "distance",
    "category",
    "gun_time_seconds",
    "chip_time_seconds",
];

/// Prefix of the dynamic split columns
pub const SPLIT_PREFIX: &str = "split_";

/// One athlete's result in one race, flattened
#[derive(Clone, Debug, PartialEq)]
pub struct AthleteRow {
    /// Random 32-hex-digit row id
    pub id: String,
    /// Salted hash of the athlete name
    pub hashed_name: String,
    /// Configured event name
    pub event_name: String,
    /// Race date, `YYYY-MM-DD`
    pub date: String,
    /// Normalized race name
    pub race: String,
    /// Race distance in meters
    pub distance: Number,
    /// Athlete category
    pub category: Option<String>,
    /// Gun time in seconds
    pub gun_time_seconds: Option<Number>,
    /// Chip time in seconds
    pub chip_time_seconds: Option<Number>,
    /// `(column, seconds)` pairs in course order; columns are unique
    pub splits: Vec<(String, u64)>,
}

impl AthleteRow {
    /// Record a split value, replacing an earlier value for the same column
    pub fn set_split(&mut self, column: String, seconds: u64) {
        match self.splits.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = seconds,
            None => self.splits.push((column, seconds)),
        }
    }

    /// Seconds recorded under `column`
    pub fn split(&self, column: &str) -> Option<u64> {
        self.splits
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, s)| *s)
    }

    /// Cell text for `column`; empty when the row has no value
    pub fn cell(&self, column: &str) -> String {
        let opt_num = |n: &Option<Number>| n.as_ref().map(Number::to_string).unwrap_or_default();
        match column {
            "id" => self.id.clone(),
            "hashed_name" => self.hashed_name.clone(),
            "event_name" => self.event_name.clone(),
            "date" => self.date.clone(),
            "race" => self.race.clone(),
            "distance" => self.distance.to_string(),
            "category" => self.category.clone().unwrap_or_default(),
            "gun_time_seconds" => opt_num(&self.gun_time_seconds),
            "chip_time_seconds" => opt_num(&self.chip_time_seconds),
            split => self.split(split).map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

/// Header for `rows`: fixed columns, then split columns by first appearance
pub fn columns(rows: &[AthleteRow]) -> Vec<String> {
    let mut cols: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
    for row in rows {
        for (column, _) in &row.splits {
            if !cols.contains(column) {
                cols.push(column.clone());
            }
        }
    }
    cols
}

/// Render `rows` as CSV bytes, header included
pub fn to_csv(rows: &[AthleteRow]) -> Result<Vec<u8>> {
    let header = columns(rows);
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in rows {
        writer.write_record(header.iter().map(|c| row.cell(c)))?;
    }
    writer
        .into_inner()
        .map_err(|e| crate::Error::Io(e.into_error()))
}

/// Write `rows` to `path`, creating parent directories
pub async fn write_csv(path: &Path, rows: &[AthleteRow]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = to_csv(rows)?;
    tokio::fs::write(path, bytes).await?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}
