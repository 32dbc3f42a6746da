//! Paginated classification download and row flattening.

use super::{PAGE_SIZE, ResultsFetcher, RunStats};
use crate::anonymize::NameHasher;
use crate::error::{Error, Result};
use crate::source::ApiRequest;
use crate::splits::{SplitTimePolicy, split_seconds};
use crate::table::{self, AthleteRow, SPLIT_PREFIX};
use crate::types::{Classification, ClassificationPage, RaceInfo, ResourceId};
use tracing::{info, warn};
use uuid::Uuid;

impl ResultsFetcher {
    /// Download every classification page of a race and write its CSV
    ///
    /// Pages of [`PAGE_SIZE`] entries are requested from offset 0 until a
    /// short page comes back. Race metadata is read from the first page
    /// only; a race without it yields no rows and no file.
    ///
    /// # Errors
    ///
    /// Transport, decoding and write failures propagate, as do malformed
    /// split times under [`SplitTimePolicy::Fail`].
    pub async fn fetch_race(
        &self,
        event_id: &ResourceId,
        event_name: &str,
        race_id: &ResourceId,
        race_name: &str,
    ) -> Result<Vec<AthleteRow>> {
        let mut stats = RunStats::default();
        self.fetch_race_tracked(event_id, event_name, race_id, race_name, &mut stats)
            .await
    }

    pub(crate) async fn fetch_race_tracked(
        &self,
        event_id: &ResourceId,
        event_name: &str,
        race_id: &ResourceId,
        race_name: &str,
        stats: &mut RunStats,
    ) -> Result<Vec<AthleteRow>> {
        info!(race = race_name, id = %race_id, "Fetching race");

        let mut offset = 0;
        let mut page = self.fetch_page(event_id, race_id, offset).await?;

        let Some(race) = RaceInfo::from_page(&page) else {
            warn!(
                event = event_name,
                race = race_name,
                "Race has no eventRace metadata, skipping"
            );
            stats.races_skipped += 1;
            return Ok(Vec::new());
        };

        let mut rows = Vec::new();
        loop {
            let entries = page
                .full_classifications
                .take()
                .ok_or_else(|| Error::MissingField {
                    field: "fullClassifications",
                    context: format!("race {race_id} offset {offset}"),
                })?;
            let count = entries.len();

            for entry in entries {
                rows.push(build_row(
                    &self.hasher,
                    self.split_time_policy,
                    event_name,
                    &race,
                    entry.classification,
                )?);
            }

            if count < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
            page = self.fetch_page(event_id, race_id, offset).await?;
        }

        info!(race = race_name, results = rows.len(), "Fetched results");

        let path = self.race_csv_path(event_id, race_id);
        table::write_csv(&path, &rows).await?;
        stats.race_files.push(path);

        Ok(rows)
    }

    async fn fetch_page(
        &self,
        event_id: &ResourceId,
        race_id: &ResourceId,
        offset: usize,
    ) -> Result<ClassificationPage> {
        info!(race = %race_id, offset, "Requesting page");
        let request = ApiRequest::Classifications {
            event_id: event_id.clone(),
            race_id: race_id.clone(),
            count: PAGE_SIZE,
            offset,
        };
        let value = self.source.fetch(&request).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Flatten one classification into an output row
///
/// The row gets a fresh random id; the athlete name only survives as its
/// keyed hash. Splits without a cumulative time are left out.
pub fn build_row(
    hasher: &NameHasher,
    policy: SplitTimePolicy,
    event_name: &str,
    race: &RaceInfo,
    classification: Classification,
) -> Result<AthleteRow> {
    let mut row = AthleteRow {
        id: Uuid::new_v4().simple().to_string(),
        hashed_name: hasher.hash(&classification.name),
        event_name: event_name.to_string(),
        date: race.date.clone(),
        race: race.race.clone(),
        distance: race.distance.clone(),
        category: classification.category,
        gun_time_seconds: classification.gun_time_in_sec,
        chip_time_seconds: classification.chip_time_in_sec,
        splits: Vec::with_capacity(classification.splits.len()),
    };

    for split in &classification.splits {
        if let Some(seconds) =
            split_seconds(&split.name, split.cumulative_time.as_deref(), policy)?
        {
            let column = format!("{SPLIT_PREFIX}{}", split.name.to_lowercase());
            row.set_split(column, seconds);
        }
    }

    Ok(row)
}
