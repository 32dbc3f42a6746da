//! Race discovery for one event.

use super::{ResultsFetcher, RunStats};
use crate::error::{Error, Result};
use crate::source::ApiRequest;
use crate::table::AthleteRow;
use crate::types::{RaceList, ResourceId};
use tracing::info;

impl ResultsFetcher {
    /// Fetch every race of an event, in API order, and concatenate the rows
    ///
    /// # Errors
    /// Returns an error if the race list cannot be fetched or decoded, or if
    /// any race fails (see [`fetch_race`](Self::fetch_race))
    pub async fn fetch_event(
        &self,
        event_id: &ResourceId,
        event_name: &str,
    ) -> Result<Vec<AthleteRow>> {
        let mut stats = RunStats::default();
        self.fetch_event_tracked(event_id, event_name, &mut stats)
            .await
    }

    pub(crate) async fn fetch_event_tracked(
        &self,
        event_id: &ResourceId,
        event_name: &str,
        stats: &mut RunStats,
    ) -> Result<Vec<AthleteRow>> {
        let request = ApiRequest::EventRaces {
            event_id: event_id.clone(),
        };
        let value = self.source.fetch(&request).await?;
        let list: RaceList = serde_json::from_value(value)?;
        let races = list.races.ok_or_else(|| Error::MissingField {
            field: "races",
            context: format!("event {event_id}"),
        })?;
        info!(event = event_name, races = races.len(), "Found races");

        let mut rows = Vec::new();
        for race in &races {
            let race_rows = self
                .fetch_race_tracked(event_id, event_name, &race.id, &race.name, stats)
                .await?;
            rows.extend(race_rows);
        }
        Ok(rows)
    }
}
