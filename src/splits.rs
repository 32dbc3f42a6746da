//! Split time parsing
//!
//! Cumulative split times arrive as `H:MM:SS` strings. [`parse_cumulative_time`]
//! converts them to whole seconds; [`SplitTimePolicy`] decides what happens
//! to values that do not parse.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// What to do with a cumulative time that is not `H:MM:SS`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitTimePolicy {
    /// Abort the run with [`Error::InvalidSplitTime`]
    #[default]
    Fail,
    /// Log a warning and leave the split empty for that athlete
    Skip,
}

/// Convert `H:MM:SS` into seconds
///
/// Hours are not bounded (ultra distances exceed 24h). Each component must be
/// a non-negative integer; surrounding whitespace is tolerated.
pub fn parse_cumulative_time(split: &str, value: &str) -> Result<u64> {
    let invalid = |reason: String| Error::InvalidSplitTime {
        split: split.to_string(),
        value: value.to_string(),
        reason,
    };

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid(format!(
            "expected 3 components, found {}",
            parts.len()
        )));
    }

    let mut fields = [0u64; 3];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<u64>()
            .map_err(|e| invalid(format!("{part:?}: {e}")))?;
    }
    let [hours, minutes, seconds] = fields;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| invalid("overflow".to_string()))
}

/// Seconds for a split, or `None` when the split has no usable time
///
/// Absent and empty times are always `None`. Malformed times follow `policy`.
pub fn split_seconds(
    split: &str,
    value: Option<&str>,
    policy: SplitTimePolicy,
) -> Result<Option<u64>> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    match parse_cumulative_time(split, value) {
        Ok(seconds) => Ok(Some(seconds)),
        Err(e) if policy == SplitTimePolicy::Skip => {
            warn!(error = %e, "Skipping unparsable split time");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
