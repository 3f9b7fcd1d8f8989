use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InstrumentError;

/// Highest intensity a single item can receive.
pub const MAX_ITEM_SCORE: u8 = 3;

/// How item scores combine into a scale total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoringMode {
    /// Sum of item intensities, 0–3 each.
    Summed,
    /// Count of items with any positive evidence.
    Binary,
}

impl ScoringMode {
    /// Map a raw item intensity onto this mode's per-item range.
    pub fn item_score(self, raw: u8) -> u8 {
        match self {
            ScoringMode::Summed => raw.min(MAX_ITEM_SCORE),
            ScoringMode::Binary => u8::from(raw >= 1),
        }
    }

    pub fn max_item_score(self) -> u8 {
        match self {
            ScoringMode::Summed => MAX_ITEM_SCORE,
            ScoringMode::Binary => 1,
        }
    }
}

/// One entry of a total-to-level mapping. `max: None` is the open-ended
/// catch-all and must come last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CutPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    pub label: String,
}

/// Validated cut-points, ascending by upper bound.
#[derive(Debug, Clone)]
pub struct LevelBands {
    bands: Vec<CutPoint>,
}

impl LevelBands {
    pub fn new(scale: &str, bands: Vec<CutPoint>) -> Result<Self, InstrumentError> {
        let invalid = |reason: &str| InstrumentError::InvalidCutPoints {
            scale: scale.to_string(),
            reason: reason.to_string(),
        };

        let Some((last, bounded)) = bands.split_last() else {
            return Err(invalid("no cut-points"));
        };
        if last.max.is_some() {
            return Err(invalid("last cut-point must be open-ended"));
        }

        let mut previous: Option<u32> = None;
        for band in bounded {
            let Some(max) = band.max else {
                return Err(invalid("only the last cut-point may be open-ended"));
            };
            if previous.is_some_and(|p| max <= p) {
                return Err(invalid("upper bounds must be strictly ascending"));
            }
            previous = Some(max);
        }

        Ok(Self { bands })
    }

    /// Label of the first cut-point whose upper bound is at least `total`.
    pub fn label_for(&self, total: u32) -> &str {
        self.bands
            .iter()
            .find(|band| band.max.is_none_or(|max| total <= max))
            .map_or("", |band| band.label.as_str())
    }

    pub fn cut_points(&self) -> &[CutPoint] {
        &self.bands
    }
}

/// Best match found for one item in one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemResult {
    pub score: u8,
    /// Source text around the triggering match; empty when nothing matched.
    pub evidence: String,
}

/// Total, level and per-item breakdown for one scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScaleResult {
    pub total: u32,
    pub level: String,
    pub per_item: BTreeMap<u32, ItemResult>,
}
