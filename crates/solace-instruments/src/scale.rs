use std::collections::BTreeMap;

use tracing::debug;

use crate::item::ItemScorer;
use crate::lexicon::{Instrument, Scale};
use crate::scoring::{ItemResult, ScaleResult};

/// Score every item of `instrument` in ID order.
pub fn score_items(
    scorer: &ItemScorer<'_>,
    instrument: &Instrument,
    text: &str,
) -> BTreeMap<u32, ItemResult> {
    instrument
        .items()
        .iter()
        .map(|item| (item.id(), scorer.score(item, text)))
        .collect()
}

/// Fold raw item results into a scale total and level.
///
/// Items are mapped through the scale's scoring mode first, so a binary
/// scale counts positive items while keeping their evidence.
pub fn summarize(scale: &Scale, raw: &BTreeMap<u32, ItemResult>) -> ScaleResult {
    let mode = scale.mode();
    let per_item: BTreeMap<u32, ItemResult> = raw
        .iter()
        .map(|(id, result)| {
            (
                *id,
                ItemResult {
                    score: mode.item_score(result.score),
                    evidence: result.evidence.clone(),
                },
            )
        })
        .collect();

    let total: u32 = per_item.values().map(|r| u32::from(r.score)).sum();
    let level = scale.levels().label_for(total).to_string();

    debug!(scale = scale.key(), total, level = %level, "scale estimated");

    ScaleResult {
        total,
        level,
        per_item,
    }
}

/// Run one scale over `text`.
pub fn estimate_scale(
    scorer: &ItemScorer<'_>,
    instrument: &Instrument,
    scale: &Scale,
    text: &str,
) -> ScaleResult {
    summarize(scale, &score_items(scorer, instrument, text))
}
