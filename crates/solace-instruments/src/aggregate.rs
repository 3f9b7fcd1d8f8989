use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use solace_core::models::conversation::{ConversationMessage, user_turns};
use tracing::debug;
use ts_rs::TS;

use crate::error::InstrumentError;
use crate::item::ItemScorer;
use crate::lexicon::{GAD7, GHQ12_BINARY, GHQ12_LIKERT, Lexicon, PHQ9};
use crate::scale;
use crate::scoring::{ItemResult, ScaleResult};
use crate::text::join_fragments;

/// Coarse overall classification across instruments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskTier {
    #[default]
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn from_totals(phq9: u32, gad7: u32, ghq12_binary: u32) -> Self {
        if phq9 >= 15 || gad7 >= 15 || ghq12_binary >= 6 {
            RiskTier::High
        } else if phq9 >= 10 || gad7 >= 10 || ghq12_binary >= 3 {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores for every scale, the overall tier and any safety flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateResult {
    #[serde(rename = "PHQ-9")]
    pub phq9: ScaleResult,
    #[serde(rename = "GAD-7")]
    pub gad7: ScaleResult,
    #[serde(rename = "GHQ-12_binary")]
    pub ghq12_binary: ScaleResult,
    #[serde(rename = "GHQ-12_likert")]
    pub ghq12_likert: ScaleResult,
    pub overall_risk: RiskTier,
    pub flags: Vec<String>,
    /// Scales contributed by a custom lexicon beyond the four above.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_scales: BTreeMap<String, ScaleResult>,
}

/// The screening engine.
///
/// Build once at startup and share by reference: it holds only the compiled
/// lexicon, never mutates it, and every call computes a fresh result.
#[derive(Debug)]
pub struct Screener {
    lexicon: Lexicon,
}

impl Screener {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn builtin() -> Result<Self, InstrumentError> {
        Ok(Self::new(Lexicon::builtin()?))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Score conversation fragments (user turns, oldest first).
    pub fn estimate<S: AsRef<str>>(&self, fragments: &[S]) -> AggregateResult {
        self.estimate_text(&join_fragments(fragments))
    }

    /// Score the user turns of a transcript; other roles are ignored.
    pub fn estimate_conversation(&self, messages: &[ConversationMessage]) -> AggregateResult {
        self.estimate(&user_turns(messages))
    }

    /// Score already-joined text.
    pub fn estimate_text(&self, text: &str) -> AggregateResult {
        let scorer = ItemScorer::new(&self.lexicon);
        let mut scales = BTreeMap::new();
        let mut flags = Vec::new();

        for instrument in self.lexicon.instruments() {
            let raw = scale::score_items(&scorer, instrument, text);

            for item in instrument.items() {
                if let Some(flag) = item.safety_flag()
                    && raw.get(&item.id()).is_some_and(|r| r.score >= 1)
                {
                    flags.push(flag.to_string());
                }
            }

            for s in instrument.scales() {
                scales.insert(s.key().to_string(), scale::summarize(s, &raw));
            }
        }

        // Presence of these four is checked when the lexicon compiles.
        let phq9 = scales.remove(PHQ9).unwrap_or_default();
        let gad7 = scales.remove(GAD7).unwrap_or_default();
        let ghq12_binary = scales.remove(GHQ12_BINARY).unwrap_or_default();
        let ghq12_likert = scales.remove(GHQ12_LIKERT).unwrap_or_default();

        let overall_risk = RiskTier::from_totals(phq9.total, gad7.total, ghq12_binary.total);

        debug!(
            phq9 = phq9.total,
            gad7 = gad7.total,
            ghq12_binary = ghq12_binary.total,
            overall_risk = %overall_risk,
            flags = flags.len(),
            "screening complete"
        );

        AggregateResult {
            phq9,
            gad7,
            ghq12_binary,
            ghq12_likert,
            overall_risk,
            flags,
            other_scales: scales,
        }
    }

    /// Run a single scale by key.
    pub fn estimate_scale(&self, key: &str, text: &str) -> Result<ScaleResult, InstrumentError> {
        let (instrument, s) = self
            .lexicon
            .scale(key)
            .ok_or_else(|| InstrumentError::UnknownScale(key.to_string()))?;
        Ok(scale::estimate_scale(
            &ItemScorer::new(&self.lexicon),
            instrument,
            s,
            text,
        ))
    }

    /// Raw 0–3 score for one item, before any scale's scoring mode applies.
    pub fn score_item(
        &self,
        instrument_id: &str,
        item_id: u32,
        text: &str,
    ) -> Result<ItemResult, InstrumentError> {
        let instrument = self
            .lexicon
            .instrument(instrument_id)
            .ok_or_else(|| InstrumentError::UnknownInstrument(instrument_id.to_string()))?;
        let item = instrument
            .item(item_id)
            .ok_or_else(|| InstrumentError::UnknownItem {
                instrument_id: instrument_id.to_string(),
                item_id,
            })?;
        Ok(ItemScorer::new(&self.lexicon).score(item, text))
    }
}
