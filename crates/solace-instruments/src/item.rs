//! Scoring a single item: find every trigger occurrence, drop negated ones,
//! and infer an intensity from frequency cues or severity markers around
//! the rest.

use regex::Regex;
use tracing::trace;

use crate::error::InstrumentError;
use crate::lexicon::{Item, Lexicon, compile_alternation};
use crate::scoring::{ItemResult, MAX_ITEM_SCORE};
use crate::text::char_window;

/// Intensity for a trigger match with neither a frequency cue nor a
/// severity marker nearby.
const BARE_PRESENCE_SCORE: u8 = 1;

/// Words that score an uncued match at the maximum ("worthless", "panic").
#[derive(Debug)]
pub struct SeverityMarkers {
    pattern: Option<Regex>,
}

impl SeverityMarkers {
    pub fn new(patterns: &[String]) -> Result<Self, InstrumentError> {
        Ok(Self {
            pattern: compile_alternation(patterns)?,
        })
    }

    pub fn is_match(&self, span: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(span))
    }
}

/// Scores items against analysis text using one lexicon's cue tables.
#[derive(Debug, Clone, Copy)]
pub struct ItemScorer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> ItemScorer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Best score for `item` over all trigger occurrences in `text`, with the
    /// evidence snippet of the first occurrence that reached it.
    ///
    /// Returns as soon as an occurrence reaches [`MAX_ITEM_SCORE`].
    pub fn score(&self, item: &Item, text: &str) -> ItemResult {
        let radius = self.lexicon.evidence_radius();
        let mut best = ItemResult::default();

        for trigger in item.triggers() {
            for found in trigger.pattern.find_iter(text) {
                let pos = found.start();
                if self.lexicon.negation().is_negated(text, pos) {
                    trace!(item = item.id(), pos, "trigger suppressed by nearby negation");
                    continue;
                }

                let snippet = text[char_window(text, pos, radius, radius)].trim();
                let score = self.intensity(snippet);
                if score > best.score {
                    best = ItemResult {
                        score,
                        evidence: snippet.to_string(),
                    };
                }
                if best.score == MAX_ITEM_SCORE {
                    return best;
                }
            }
        }

        best
    }

    fn intensity(&self, snippet: &str) -> u8 {
        let score = match self.lexicon.frequency().detect(snippet) {
            Some(level) => level,
            None if self.lexicon.severity().is_match(snippet) => MAX_ITEM_SCORE,
            None => BARE_PRESENCE_SCORE,
        };
        score.min(MAX_ITEM_SCORE)
    }
}
