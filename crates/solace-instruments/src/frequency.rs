use regex::Regex;

use crate::error::InstrumentError;
use crate::lexicon::{FrequencyLevelDef, compile_alternation};
use crate::scoring::MAX_ITEM_SCORE;

/// Infers symptom frequency (0 = never … 3 = daily) from cue words.
#[derive(Debug)]
pub struct FrequencyDetector {
    /// Highest level first.
    levels: Vec<(u8, Regex)>,
}

impl FrequencyDetector {
    pub fn new(defs: &[FrequencyLevelDef]) -> Result<Self, InstrumentError> {
        let mut levels = Vec::with_capacity(defs.len());
        for def in defs {
            if def.level > MAX_ITEM_SCORE {
                return Err(InstrumentError::InvalidFrequencyLevel(def.level));
            }
            if let Some(pattern) = compile_alternation(&def.cues)? {
                levels.push((def.level, pattern));
            }
        }
        levels.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(Self { levels })
    }

    /// Highest level with a cue anywhere in `span`.
    ///
    /// `None` means the span says nothing about frequency, which is not the
    /// same as `Some(0)` ("never", "not at all").
    pub fn detect(&self, span: &str) -> Option<u8> {
        self.levels
            .iter()
            .find(|(_, pattern)| pattern.is_match(span))
            .map(|(level, _)| *level)
    }
}
