use regex::Regex;

use crate::error::InstrumentError;
use crate::lexicon::{NegationDef, compile_pattern};
use crate::text::char_window;

/// Suppresses matches that have a negation cue within a fixed character
/// radius.
///
/// This is a lexical window, not negation scope: "Not sure, I feel hopeless"
/// is suppressed, and attached contractions such as "don't" are not
/// word-boundary matches for `n't`, so they do not negate.
#[derive(Debug)]
pub struct NegationDetector {
    cues: Option<Regex>,
    window: usize,
}

impl NegationDetector {
    pub fn new(def: &NegationDef) -> Result<Self, InstrumentError> {
        let words: Vec<String> = def
            .cues
            .iter()
            .filter(|cue| !cue.trim().is_empty())
            .map(|cue| regex::escape(cue.trim()))
            .collect();

        let cues = if words.is_empty() {
            None
        } else {
            Some(compile_pattern(&format!(r"\b(?:{})\b", words.join("|")))?)
        };

        Ok(Self {
            cues,
            window: def.window,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Whether a negation cue appears within the window around byte offset
    /// `pos` of `text`.
    pub fn is_negated(&self, text: &str, pos: usize) -> bool {
        let Some(cues) = &self.cues else {
            return false;
        };
        cues.is_match(&text[char_window(text, pos, self.window, self.window)])
    }
}
