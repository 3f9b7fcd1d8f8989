//! Lexicon tables: instruments, trigger phrases, frequency cues, negation
//! cues and severity markers.
//!
//! The tables are plain JSON so instruments can be extended or localized
//! without touching scoring code. The built-in tables ship inside the crate
//! under `lexicon/`; a replacement lexicon uses the same shape in a single
//! file (see [`LexiconDef`]). Everything is validated and compiled once by
//! [`Lexicon::compile`] and is read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InstrumentError;
use crate::frequency::FrequencyDetector;
use crate::item::SeverityMarkers;
use crate::negation::NegationDetector;
use crate::scoring::{CutPoint, LevelBands, ScoringMode};

pub const PHQ9: &str = "PHQ-9";
pub const GAD7: &str = "GAD-7";
pub const GHQ12_BINARY: &str = "GHQ-12_binary";
pub const GHQ12_LIKERT: &str = "GHQ-12_likert";

/// Scales the aggregate result always reports.
pub const REQUIRED_SCALES: [&str; 4] = [PHQ9, GAD7, GHQ12_BINARY, GHQ12_LIKERT];

const BUILTIN_CUES: &str = include_str!("../lexicon/cues.json");
const BUILTIN_INSTRUMENTS: [&str; 3] = [
    include_str!("../lexicon/phq9.json"),
    include_str!("../lexicon/gad7.json"),
    include_str!("../lexicon/ghq12.json"),
];

fn default_evidence_radius() -> usize {
    60
}

fn default_negation_window() -> usize {
    20
}

/// Complete lexicon as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconDef {
    #[serde(flatten)]
    pub cues: CueDef,
    pub instruments: Vec<InstrumentDef>,
}

/// Cue tables shared by every instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueDef {
    pub frequency: Vec<FrequencyLevelDef>,
    pub negation: NegationDef,
    /// Regexes that push an uncued match to the maximum score.
    #[serde(default)]
    pub severity_markers: Vec<String>,
    /// Characters kept on each side of a match as evidence.
    #[serde(default = "default_evidence_radius")]
    pub evidence_radius: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyLevelDef {
    pub level: u8,
    /// Regexes, matched case-insensitively.
    pub cues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegationDef {
    /// Radius in characters around a match.
    #[serde(default = "default_negation_window")]
    pub window: usize,
    /// Literal words, matched on word boundaries.
    pub cues: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentDef {
    pub id: String,
    pub name: String,
    pub items: Vec<ItemDef>,
    pub scales: Vec<ScaleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: u32,
    #[serde(default)]
    pub label: String,
    /// Literal phrases, matched case-insensitively anywhere in the text.
    pub triggers: Vec<String>,
    /// Message raised when this item scores above zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_flag: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleDef {
    pub key: String,
    pub mode: ScoringMode,
    pub levels: Vec<CutPoint>,
}

impl LexiconDef {
    /// The tables shipped with this crate, before compilation.
    pub fn builtin() -> Result<Self, InstrumentError> {
        let cues: CueDef = serde_json::from_str(BUILTIN_CUES)?;
        let instruments = BUILTIN_INSTRUMENTS
            .iter()
            .map(|json| serde_json::from_str::<InstrumentDef>(json))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { cues, instruments })
    }
}

/// A compiled, validated lexicon.
#[derive(Debug)]
pub struct Lexicon {
    frequency: FrequencyDetector,
    negation: NegationDetector,
    severity: SeverityMarkers,
    evidence_radius: usize,
    instruments: Vec<Instrument>,
}

impl Lexicon {
    pub fn builtin() -> Result<Self, InstrumentError> {
        Self::compile(LexiconDef::builtin()?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, InstrumentError> {
        Self::compile(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, InstrumentError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn compile(def: LexiconDef) -> Result<Self, InstrumentError> {
        let frequency = FrequencyDetector::new(&def.cues.frequency)?;
        let negation = NegationDetector::new(&def.cues.negation)?;
        let severity = SeverityMarkers::new(&def.cues.severity_markers)?;

        let mut instrument_ids = HashSet::new();
        let mut scale_keys = HashSet::new();
        let mut instruments = Vec::with_capacity(def.instruments.len());
        for instrument_def in def.instruments {
            if !instrument_ids.insert(instrument_def.id.clone()) {
                return Err(InstrumentError::DuplicateInstrument(instrument_def.id));
            }
            let instrument = Instrument::compile(instrument_def)?;
            for scale in &instrument.scales {
                if !scale_keys.insert(scale.key.clone()) {
                    return Err(InstrumentError::DuplicateScale(scale.key.clone()));
                }
            }
            instruments.push(instrument);
        }

        if let Some(missing) = REQUIRED_SCALES.iter().find(|k| !scale_keys.contains(**k)) {
            return Err(InstrumentError::MissingScale(missing.to_string()));
        }

        debug!(
            instruments = instruments.len(),
            scales = scale_keys.len(),
            "lexicon compiled"
        );

        Ok(Self {
            frequency,
            negation,
            severity,
            evidence_radius: def.cues.evidence_radius,
            instruments,
        })
    }

    pub fn frequency(&self) -> &FrequencyDetector {
        &self.frequency
    }

    pub fn negation(&self) -> &NegationDetector {
        &self.negation
    }

    pub fn severity(&self) -> &SeverityMarkers {
        &self.severity
    }

    pub fn evidence_radius(&self) -> usize {
        self.evidence_radius
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn instrument(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    /// Find a scale by key, together with the instrument whose items it sums.
    pub fn scale(&self, key: &str) -> Option<(&Instrument, &Scale)> {
        self.instruments
            .iter()
            .find_map(|i| i.scales.iter().find(|s| s.key == key).map(|s| (i, s)))
    }
}

/// A screening instrument: items plus the scales computed from them.
#[derive(Debug)]
pub struct Instrument {
    id: String,
    name: String,
    items: Vec<Item>,
    scales: Vec<Scale>,
}

impl Instrument {
    fn compile(def: InstrumentDef) -> Result<Self, InstrumentError> {
        if def.items.is_empty() {
            return Err(InstrumentError::NoItems {
                instrument_id: def.id,
            });
        }

        let mut seen = HashSet::new();
        let mut items = Vec::with_capacity(def.items.len());
        for item_def in def.items {
            if !seen.insert(item_def.id) {
                return Err(InstrumentError::DuplicateItem {
                    instrument_id: def.id,
                    item_id: item_def.id,
                });
            }
            items.push(Item::compile(&def.id, item_def)?);
        }
        items.sort_by_key(|item| item.id);

        let scales = def
            .scales
            .into_iter()
            .map(|s| {
                Ok(Scale {
                    levels: LevelBands::new(&s.key, s.levels)?,
                    key: s.key,
                    mode: s.mode,
                })
            })
            .collect::<Result<Vec<_>, InstrumentError>>()?;

        Ok(Self {
            id: def.id,
            name: def.name,
            items,
            scales,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items in ID order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn scales(&self) -> &[Scale] {
        &self.scales
    }
}

#[derive(Debug)]
pub struct Item {
    id: u32,
    label: String,
    triggers: Vec<Trigger>,
    safety_flag: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Trigger {
    pub(crate) phrase: String,
    pub(crate) pattern: Regex,
}

impl Item {
    fn compile(instrument_id: &str, def: ItemDef) -> Result<Self, InstrumentError> {
        if def.triggers.is_empty() || def.triggers.iter().any(|t| t.trim().is_empty()) {
            return Err(InstrumentError::EmptyTriggers {
                instrument_id: instrument_id.to_string(),
                item_id: def.id,
            });
        }

        let triggers = def
            .triggers
            .into_iter()
            .map(|phrase| {
                let pattern = compile_pattern(&regex::escape(&phrase))?;
                Ok(Trigger { phrase, pattern })
            })
            .collect::<Result<Vec<_>, InstrumentError>>()?;

        Ok(Self {
            id: def.id,
            label: def.label,
            triggers,
            safety_flag: def.safety_flag,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.triggers.iter().map(|t| t.phrase.as_str())
    }

    pub fn safety_flag(&self) -> Option<&str> {
        self.safety_flag.as_deref()
    }

    pub(crate) fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }
}

/// A named total over an instrument's items.
#[derive(Debug)]
pub struct Scale {
    key: String,
    mode: ScoringMode,
    levels: LevelBands,
}

impl Scale {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    pub fn levels(&self) -> &LevelBands {
        &self.levels
    }
}

/// Compile a case-insensitive pattern.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, InstrumentError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| InstrumentError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile several patterns into one alternation. Each pattern is checked on
/// its own first so errors name the offending entry. `None` when empty.
pub(crate) fn compile_alternation(patterns: &[String]) -> Result<Option<Regex>, InstrumentError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    for pattern in patterns {
        compile_pattern(pattern)?;
    }
    let joined = patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|");
    compile_pattern(&joined).map(Some)
}
