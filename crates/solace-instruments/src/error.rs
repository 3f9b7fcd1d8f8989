use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown scale: {0}")]
    UnknownScale(String),

    #[error("unknown item {item_id} for instrument '{instrument_id}'")]
    UnknownItem { instrument_id: String, item_id: u32 },

    #[error("lexicon parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("frequency level {0} is outside [0, 3]")]
    InvalidFrequencyLevel(u8),

    #[error("duplicate instrument: {0}")]
    DuplicateInstrument(String),

    #[error("instrument '{instrument_id}' has no items")]
    NoItems { instrument_id: String },

    #[error("duplicate item {item_id} in instrument '{instrument_id}'")]
    DuplicateItem { instrument_id: String, item_id: u32 },

    #[error("item {item_id} in instrument '{instrument_id}' has an empty trigger list or an empty phrase")]
    EmptyTriggers { instrument_id: String, item_id: u32 },

    #[error("scale '{scale}' has invalid cut-points: {reason}")]
    InvalidCutPoints { scale: String, reason: String },

    #[error("duplicate scale key: {0}")]
    DuplicateScale(String),

    #[error("lexicon is missing required scale: {0}")]
    MissingScale(String),
}
