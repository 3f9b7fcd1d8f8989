//! solace-instruments
//!
//! Rule-based screening engine. Estimates PHQ-9, GAD-7 and GHQ-12 scores
//! from conversation text using lexicon tables: trigger phrases per item,
//! frequency cues, a negation window and severity markers. No model, no
//! I/O during scoring; every score carries the text that justified it.
//!
//! Build a [`Screener`] once from a [`Lexicon`] and share it:
//!
//! ```no_run
//! let screener = solace_instruments::Screener::builtin()?;
//! let result = screener.estimate(&["I feel hopeless every day"]);
//! println!("{}", result.overall_risk);
//! # Ok::<(), solace_instruments::error::InstrumentError>(())
//! ```

pub mod aggregate;
pub mod error;
pub mod frequency;
pub mod item;
pub mod lexicon;
pub mod negation;
pub mod scale;
pub mod scoring;
pub mod text;

pub use aggregate::{AggregateResult, RiskTier, Screener};
pub use lexicon::Lexicon;
