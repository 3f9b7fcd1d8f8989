//! solace-core
//!
//! Pure domain types shared by the Solace crates: conversation transcripts
//! and the loader that turns a stored transcript into user turns.
//! No scoring logic lives here.

pub mod error;
pub mod models;
