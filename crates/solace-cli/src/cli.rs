use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Estimate PHQ-9, GAD-7 and GHQ-12 screening scores from a conversation
/// transcript.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Transcript JSON: an array of `{role, content}` messages. `-` reads stdin
    #[arg(default_value = "conversation.json")]
    pub conversation: PathBuf,

    /// Replace the built-in lexicon with a JSON file of the same shape
    #[arg(long, env = "SOLACE_LEXICON")]
    pub lexicon: Option<PathBuf>,

    /// Validate the lexicon in use, print it as JSON and exit
    #[arg(long)]
    pub print_lexicon: bool,

    /// Log output format (logs go to stderr, filtered by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the result as single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
