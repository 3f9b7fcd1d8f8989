use std::io::Read;
use std::path::Path;

use clap::Parser;
use solace_core::models::conversation::{parse_transcript, user_turns};
use solace_instruments::lexicon::LexiconDef;
use solace_instruments::{Lexicon, Screener};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, LogFormat};

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    if cli.print_lexicon {
        let def = match &cli.lexicon {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => LexiconDef::builtin()?,
        };
        Lexicon::compile(def.clone())?;
        println!("{}", serde_json::to_string_pretty(&def)?);
        return Ok(());
    }

    let lexicon = match &cli.lexicon {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading lexicon");
            Lexicon::from_path(path)?
        }
        None => Lexicon::builtin()?,
    };
    let screener = Screener::new(lexicon);

    let Some(transcript) = read_transcript(&cli.conversation)? else {
        tracing::warn!(path = %cli.conversation.display(), "transcript not found");
        eprintln!("No conversation found or no user messages.");
        return Ok(());
    };

    let messages = parse_transcript(&transcript)?;
    let turns = user_turns(&messages);
    if turns.is_empty() {
        eprintln!("No conversation found or no user messages.");
        return Ok(());
    }

    tracing::info!(
        messages = messages.len(),
        user_turns = turns.len(),
        "scoring conversation"
    );
    let result = screener.estimate(&turns);

    let json = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{json}");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Read the transcript, or `None` if the file does not exist.
fn read_transcript(path: &Path) -> eyre::Result<Option<String>> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        return Ok(Some(contents));
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(eyre::eyre!("failed to read {}: {e}", path.display())),
    }
}
