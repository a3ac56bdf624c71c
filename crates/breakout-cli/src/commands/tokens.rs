//! Implementation of the `breakout tokens` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use breakout::parser::match_tokens;
use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::{OwoColorize, Stream};

use crate::data::load_delimiters;
use crate::output::table::format_token_table;

/// Arguments for the tokens command.
#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Template file to tokenize
    pub file: PathBuf,

    /// JSON file with custom delimiters
    #[arg(long)]
    pub delimiters: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the tokens command.
pub fn run_tokens(args: TokensArgs) -> Result<i32> {
    let delimiters = load_delimiters(args.delimiters.as_deref())?;
    let content = read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read {}: {}", args.file.display(), e))?;

    let matched = match_tokens(&content, &delimiters);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matched.tokens).into_diagnostic()?);
    } else {
        println!("{}", format_token_table(&matched.tokens));
    }

    for (position, delimiter) in &matched.unterminated {
        eprintln!(
            "{} '{delimiter}' at byte {position} is never closed",
            "warning:".if_supports_color(Stream::Stderr, |t| t.yellow())
        );
    }

    Ok(exitcode::OK)
}
