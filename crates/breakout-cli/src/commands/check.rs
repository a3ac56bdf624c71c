//! Implementation of the `breakout check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use breakout::Template;
use breakout::parser::{DEFAULT_MAX_DEPTH, Mode};
use clap::Args;
use miette::{IntoDiagnostic, Report, Result, miette};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use crate::data::load_delimiters;
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON file with custom delimiters
    #[arg(long)]
    pub delimiters: Option<PathBuf>,

    /// Maximum block nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let delimiters = load_delimiters(args.delimiters.as_deref())?;
    let mut results = Vec::new();
    let mut failed = 0;

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;

        match Template::parse(content.as_str(), &delimiters, Mode::Strict, args.max_depth) {
            Ok(_) => {
                if !args.json {
                    println!(
                        "{} {}",
                        "ok".if_supports_color(Stream::Stdout, |t| t.green()),
                        path.display()
                    );
                }
                results.push(CheckJson {
                    file: path.display().to_string(),
                    ok: true,
                    error: None,
                    line: None,
                    column: None,
                });
            }
            Err(e) => {
                failed += 1;
                let (line, column) = e.position();
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_parse_error(
                        path,
                        &content,
                        &e,
                        delimiters.block_close(),
                    );
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                results.push(CheckJson {
                    file: path.display().to_string(),
                    ok: false,
                    error: Some(e.to_string()),
                    line: Some(line),
                    column: Some(column),
                });
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
    } else if failed > 0 {
        eprintln!(
            "{}",
            format!("{failed} of {} file(s) failed", args.files.len())
                .if_supports_color(Stream::Stderr, |t| t.red())
        );
    }

    if failed > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
