//! Implementation of the `breakout render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use breakout::parser::{DEFAULT_MAX_DEPTH, Mode};
use breakout::{Map, Renderer};
use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing::debug;

use crate::data::{load_data, load_delimiters, param_value};
use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file to render
    pub file: PathBuf,

    /// JSON file with the data context (a top-level object)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Data values in name=value format (repeatable, overrides --data)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// JSON file with custom delimiters, e.g. {"variable": ["<<", ">>"]}
    #[arg(long)]
    pub delimiters: Option<PathBuf>,

    /// Report malformed tags as errors
    #[arg(long)]
    pub strict: bool,

    /// Maximum block nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
struct RenderResult {
    result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid parameter format '{s}': expected name=value"))?;
    Ok((key.to_string(), value.to_string()))
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let delimiters = load_delimiters(args.delimiters.as_deref())?;

    let mut data = match &args.data {
        Some(path) => load_data(path)?,
        None => Map::new(),
    };
    for (name, raw) in &args.params {
        data.insert(name.clone(), param_value(raw));
    }

    let renderer = Renderer::builder()
        .delimiters(delimiters)
        .mode(if args.strict { Mode::Strict } else { Mode::Lenient })
        .max_depth(args.max_depth)
        .build();

    let content = read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read template {}: {}", args.file.display(), e))?;

    let template = match renderer.parse(content.as_str()) {
        Ok(template) => template,
        Err(e) => {
            let block_close = renderer.delimiters().block_close();
            let diagnostic =
                TemplateDiagnostic::from_parse_error(&args.file, &content, &e, block_close);
            return Err(diagnostic.into());
        }
    };
    debug!(file = %args.file.display(), keys = data.len(), "rendering");

    match renderer.render_template(&template, &data) {
        Ok(result) => {
            if args.json {
                let output = RenderResult { result };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                print!("{result}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Render error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}
