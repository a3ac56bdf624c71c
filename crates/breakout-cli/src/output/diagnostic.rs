//! Miette diagnostic wrapper for template parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use breakout::parser::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing at a malformed tag.
#[derive(Debug, Error, Diagnostic)]
#[error("template error: {message}")]
#[diagnostic(code(breakout::syntax))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{label}")]
    span: SourceSpan,

    label: String,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    ///
    /// `block_close` is the closing delimiter of block tags, used to size
    /// the label.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError, block_close: &str) -> Self {
        let (line, column) = err.position();
        let offset = byte_offset(content, line, column);

        let (width, label, help) = match err {
            ParseError::UnterminatedTag { delimiter, .. } => (
                delimiter.len(),
                "opened here".to_string(),
                Some("add the matching closing delimiter".to_string()),
            ),
            ParseError::UnclosedBlock { keyword, .. } => (
                tag_width(content, offset, block_close),
                "block opened here".to_string(),
                Some(format!("add an 'end{keyword}' tag after the block body")),
            ),
            ParseError::UnexpectedTag { .. } => (
                tag_width(content, offset, block_close),
                "no open block to attach to".to_string(),
                None,
            ),
            ParseError::UnknownTag { .. } => (
                tag_width(content, offset, block_close),
                "unknown tag".to_string(),
                Some("known blocks are 'if', 'for' and 'raw'".to_string()),
            ),
            ParseError::TooDeep { .. } => (
                tag_width(content, offset, block_close),
                "nested too deep".to_string(),
                Some("raise the limit with --max-depth".to_string()),
            ),
        };

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, width.max(1)).into(),
            label,
            message: err.to_string(),
            help,
        }
    }
}

/// Convert a 1-based line and character column into a byte offset.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum::<usize>();
    let in_line = content[line_start.min(content.len())..]
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(0, |(index, _)| index);

    // Clamp offset to content length to avoid miette panic on out-of-bounds
    (line_start + in_line).min(content.len())
}

/// Width of the tag starting at `offset`, up to the end of its line.
fn tag_width(content: &str, offset: usize, close: &str) -> usize {
    let rest = &content[offset..];
    let line = rest.split('\n').next().unwrap_or_default();
    line.find(close).map_or(line.len(), |end| end + close.len())
}
