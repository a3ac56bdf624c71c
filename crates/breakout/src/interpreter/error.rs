//! Error types for template rendering.

use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::escape::EscapeError;
use crate::parser::ParseError;

/// Errors that occur while loading a template file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the template.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is malformed (strict mode only).
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// An error that aborts a render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The source of a `for` loop resolved to nothing.
    #[error("variable '{path}' not found for use in for loop")]
    VariableNotFound { path: String },

    /// The source of a `for` loop is not a list or map.
    #[error("cannot iterate over '{path}': found {found}")]
    NotIterable { path: String, found: &'static str },

    /// No escaper is registered under the requested context name.
    #[error("unknown escape context '{name}'{}", did_you_mean(suggestions))]
    UnknownEscapeContext {
        name: String,
        suggestions: Vec<String>,
    },

    /// A call segment named a method the object does not define.
    #[error("method '{method}()' not defined on object")]
    MethodNotFound { method: String },

    /// An escaper was handed a value it cannot encode.
    #[error(transparent)]
    InvalidEscapeInput(#[from] EscapeError),

    /// A control tag whose content does not follow its grammar.
    #[error("invalid tag '{tag}': {message}")]
    InvalidTag { tag: String, message: String },

    /// Blocks are nested deeper than the configured limit.
    #[error("maximum nesting depth of {limit} exceeded")]
    MaxDepthExceeded { limit: usize },

    /// A token span does not fit the document it was applied to.
    #[error("span {start}..{end} out of bounds for document of length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    /// A malformed tag (strict mode only).
    #[error(transparent)]
    Parse(ParseError),
}

impl From<ParseError> for RenderError {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::TooDeep { limit, .. } => RenderError::MaxDepthExceeded { limit },
            error @ (ParseError::UnterminatedTag { .. }
            | ParseError::UnclosedBlock { .. }
            | ParseError::UnexpectedTag { .. }
            | ParseError::UnknownTag { .. }) => RenderError::Parse(error),
        }
    }
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names of at most 3 chars
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
