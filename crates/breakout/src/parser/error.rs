//! Parse error types for strict-mode tokenization.

use thiserror::Error;

/// A malformed tag found while tokenizing.
///
/// Only [`ParseError::TooDeep`] is reported in lenient mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An opening delimiter with no matching close.
    #[error("unterminated tag at {line}:{column}: '{delimiter}' is never closed")]
    UnterminatedTag {
        line: usize,
        column: usize,
        delimiter: String,
    },

    /// An `if`, `for` or `raw` block with no closing tag.
    #[error("unclosed block at {line}:{column}: '{keyword}' has no matching 'end{keyword}'")]
    UnclosedBlock {
        line: usize,
        column: usize,
        keyword: String,
    },

    /// A closing tag or `else` with no open block to attach to.
    #[error("unexpected '{keyword}' at {line}:{column}")]
    UnexpectedTag {
        line: usize,
        column: usize,
        keyword: String,
    },

    /// A block tag whose keyword is not a known control construct.
    #[error("unknown block tag '{keyword}' at {line}:{column}")]
    UnknownTag {
        line: usize,
        column: usize,
        keyword: String,
    },

    /// Blocks nested more levels deep than the renderer allows.
    #[error("block at {line}:{column} is nested more than {limit} levels deep")]
    TooDeep {
        line: usize,
        column: usize,
        limit: usize,
    },
}

impl ParseError {
    /// 1-based line and column of the offending tag.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnterminatedTag { line, column, .. }
            | ParseError::UnclosedBlock { line, column, .. }
            | ParseError::UnexpectedTag { line, column, .. }
            | ParseError::UnknownTag { line, column, .. }
            | ParseError::TooDeep { line, column, .. } => (*line, *column),
        }
    }
}

/// Calculate 1-based line and column for a byte offset into `text`.
pub(crate) fn calculate_position(text: &str, offset: usize) -> (usize, usize) {
    let consumed = &text[..offset.min(text.len())];
    let line = consumed.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed.rfind('\n') {
        Some(pos) => consumed[pos + 1..].chars().count() + 1,
        None => consumed.chars().count() + 1,
    };
    (line, column)
}
