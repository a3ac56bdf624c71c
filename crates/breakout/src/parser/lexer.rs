//! Delimiter scanning.
//!
//! Finds every occurrence of the opening delimiters and, separately, of the
//! closing delimiters. No nesting or well-formedness is checked here.

use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{any, literal};

use crate::types::Delimiters;

/// A delimiter found in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    /// Byte offset of the delimiter.
    pub position: usize,
    /// The delimiter exactly as matched.
    pub lexeme: &'a str,
}

impl Occurrence<'_> {
    pub fn end(&self) -> usize {
        self.position + self.lexeme.len()
    }
}

/// All opening and closing delimiter occurrences in a text, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<'a> {
    pub opens: Vec<Occurrence<'a>>,
    pub closes: Vec<Occurrence<'a>>,
}

/// Scan `text` for the opening and closing delimiters of both tag kinds.
pub fn scan<'a>(text: &'a str, delimiters: &Delimiters) -> Scan<'a> {
    Scan {
        opens: occurrences(text, delimiters.variable_open(), delimiters.block_open()),
        closes: occurrences(text, delimiters.variable_close(), delimiters.block_close()),
    }
}

/// Find non-overlapping occurrences of `first` or `second`, left to right.
///
/// When both match at the same position `first` wins.
fn occurrences<'a>(text: &'a str, first: &str, second: &str) -> Vec<Occurrence<'a>> {
    let mut found = Vec::new();
    let mut input = text;
    while !input.is_empty() {
        let position = text.len() - input.len();
        let matched: ModalResult<&str> = alt((literal(first), literal(second))).parse_next(&mut input);
        match matched {
            Ok(lexeme) => found.push(Occurrence { position, lexeme }),
            Err(_) => {
                let skipped: ModalResult<char> = any.parse_next(&mut input);
                if skipped.is_err() {
                    break;
                }
            }
        }
    }
    found
}
