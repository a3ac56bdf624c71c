//! Template tokenizer.
//!
//! Tokenization runs in three stages: the lexer finds delimiter occurrences,
//! the matcher pairs them into flat tokens, and the nester groups control
//! tags into matched blocks. The resulting tree is what the interpreter
//! walks.

pub mod error;
mod header;
mod lexer;
mod matcher;
mod nester;
pub mod token;
mod validate;

pub use error::ParseError;
pub use header::{ForHeader, HeaderError, IfHeader, Operator, parse_for, parse_if};
pub use lexer::{Occurrence, Scan, scan};
pub use matcher::{Matched, match_tokens};
pub use nester::{TooDeep, nest};
pub use token::{Family, Group, Node, Span, Token, TokenKind};

use tracing::debug;

use crate::types::Delimiters;
use error::calculate_position;

/// Default limit on block nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How malformed tags are treated during tokenization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Unterminated openers produce no token, and stray block tags are
    /// dropped from the output.
    #[default]
    Lenient,
    /// Malformed tags are reported as [`ParseError`]s.
    Strict,
}

/// Tokenize `text` into a nested token tree.
///
/// Blocks nested more than `max_depth` levels deep are a
/// [`ParseError::TooDeep`] in either mode. Apart from that, [`Mode::Lenient`]
/// never fails.
///
/// # Example
///
/// ```
/// use breakout::Delimiters;
/// use breakout::parser::{Mode, Node, tokenize};
///
/// let text = "{% if a %}{{ b }}{% endif %}";
/// let nodes = tokenize(text, &Delimiters::default(), Mode::Strict, 64).unwrap();
/// assert_eq!(nodes.len(), 1);
/// assert!(matches!(&nodes[0], Node::Group(group) if group.body.len() == 1));
/// ```
pub fn tokenize(
    text: &str,
    delimiters: &Delimiters,
    mode: Mode,
    max_depth: usize,
) -> Result<Vec<Node>, ParseError> {
    let matched = match_tokens(text, delimiters);
    let token_count = matched.tokens.len();
    let nodes = nest(matched.tokens, max_depth).map_err(|too_deep| {
        let (line, column) = calculate_position(text, too_deep.position);
        ParseError::TooDeep {
            line,
            column,
            limit: too_deep.limit,
        }
    })?;

    match mode {
        Mode::Strict => validate::validate(text, &nodes, &matched.unterminated)?,
        Mode::Lenient => {
            if !matched.unterminated.is_empty() {
                debug!(
                    count = matched.unterminated.len(),
                    "dropping unterminated tags"
                );
            }
        }
    }

    debug!(tokens = token_count, nodes = nodes.len(), "tokenized");
    Ok(nodes)
}
