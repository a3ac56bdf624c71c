//! Pairs opening delimiters with closing delimiters to form flat tokens.

use tracing::trace;

use super::lexer::{Occurrence, scan};
use super::token::{Token, TokenKind};
use crate::types::Delimiters;

/// Result of matching: tokens in source order, plus openers left unmatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matched {
    pub tokens: Vec<Token>,
    /// Byte offsets of opening delimiters that never found their close.
    pub unterminated: Vec<(usize, String)>,
}

/// Scan `text` and pair each opening delimiter with the nearest following
/// closing delimiter of the same kind.
///
/// An opener with no matching close yields no token. An opener that falls
/// inside an already matched token is part of that token's content.
pub fn match_tokens(text: &str, delimiters: &Delimiters) -> Matched {
    let scanned = scan(text, delimiters);
    let variable_closes = closes_of(&scanned.closes, delimiters.variable_close());
    let block_closes = closes_of(&scanned.closes, delimiters.block_close());
    let mut tokens = Vec::new();
    let mut unterminated = Vec::new();
    let mut matched_until = 0;

    for open in &scanned.opens {
        if open.position < matched_until {
            trace!(position = open.position, "opener inside a matched tag");
            continue;
        }

        let (kind, closes) = if open.lexeme == delimiters.variable_open() {
            (TokenKind::Variable, &variable_closes)
        } else {
            (TokenKind::Block, &block_closes)
        };

        let next = closes.partition_point(|close| close.position < open.end());
        let close = closes.get(next);

        match close {
            Some(close) => {
                tokens.push(build_token(text, kind, open, close));
                matched_until = close.end();
            }
            None => unterminated.push((open.position, open.lexeme.to_string())),
        }
    }

    Matched {
        tokens,
        unterminated,
    }
}

/// Closing delimiters spelled `lexeme`, still in position order.
fn closes_of<'a>(closes: &[Occurrence<'a>], lexeme: &str) -> Vec<Occurrence<'a>> {
    closes
        .iter()
        .filter(|close| close.lexeme == lexeme)
        .copied()
        .collect()
}

fn build_token(text: &str, kind: TokenKind, open: &Occurrence<'_>, close: &Occurrence<'_>) -> Token {
    let content = &text[open.end()..close.position];
    let keyword = content.split_whitespace().next().unwrap_or_default();
    Token::builder()
        .kind(kind)
        .start(open.position)
        .end(close.end())
        .full(&text[open.position..close.end()])
        .content(content)
        .keyword(keyword)
        .build()
}
