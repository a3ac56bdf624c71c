//! Groups a flat token sequence into a tree of matched control blocks.

use std::vec::IntoIter;

use thiserror::Error;

use super::token::{Family, Group, Node, Token, TokenKind};

/// An opener nested more levels deep than allowed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("block at byte {position} is nested more than {limit} levels deep")]
pub struct TooDeep {
    /// Byte offset of the first opener past the limit.
    pub position: usize,
    pub limit: usize,
}

/// Nest a flat, source-ordered token list.
///
/// `if`, `for` and `raw` open a group that extends to the nearest closer of
/// the same family, with inner openers handled recursively. `else`, unknown
/// keywords and closers that match no enclosing opener stay as bare tokens
/// at the level where they appear.
///
/// Groups may nest at most `max_depth` levels. A top-level group is at
/// level one.
pub fn nest(tokens: Vec<Token>, max_depth: usize) -> Result<Vec<Node>, TooDeep> {
    let mut nester = Nester {
        tokens: tokens.into_iter(),
        max_depth,
    };
    Ok(nester.level(None, 0)?.nodes)
}

/// Nodes collected at one level, and the closer that ended it.
struct Level {
    nodes: Vec<Node>,
    closer: Option<Token>,
}

struct Nester {
    tokens: IntoIter<Token>,
    max_depth: usize,
}

impl Nester {
    fn level(&mut self, enclosing: Option<Family>, depth: usize) -> Result<Level, TooDeep> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            if token.kind == TokenKind::Variable {
                nodes.push(Node::Token(token));
                continue;
            }

            if let Some(family) = Family::opened_by(&token.keyword) {
                if depth >= self.max_depth {
                    return Err(TooDeep {
                        position: token.start,
                        limit: self.max_depth,
                    });
                }
                let inner = self.level(Some(family), depth + 1)?;
                nodes.push(Node::Group(Group {
                    family,
                    opener: token,
                    body: inner.nodes,
                    closer: inner.closer,
                }));
                continue;
            }

            if enclosing.is_some() && Family::closed_by(&token.keyword) == enclosing {
                return Ok(Level {
                    nodes,
                    closer: Some(token),
                });
            }

            nodes.push(Node::Token(token));
        }

        Ok(Level {
            nodes,
            closer: None,
        })
    }
}
