//! Strict-mode checks over a nested token tree.

use super::error::{ParseError, calculate_position};
use super::token::{Family, Node, Span, Token};

/// Report the first malformed tag in source order, if any.
///
/// Raw block bodies are literal text and are not checked.
pub(crate) fn validate(
    text: &str,
    nodes: &[Node],
    unterminated: &[(usize, String)],
) -> Result<(), ParseError> {
    let mut checker = Checker {
        text,
        problems: Vec::new(),
        raw_spans: Vec::new(),
    };
    checker.walk(nodes, None);

    for (position, delimiter) in unterminated {
        let inside_raw = checker
            .raw_spans
            .iter()
            .any(|span| span.start <= *position && *position < span.end);
        if !inside_raw {
            let (line, column) = calculate_position(text, *position);
            checker.problems.push((
                *position,
                ParseError::UnterminatedTag {
                    line,
                    column,
                    delimiter: delimiter.clone(),
                },
            ));
        }
    }

    match checker.problems.into_iter().min_by_key(|(position, _)| *position) {
        Some((_, error)) => Err(error),
        None => Ok(()),
    }
}

struct Checker<'a> {
    text: &'a str,
    problems: Vec<(usize, ParseError)>,
    raw_spans: Vec<Span>,
}

impl Checker<'_> {
    fn walk(&mut self, nodes: &[Node], parent: Option<Family>) {
        let mut seen_else = false;
        for node in nodes {
            match node {
                Node::Token(token) if token.is_block() => {
                    if token.keyword == "else" && parent == Some(Family::If) && !seen_else {
                        seen_else = true;
                    } else {
                        self.stray(token);
                    }
                }
                Node::Token(_) => {}
                Node::Group(group) => {
                    let Some(span) = group.span() else {
                        let (line, column) = calculate_position(self.text, group.opener.start);
                        self.problems.push((
                            group.opener.start,
                            ParseError::UnclosedBlock {
                                line,
                                column,
                                keyword: group.family.opener().to_string(),
                            },
                        ));
                        self.walk(&group.body, Some(group.family));
                        continue;
                    };
                    if group.family == Family::Raw {
                        self.raw_spans.push(span);
                    } else {
                        self.walk(&group.body, Some(group.family));
                    }
                }
            }
        }
    }

    fn stray(&mut self, token: &Token) {
        let (line, column) = calculate_position(self.text, token.start);
        let keyword = token.keyword.clone();
        let error = if keyword == "else" || Family::closed_by(&keyword).is_some() {
            ParseError::UnexpectedTag {
                line,
                column,
                keyword,
            }
        } else {
            ParseError::UnknownTag {
                line,
                column,
                keyword,
            }
        };
        self.problems.push((token.start, error));
    }
}
