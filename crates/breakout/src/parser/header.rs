//! Parsing of control-tag headers: the content of `{% if ... %}` and
//! `{% for ... %}` tags.

use thiserror::Error;
use winnow::ascii::{multispace0, multispace1};
use winnow::combinator::{alt, opt, preceded};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// A control tag whose content does not follow its grammar.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HeaderError {
    pub message: String,
}

impl HeaderError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Comparison operator in an `if` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
}

/// `if <path> [<op> <literal>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfHeader<'a> {
    pub path: &'a str,
    /// Operator and literal with one layer of single quotes removed.
    /// `None` means an existence test.
    pub comparison: Option<(Operator, &'a str)>,
}

/// `for <item> in <path>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForHeader<'a> {
    pub item: &'a str,
    pub path: &'a str,
}

/// Parse the content of an `if` tag.
pub fn parse_if(content: &str) -> Result<IfHeader<'_>, HeaderError> {
    let mut input = content;
    let path = preceded((multispace0, "if", multispace1), path_expr)
        .parse_next(&mut input)
        .map_err(|_| HeaderError::new("expected `if <path>`"))?;
    let operator: Option<Operator> = opt(preceded(multispace0, operator))
        .parse_next(&mut input)
        .map_err(|_| HeaderError::new("invalid comparison operator"))?;
    let remainder = input.trim();

    let comparison = match operator {
        Some(operator) => Some((operator, strip_quotes(remainder))),
        None if remainder.is_empty() => None,
        None => {
            return Err(HeaderError::new(format!(
                "unexpected '{remainder}' after condition, expected `==` or `!=`"
            )));
        }
    };

    Ok(IfHeader { path, comparison })
}

/// Parse the content of a `for` tag.
pub fn parse_for(content: &str) -> Result<ForHeader<'_>, HeaderError> {
    let mut input = content;
    let (item, path) = (
        preceded((multispace0, "for", multispace1), identifier),
        preceded((multispace1, "in", multispace1), path_expr),
    )
        .parse_next(&mut input)
        .map_err(|_| HeaderError::new("expected `for <name> in <path>`"))?;

    if !input.trim().is_empty() {
        return Err(HeaderError::new(format!(
            "unexpected '{}' after loop source",
            input.trim()
        )));
    }

    Ok(ForHeader { item, path })
}

/// A dot path, running up to whitespace or a comparison operator.
fn path_expr<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., |c: char| c.is_whitespace() || c == '=' || c == '!').parse_next(input)
}

fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

fn operator(input: &mut &str) -> ModalResult<Operator> {
    alt((
        "==".value(Operator::Equals),
        "!=".value(Operator::NotEquals),
    ))
    .parse_next(input)
}

/// Remove one layer of surrounding single quotes.
fn strip_quotes(literal: &str) -> &str {
    literal
        .strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(literal)
}
