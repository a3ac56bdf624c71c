//! Block handlers for `if`, `for` and `raw`.
//!
//! Each handler consumes one matched group and replaces the whole span from
//! the opener to the closer with its output, in a single `replace` on the
//! parent document. Bodies that need rendering are extracted and rendered
//! against a fresh [`Document`], so the parent's coordinates are never
//! mixed with the body's.

use tracing::debug;

use crate::interpreter::{Context, Document, Engine, Lookup, RenderError, resolve};
use crate::parser::{
    Family, Group, HeaderError, Node, Operator, Span, Token, parse_for, parse_if,
};
use crate::types::Value;

/// Expands one matched control block in place.
pub trait BlockHandler {
    fn apply(
        &self,
        group: &Group,
        ctx: &Context<'_>,
        document: &mut Document,
        engine: &Engine<'_>,
    ) -> Result<(), RenderError>;
}

/// The handler for a block family.
pub fn handler_for(family: Family) -> &'static dyn BlockHandler {
    match family {
        Family::If => &IfBlock,
        Family::For => &ForBlock,
        Family::Raw => &RawBlock,
    }
}

/// `{% raw %} ... {% endraw %}`: the body is copied through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBlock;

impl BlockHandler for RawBlock {
    fn apply(
        &self,
        group: &Group,
        _ctx: &Context<'_>,
        document: &mut Document,
        _engine: &Engine<'_>,
    ) -> Result<(), RenderError> {
        let (closer, span) = closed(group)?;
        let body = document.between(&group.opener, closer)?.to_string();
        document.replace(span, &body)
    }
}

/// `{% if path [== 'literal'] %} ... [{% else %} ...] {% endif %}`
///
/// Without an operator the condition holds when the path resolves to any
/// value at all; empty strings and `"0"` count as present. Only the chosen
/// branch is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfBlock;

impl BlockHandler for IfBlock {
    fn apply(
        &self,
        group: &Group,
        ctx: &Context<'_>,
        document: &mut Document,
        engine: &Engine<'_>,
    ) -> Result<(), RenderError> {
        let (closer, span) = closed(group)?;
        let header = parse_if(&group.opener.content).map_err(|e| invalid_tag(&group.opener, e))?;
        let lookup = resolve(ctx, header.path)?;

        let holds = match header.comparison {
            None => !lookup.is_absent(),
            Some((operator, literal)) => {
                let equal = match &lookup {
                    Lookup::Found(value) => value.as_text().is_some_and(|text| text == literal),
                    Lookup::Absent => false,
                };
                match operator {
                    Operator::Equals => equal,
                    Operator::NotEquals => !equal,
                }
            }
        };
        debug!(path = header.path, holds, "if condition");

        let branch = match (holds, else_token(group)) {
            (true, Some(else_tag)) => document.between(&group.opener, else_tag)?,
            (true, None) => document.between(&group.opener, closer)?,
            (false, Some(else_tag)) => document.between(else_tag, closer)?,
            (false, None) => return document.replace(span, ""),
        }
        .to_string();

        let output = engine.render_fragment(&branch, ctx)?;
        document.replace(span, &output)
    }
}

/// `{% for item in path %} ... {% endfor %}`
///
/// The body is tokenized once and executed per element, each time against
/// a child context that binds `item`. Maps iterate over their values in
/// key order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForBlock;

impl BlockHandler for ForBlock {
    fn apply(
        &self,
        group: &Group,
        ctx: &Context<'_>,
        document: &mut Document,
        engine: &Engine<'_>,
    ) -> Result<(), RenderError> {
        let (closer, span) = closed(group)?;
        let header =
            parse_for(&group.opener.content).map_err(|e| invalid_tag(&group.opener, e))?;

        let items = match resolve(ctx, header.path)? {
            Lookup::Absent => {
                return Err(RenderError::VariableNotFound {
                    path: header.path.to_string(),
                });
            }
            Lookup::Found(Value::List(items)) => items,
            Lookup::Found(Value::Map(map)) => map.into_values().collect(),
            Lookup::Found(other) => {
                return Err(RenderError::NotIterable {
                    path: header.path.to_string(),
                    found: other.type_name(),
                });
            }
        };
        debug!(path = header.path, count = items.len(), "for loop");

        let body = document.between(&group.opener, closer)?.to_string();
        let nested = engine.nested()?;
        let nodes = nested.tokenize(&body)?;

        let mut output = String::new();
        for item in items {
            let child = ctx.child(header.item, item);
            let mut iteration = Document::new(body.as_str());
            nested.execute(&nodes, &mut iteration, &child)?;
            output.push_str(iteration.contents());
        }

        document.replace(span, &output)
    }
}

/// The closer and full span of a group that the engine only dispatches once
/// it is closed.
fn closed(group: &Group) -> Result<(&Token, Span), RenderError> {
    match (&group.closer, group.span()) {
        (Some(closer), Some(span)) => Ok((closer, span)),
        _ => Err(RenderError::InvalidTag {
            tag: group.opener.full.clone(),
            message: format!("missing '{}'", group.family.closer()),
        }),
    }
}

/// The `else` tag directly inside an `if` group, if any.
fn else_token(group: &Group) -> Option<&Token> {
    group.body.iter().find_map(|node| match node {
        Node::Token(token) if token.is_keyword("else") => Some(token),
        Node::Token(_) | Node::Group(_) => None,
    })
}

fn invalid_tag(opener: &Token, error: HeaderError) -> RenderError {
    RenderError::InvalidTag {
        tag: opener.full.clone(),
        message: error.message,
    }
}
