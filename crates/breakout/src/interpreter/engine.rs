//! Execution engine: walks a token tree and rewrites a document in place.

use tracing::{debug, trace};

use crate::escape::DEFAULT_CONTEXT;
use crate::interpreter::blocks::handler_for;
use crate::interpreter::{Context, Document, Lookup, RenderError, Renderer, resolve};
use crate::parser::{Node, Token, tokenize};
use crate::types::Value;

/// Walks nodes in source order, substituting variables and expanding blocks.
///
/// Every node's coordinates belong to the text the nodes were tokenized
/// from; the [`Document`] offset maps them onto the partly rewritten text.
/// Each node is fully replaced before the walk moves past it.
///
/// `depth` counts nested block levels; each block body rendered through
/// [`Engine::render_fragment`] or [`Engine::nested`] runs one level deeper.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    renderer: &'r Renderer,
    depth: usize,
}

impl<'r> Engine<'r> {
    pub fn new(renderer: &'r Renderer) -> Self {
        Self { renderer, depth: 0 }
    }

    pub fn renderer(&self) -> &'r Renderer {
        self.renderer
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// An engine one nesting level deeper.
    ///
    /// Returns an error if this would exceed the renderer's depth limit.
    pub fn nested(&self) -> Result<Engine<'r>, RenderError> {
        let limit = self.renderer.max_depth();
        if self.depth >= limit {
            return Err(RenderError::MaxDepthExceeded { limit });
        }
        Ok(Engine {
            renderer: self.renderer,
            depth: self.depth + 1,
        })
    }

    /// Tokenize `text` with the renderer's delimiters and mode.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Node>, RenderError> {
        Ok(tokenize(
            text,
            self.renderer.delimiters(),
            self.renderer.mode(),
            self.renderer.max_depth(),
        )?)
    }

    /// Render a block body: tokenize it afresh and execute it one level
    /// deeper against its own document.
    pub fn render_fragment(&self, text: &str, ctx: &Context<'_>) -> Result<String, RenderError> {
        let nested = self.nested()?;
        let nodes = nested.tokenize(text)?;
        let mut document = Document::new(text);
        nested.execute(&nodes, &mut document, ctx)?;
        Ok(document.into_string())
    }

    /// Execute `nodes` against `document`.
    pub fn execute(
        &self,
        nodes: &[Node],
        document: &mut Document,
        ctx: &Context<'_>,
    ) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Token(token) if token.is_block() => {
                    debug!(tag = %token.full, "dropping stray block tag");
                    document.replace(token.span(), "")?;
                }
                Node::Token(token) => self.substitute(token, document, ctx)?,
                Node::Group(group) if group.closer.is_none() => {
                    debug!(tag = %group.opener.full, "leaving unclosed block opener in place");
                    self.nested()?.execute(&group.body, document, ctx)?;
                }
                Node::Group(group) => {
                    debug!(
                        block = group.family.opener(),
                        depth = self.depth,
                        "expanding block"
                    );
                    handler_for(group.family).apply(group, ctx, document, self)?;
                }
            }
        }
        Ok(())
    }

    /// Replace a variable token with its resolved, escaped value.
    fn substitute(
        &self,
        token: &Token,
        document: &mut Document,
        ctx: &Context<'_>,
    ) -> Result<(), RenderError> {
        let (path, context) = match token.path().split_once('|') {
            Some((path, context)) => (path.trim(), context.trim()),
            None => (token.path(), DEFAULT_CONTEXT),
        };

        let value = match resolve(ctx, path)? {
            Lookup::Found(value) => normalize(value),
            Lookup::Absent => Value::String(String::new()),
        };
        let escaped = self.renderer.escapers().escape(&value, context)?;
        trace!(path, context, "substituting variable");
        document.replace(token.span(), &escaped)
    }
}

/// Scalars become their canonical text. Lists, maps and objects pass
/// through for escapers that accept them.
fn normalize(value: Value) -> Value {
    match value {
        Value::String(_) | Value::List(_) | Value::Map(_) | Value::Object(_) => value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Float(_) => {
            let text = value.as_text().unwrap_or_default().into_owned();
            Value::String(text)
        }
    }
}
