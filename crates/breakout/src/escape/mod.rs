//! Context-aware output escaping.
//!
//! Every variable substitution passes through an [`Escaper`] chosen by the
//! context name after `|` in the tag (`{{ name|js }}`), defaulting to
//! `html`. The [`EscaperRegistry`] maps context names to escapers and ships
//! with `html`, `htmlattr`, `js`, `css` and `url`.

mod css;
mod html;
mod js;
mod url;

pub use css::CssEscaper;
pub use html::{HtmlAttrEscaper, HtmlEscaper};
pub use js::JsEscaper;
pub use url::UrlEscaper;

use std::collections::BTreeMap;
use std::fmt::Debug;

use thiserror::Error;

use crate::interpreter::{RenderError, compute_suggestions};
use crate::types::{Map, Value};

/// Context name used when a tag does not name one.
pub const DEFAULT_CONTEXT: &str = "html";

/// An escaper was given a value it cannot encode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot escape a {found} value in the '{context}' context")]
pub struct EscapeError {
    pub context: String,
    pub found: &'static str,
}

/// Converts a value into text that is safe for one output context.
pub trait Escaper: Debug {
    fn escape(&self, value: &Value) -> Result<String, EscapeError>;

    /// Escape with per-call options. None of the built-in escapers take
    /// options, so by default `config` is ignored.
    fn escape_with(&self, value: &Value, _config: &Map) -> Result<String, EscapeError> {
        self.escape(value)
    }
}

/// Require a string value, as every built-in context except `url` does.
pub(crate) fn require_str<'v>(value: &'v Value, context: &str) -> Result<&'v str, EscapeError> {
    value.as_str().ok_or_else(|| EscapeError {
        context: context.to_string(),
        found: value.type_name(),
    })
}

/// Registry of escapers keyed by lowercase context name.
///
/// # Example
///
/// ```
/// use breakout::Value;
/// use breakout::escape::EscaperRegistry;
///
/// let escapers = EscaperRegistry::default();
/// let escaped = escapers.escape(&Value::from("<b>"), "HTML").unwrap();
/// assert_eq!(escaped, "&lt;b&gt;");
/// ```
#[derive(Debug)]
pub struct EscaperRegistry {
    escapers: BTreeMap<String, Box<dyn Escaper>>,
}

impl EscaperRegistry {
    /// Create a registry with no escapers.
    pub fn empty() -> Self {
        Self {
            escapers: BTreeMap::new(),
        }
    }

    /// Register `escaper` under `name`, replacing any existing one.
    pub fn register(&mut self, name: &str, escaper: impl Escaper + 'static) {
        self.escapers
            .insert(name.trim().to_lowercase(), Box::new(escaper));
    }

    /// Get the escaper for a context name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&dyn Escaper> {
        self.escapers
            .get(&name.trim().to_lowercase())
            .map(|escaper| &**escaper)
    }

    /// Registered context names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.escapers.keys().map(String::as_str)
    }

    /// Escape `value` for the named context.
    pub fn escape(&self, value: &Value, context: &str) -> Result<String, RenderError> {
        self.escape_with(value, context, &Map::new())
    }

    /// Escape `value` for the named context, passing `config` to the
    /// escaper.
    pub fn escape_with(
        &self,
        value: &Value,
        context: &str,
        config: &Map,
    ) -> Result<String, RenderError> {
        let escaper = self
            .get(context)
            .ok_or_else(|| RenderError::UnknownEscapeContext {
                name: context.to_string(),
                suggestions: compute_suggestions(&context.trim().to_lowercase(), self.names()),
            })?;
        Ok(escaper.escape_with(value, config)?)
    }
}

impl Default for EscaperRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("html", HtmlEscaper);
        registry.register("htmlattr", HtmlAttrEscaper);
        registry.register("js", JsEscaper);
        registry.register("css", CssEscaper);
        registry.register("url", UrlEscaper);
        registry
    }
}

/// Escape `value` for `context` using the built-in escapers.
///
/// ```
/// use breakout::{Value, escape};
///
/// assert_eq!(escape(&Value::from("a b"), "url").unwrap(), "a+b");
/// ```
pub fn escape(value: &Value, context: &str) -> Result<String, RenderError> {
    EscaperRegistry::default().escape(value, context)
}

/// Escape `value` for `context` with the built-in escapers and per-call
/// options.
pub fn escape_with(value: &Value, context: &str, config: &Map) -> Result<String, RenderError> {
    EscaperRegistry::default().escape_with(value, context, config)
}
