//! The user-facing renderer and compiled templates.

use std::fs;
use std::path::Path;

use bon::Builder;
use tracing::debug;

use crate::escape::EscaperRegistry;
use crate::interpreter::{Context, Document, Engine, LoadError, RenderError};
use crate::parser::{DEFAULT_MAX_DEPTH, Mode, Node, ParseError, tokenize};
use crate::types::{Delimiters, Map};

/// Rendering configuration, passed explicitly into every nested evaluation.
///
/// # Example
///
/// ```
/// use breakout::{Delimiters, Map, Renderer, Value};
/// use breakout::parser::Mode;
///
/// let renderer = Renderer::builder()
///     .delimiters(Delimiters::builder().variable_open("[[").variable_close("]]").build().unwrap())
///     .mode(Mode::Strict)
///     .build();
///
/// let data = Map::from([("name".to_string(), Value::from("Ada"))]);
/// assert_eq!(renderer.render("Hi [[ name ]]", &data).unwrap(), "Hi Ada");
/// ```
#[derive(Debug, Builder)]
pub struct Renderer {
    /// Tag delimiters.
    #[builder(default)]
    delimiters: Delimiters,

    /// Escapers available to `{{ path|context }}`.
    #[builder(default)]
    escapers: EscaperRegistry,

    /// Whether malformed tags are errors.
    #[builder(default)]
    mode: Mode,

    /// Maximum block nesting depth (default 64).
    #[builder(default = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::builder().build()
    }
}

impl Renderer {
    /// Create a renderer with default delimiters and escapers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with custom delimiters.
    pub fn with_delimiters(delimiters: Delimiters) -> Self {
        Renderer::builder().delimiters(delimiters).build()
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    pub fn escapers(&self) -> &EscaperRegistry {
        &self.escapers
    }

    /// Mutable access for registering custom escapers.
    pub fn escapers_mut(&mut self) -> &mut EscaperRegistry {
        &mut self.escapers
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Tokenize a template once so it can be rendered many times.
    pub fn parse(&self, source: impl Into<String>) -> Result<Template, ParseError> {
        Template::parse(source, &self.delimiters, self.mode, self.max_depth)
    }

    /// Read and tokenize a template file.
    pub fn load_template(&self, path: impl AsRef<Path>) -> Result<Template, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(source).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render a template string against `data`.
    pub fn render(&self, document: &str, data: &Map) -> Result<String, RenderError> {
        let template = self.parse(document)?;
        self.render_template(&template, data)
    }

    /// Render a previously parsed template against `data`.
    ///
    /// The template must have been parsed by a renderer with the same
    /// delimiters, since block bodies are re-tokenized with this renderer's.
    pub fn render_template(&self, template: &Template, data: &Map) -> Result<String, RenderError> {
        let ctx = Context::new(data);
        let mut document = Document::new(template.source.as_str());
        Engine::new(self).execute(&template.nodes, &mut document, &ctx)?;
        debug!(
            input = template.source.len(),
            output = document.contents().len(),
            "rendered"
        );
        Ok(document.into_string())
    }
}

/// A tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Tokenize `source` with the given delimiters, mode and nesting limit.
    pub fn parse(
        source: impl Into<String>,
        delimiters: &Delimiters,
        mode: Mode,
        max_depth: usize,
    ) -> Result<Self, ParseError> {
        let source = source.into();
        let nodes = tokenize(&source, delimiters, mode, max_depth)?;
        Ok(Self { source, nodes })
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The top-level token tree.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
