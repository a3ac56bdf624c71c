//! Layered data context for variable lookup.

use crate::types::{Map, Value};

/// Immutable name-to-value bindings visible to a template.
///
/// The root layer borrows the caller's data. Each `for` iteration adds a
/// child layer with one binding that shadows any same-named binding below
/// it; every other name falls through to the parent.
///
/// # Example
///
/// ```
/// use breakout::{Map, Value};
/// use breakout::interpreter::Context;
///
/// let data = Map::from([
///     ("item".to_string(), Value::from("outer")),
///     ("title".to_string(), Value::from("List")),
/// ]);
/// let root = Context::new(&data);
/// let child = root.child("item", Value::from("inner"));
///
/// assert_eq!(child.get("item"), Some(&Value::from("inner")));
/// assert_eq!(child.get("title"), Some(&Value::from("List")));
/// assert_eq!(root.get("item"), Some(&Value::from("outer")));
/// ```
#[derive(Debug)]
pub struct Context<'a> {
    layer: Layer<'a>,
    parent: Option<&'a Context<'a>>,
}

#[derive(Debug)]
enum Layer<'a> {
    Root(&'a Map),
    Binding { name: String, value: Value },
}

impl<'a> Context<'a> {
    /// Create a root context over `data`.
    pub fn new(data: &'a Map) -> Self {
        Self {
            layer: Layer::Root(data),
            parent: None,
        }
    }

    /// Create a child context that binds `name` to `value`.
    pub fn child(&'a self, name: impl Into<String>, value: Value) -> Context<'a> {
        Context {
            layer: Layer::Binding {
                name: name.into(),
                value,
            },
            parent: Some(self),
        }
    }

    /// Look up a top-level name, innermost binding first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let own = match &self.layer {
            Layer::Root(data) => data.get(name),
            Layer::Binding { name: bound, value } => (bound == name).then_some(value),
        };
        own.or_else(|| self.parent.and_then(|parent| parent.get(name)))
    }

    /// Number of layers from the root to this context.
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }
}
