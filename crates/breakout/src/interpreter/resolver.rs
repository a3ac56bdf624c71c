//! Dot-path value resolution.

use tracing::trace;

use crate::interpreter::{Context, RenderError};
use crate::types::Value;

/// Outcome of resolving a path that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The path resolved to a value (which may be empty, zero or false).
    Found(Value),
    /// The path does not exist in the data.
    Absent,
}

impl Lookup {
    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    /// The resolved value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

/// One segment of a dot path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// `name`
    Member(&'a str),
    /// `name()`, carrying the raw segment text and the method name.
    Call { raw: &'a str, method: &'a str },
}

impl<'a> Segment<'a> {
    fn parse(raw: &'a str) -> Self {
        if raw.contains('(') && raw.contains(')') {
            let method = raw.split(['(', ')']).next().unwrap_or_default();
            Segment::Call { raw, method }
        } else {
            Segment::Member(raw)
        }
    }

    fn raw(self) -> &'a str {
        match self {
            Segment::Member(raw) | Segment::Call { raw, .. } => raw,
        }
    }
}

/// Resolve a dot path such as `user.address.city` or `user.name()`.
///
/// A path that is itself a top-level key (dots included) resolves directly.
/// Otherwise segments are applied left to right:
/// - on a map, a segment looks up a key; a missing key makes the whole path
///   [`Lookup::Absent`]
/// - on a list, a numeric segment selects an element
/// - on an object, a member segment reads a property and a call segment
///   invokes a zero-argument method; an undefined method is
///   [`RenderError::MethodNotFound`]
/// - on any other value, the path is absent
///
/// # Example
///
/// ```
/// use breakout::{Map, Value};
/// use breakout::interpreter::{Context, Lookup, resolve};
///
/// let data = Map::from([(
///     "foo".to_string(),
///     Value::Map(Map::from([("bar".to_string(), Value::from(""))])),
/// )]);
/// let ctx = Context::new(&data);
///
/// assert_eq!(resolve(&ctx, "foo.bar").unwrap(), Lookup::Found(Value::from("")));
/// assert_eq!(resolve(&ctx, "foo.baz").unwrap(), Lookup::Absent);
/// ```
pub fn resolve(ctx: &Context<'_>, path: &str) -> Result<Lookup, RenderError> {
    if let Some(value) = ctx.get(path) {
        return Ok(Lookup::Found(value.clone()));
    }

    let mut segments = path.split('.').map(Segment::parse);
    let Some(first) = segments.next() else {
        return Ok(Lookup::Absent);
    };
    let Some(mut current) = ctx.get(first.raw()).cloned() else {
        trace!(path, "path not found");
        return Ok(Lookup::Absent);
    };

    for segment in segments {
        match step(&current, segment)? {
            Some(next) => current = next,
            None => {
                trace!(path, segment = segment.raw(), "path not found");
                return Ok(Lookup::Absent);
            }
        }
    }

    Ok(Lookup::Found(current))
}

/// Apply one segment to a value. `None` means the segment does not exist.
fn step(current: &Value, segment: Segment<'_>) -> Result<Option<Value>, RenderError> {
    match current {
        Value::Map(map) => Ok(map.get(segment.raw()).cloned()),
        Value::List(items) => Ok(segment
            .raw()
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .cloned()),
        Value::Object(object) => match segment {
            Segment::Member(name) => Ok(Some(object.property(name).unwrap_or(Value::Null))),
            Segment::Call { method, .. } => object
                .call(method)
                .map(Some)
                .ok_or_else(|| RenderError::MethodNotFound {
                    method: method.to_string(),
                }),
        },
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Float(_)
        | Value::String(_) => Ok(None),
    }
}
