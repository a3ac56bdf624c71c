use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::rc::Rc;

/// A mapping from names to values, used for data contexts and nested maps.
pub type Map = BTreeMap<String, Value>;

/// A host-application object that templates can read from.
///
/// Path segments applied to an object either read a property (`user.name`)
/// or invoke a zero-argument method (`user.display_name()`). Implement this
/// for domain types that should be visible to templates.
///
/// # Example
///
/// ```
/// use breakout::{Object, Value};
///
/// #[derive(Debug)]
/// struct User {
///     first: String,
///     last: String,
/// }
///
/// impl Object for User {
///     fn property(&self, name: &str) -> Option<Value> {
///         match name {
///             "first" => Some(self.first.clone().into()),
///             "last" => Some(self.last.clone().into()),
///             _ => None,
///         }
///     }
///
///     fn call(&self, method: &str) -> Option<Value> {
///         match method {
///             "full_name" => Some(format!("{} {}", self.first, self.last).into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Object: Debug {
    /// Read a named property. `None` means the property is not defined.
    fn property(&self, name: &str) -> Option<Value>;

    /// Invoke a zero-argument method. `None` means the method does not exist.
    fn call(&self, method: &str) -> Option<Value>;
}

/// A value stored in a template data context.
///
/// # Example
///
/// ```
/// use breakout::Value;
///
/// let name: Value = "Alice".into();
/// let count: Value = 3.into();
/// let items: Value = vec![Value::from("a"), Value::from("b")].into();
///
/// assert_eq!(name.as_str(), Some("Alice"));
/// assert_eq!(count.as_text().as_deref(), Some("3"));
/// assert_eq!(items.type_name(), "list");
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// An explicit null. Renders as the empty string.
    Null,

    /// A boolean.
    Bool(bool),

    /// An integer number.
    Number(i64),

    /// A floating-point number.
    Float(f64),

    /// A string value.
    String(String),

    /// An ordered sequence.
    List(Vec<Value>),

    /// A nested mapping.
    Map(Map),

    /// A host object resolved through the [`Object`] capability trait.
    Object(Rc<dyn Object>),
}

impl Value {
    /// Wrap a host object.
    pub fn object(object: impl Object + 'static) -> Self {
        Value::Object(Rc::new(object))
    }

    /// Get this value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Canonical text for scalar values.
    ///
    /// Returns `None` for lists, maps and objects, which have no single
    /// textual form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => Some(Cow::Borrowed("")),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::List(_) | Value::Map(_) | Value::Object(_) => None,
        }
    }

    /// Short name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.as_text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "[{}]", self.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
