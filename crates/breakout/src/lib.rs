//! Delimiter-based text templates with context-aware escaping.
//!
//! A template mixes plain text with variable tags (`{{ user.name }}`,
//! `{{ query|url }}`) and three control blocks: `{% if %}`, `{% for %}` and
//! `{% raw %}`. Rendering resolves variables against a data [`Map`] and
//! escapes every substitution for its output context.
//!
//! ```
//! use breakout::{context, render, Value};
//!
//! let data = context! {
//!     "title" => "<Fruit>",
//!     "items" => vec![Value::from("apple"), Value::from("pear")],
//! };
//! let out = render(
//!     "{{ title }}: {% for item in items %}{{ item }};{% endfor %}",
//!     &data,
//! )
//! .unwrap();
//! assert_eq!(out, "&lt;Fruit&gt;: apple;pear;");
//! ```

pub mod escape;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use escape::{escape, escape_with};
pub use interpreter::{LoadError, RenderError, Renderer, Template};
pub use types::{ConfigError, DelimiterConfig, Delimiters, Map, Object, Value};

/// Render `document` against `data` with the default delimiters.
pub fn render(document: &str, data: &Map) -> Result<String, RenderError> {
    Renderer::default().render(document, data)
}

/// Render `document` against `data` with custom delimiters.
pub fn render_with(
    document: &str,
    data: &Map,
    delimiters: Delimiters,
) -> Result<String, RenderError> {
    Renderer::with_delimiters(delimiters).render(document, data)
}

/// Creates a [`Map`] from key-value pairs.
///
/// Values are converted via `Into<Value>`.
///
/// # Example
///
/// ```
/// use breakout::{context, Value};
///
/// let data = context! { "count" => 3, "name" => "Alice" };
/// assert_eq!(data.len(), 2);
/// assert_eq!(data["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Map::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Map::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
