use std::fmt::Write;

use super::{EscapeError, Escaper};
use crate::types::Value;

/// Percent-encodes text for URLs, with spaces as `+`.
///
/// Lists and maps are flattened into a `key=value&...` query string.
/// Nested containers produce `outer[inner]` keys and list elements use their
/// index as the key. Booleans encode as `1`/`0` and nulls are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEscaper;

impl Escaper for UrlEscaper {
    fn escape(&self, value: &Value) -> Result<String, EscapeError> {
        match value {
            Value::String(text) => Ok(encode(text)),
            Value::List(_) | Value::Map(_) => {
                let mut pairs = Vec::new();
                flatten(None, value, &mut pairs)?;
                Ok(pairs.join("&"))
            }
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::Float(_)
            | Value::Object(_) => Err(invalid(value)),
        }
    }
}

fn invalid(value: &Value) -> EscapeError {
    EscapeError {
        context: "url".to_string(),
        found: value.type_name(),
    }
}

/// Append encoded `key=value` pairs for `value` under `prefix`.
fn flatten(prefix: Option<&str>, value: &Value, pairs: &mut Vec<String>) -> Result<(), EscapeError> {
    let key_for = |name: &str| match prefix {
        Some(prefix) => format!("{prefix}[{name}]"),
        None => name.to_string(),
    };

    match value {
        Value::Map(map) => {
            for (name, item) in map {
                flatten(Some(&key_for(name)), item, pairs)?;
            }
        }
        Value::List(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(Some(&key_for(&index.to_string())), item, pairs)?;
            }
        }
        Value::Null => {}
        Value::Object(_) => return Err(invalid(value)),
        Value::Bool(_) | Value::Number(_) | Value::Float(_) | Value::String(_) => {
            let Some(key) = prefix else {
                return Err(invalid(value));
            };
            let text = match value {
                Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
                other => other.as_text().unwrap_or_default().into_owned(),
            };
            pairs.push(format!("{}={}", encode(key), encode(&text)));
        }
    }
    Ok(())
}

/// Encode like a form field: `[A-Za-z0-9_.-]` kept, space as `+`, all other
/// bytes as `%XX`.
fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                out.push(char::from(byte));
            }
            b' ' => out.push('+'),
            _ => {
                let _ = write!(out, "%{byte:02X}");
            }
        }
    }
    out
}
