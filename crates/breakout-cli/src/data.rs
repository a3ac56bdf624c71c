//! Loading of JSON inputs: data contexts and delimiter configurations.

use std::fs::read_to_string;
use std::path::Path;

use breakout::{DelimiterConfig, Delimiters, Map, Value};
use miette::{IntoDiagnostic, Result, miette};
use serde_json::Value as Json;

/// Read a data context from a JSON file holding a top-level object.
pub fn load_data(path: &Path) -> Result<Map> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read data file {}: {}", path.display(), e))?;
    let json: Json = serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| miette!("Invalid JSON in {}: {}", path.display(), e))?;
    context_from_json(json)
        .ok_or_else(|| miette!("Data file {} must contain a JSON object", path.display()))
}

/// Read custom delimiters from a JSON file, or use the defaults.
pub fn load_delimiters(path: Option<&Path>) -> Result<Delimiters> {
    let Some(path) = path else {
        return Ok(Delimiters::default());
    };
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read delimiter file {}: {}", path.display(), e))?;
    let config: DelimiterConfig = serde_json::from_str(&content)
        .into_diagnostic()
        .map_err(|e| miette!("Invalid delimiter file {}: {}", path.display(), e))?;
    Delimiters::try_from(config).into_diagnostic()
}

/// Convert a JSON value into a template value.
///
/// Integers that fit in `i64` become numbers; all other numbers become
/// floats.
pub fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Number(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        Json::Object(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(key, value)| (key, from_json(value)))
                .collect(),
        ),
    }
}

/// Convert a top-level JSON object into a data context.
///
/// Returns `None` if `json` is not an object.
pub fn context_from_json(json: Json) -> Option<Map> {
    match from_json(json) {
        Value::Map(map) => Some(map),
        _ => None,
    }
}

/// Parse a `-p name=value` value: numbers become numbers, anything else a
/// string.
pub fn param_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::from(raw),
    }
}
