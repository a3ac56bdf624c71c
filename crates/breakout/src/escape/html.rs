use super::{EscapeError, Escaper, require_str};
use crate::types::Value;

/// Entity-encodes `& < > " '` for HTML text content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlEscaper;

impl Escaper for HtmlEscaper {
    fn escape(&self, value: &Value) -> Result<String, EscapeError> {
        let text = require_str(value, "html")?;
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        Ok(out)
    }
}

/// Escapes quotes for use inside HTML attributes.
///
/// Text containing `=` is treated as a list of `name="value"` pairs: names
/// and values are trimmed, quotes inside each value are escaped, and the
/// pairs are joined with single spaces. Anything else has its quotes
/// escaped as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlAttrEscaper;

impl Escaper for HtmlAttrEscaper {
    fn escape(&self, value: &Value) -> Result<String, EscapeError> {
        let text = require_str(value, "htmlattr")?;
        if !text.contains('=') {
            return Ok(escape_quotes(text));
        }

        let pairs = attribute_pairs(text);
        if pairs.is_empty() {
            return Ok(escape_quotes(text));
        }

        Ok(pairs
            .iter()
            .map(|(name, value)| format!("{name}=\"{}\"", escape_quotes(value)))
            .collect::<Vec<_>>()
            .join(" "))
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace(['\'', '"'], "&quot;")
}

/// Extract `name = "value"` pairs in order. A repeated name keeps its first
/// position and takes the last value.
fn attribute_pairs(text: &str) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    let mut name_start = 0;
    let mut search = 0;

    while let Some(found) = text[search..].find('=') {
        let equals = search + found;
        search = equals + 1;
        if equals == name_start {
            continue;
        }

        let after = text[equals + 1..].trim_start_matches(' ');
        let Some(quoted) = after.strip_prefix('"') else {
            continue;
        };
        let Some(close) = quoted.find('"') else {
            break;
        };

        let name = text[name_start..equals].trim();
        let value = quoted[..close].trim();
        match pairs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(pair) => pair.1 = value,
            None => pairs.push((name, value)),
        }

        name_start = text.len() - quoted.len() + close + 1;
        search = name_start;
    }

    pairs
}
