use std::fmt::Write;

use super::{EscapeError, Escaper, require_str};
use crate::types::Value;

/// Escapes text for use in CSS.
///
/// `/* ... */` comments are removed first. Every character outside
/// `[A-Za-z0-9]` then becomes a numeric entity `&#N;`, except tabs and line
/// breaks, which are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssEscaper;

impl Escaper for CssEscaper {
    fn escape(&self, value: &Value) -> Result<String, EscapeError> {
        let text = strip_comments(require_str(value, "css")?);
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii_alphanumeric() || matches!(c, '\t' | '\n' | '\r') {
                out.push(c);
            } else {
                let _ = write!(out, "&#{};", u32::from(c));
            }
        }
        Ok(out)
    }
}

/// Remove `/* ... */` comments. An unterminated comment is kept as text.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find("/*") {
        let Some(close) = rest[open + 2..].find("*/") else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + 2 + close + 2..];
    }
    out.push_str(rest);
    out
}
