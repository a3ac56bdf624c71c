use std::fmt::Write;

use super::{EscapeError, Escaper, require_str};
use crate::types::Value;

/// Escapes text for use inside JavaScript string literals.
///
/// Letters, digits and spaces pass through. Other ASCII characters become
/// `\xHH`; everything else becomes one `\uHHHH` per UTF-16 code unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsEscaper;

impl Escaper for JsEscaper {
    fn escape(&self, value: &Value) -> Result<String, EscapeError> {
        let text = require_str(value, "js")?;
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_alphanumeric() || c == ' ' {
                out.push(c);
            } else if c.is_ascii() {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
        Ok(out)
    }
}
