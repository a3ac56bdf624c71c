//! Mutable document text with a running coordinate offset.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::interpreter::RenderError;
use crate::parser::{Span, Token};

/// Document text that is rewritten in place, one token span at a time.
///
/// Token coordinates are computed once against the original text. Every
/// [`replace`](Document::replace) changes the text length, and the document
/// accumulates that change in `offset` so later tokens from the same
/// tokenization still land on the right bytes.
///
/// # Example
///
/// ```
/// use breakout::interpreter::Document;
/// use breakout::parser::Span;
///
/// let mut doc = Document::new("{{ a }} and {{ b }}");
/// doc.replace(Span::new(0, 7), "1").unwrap();
/// doc.replace(Span::new(12, 19), "22").unwrap();
///
/// assert_eq!(doc.contents(), "1 and 22");
/// assert_eq!(doc.offset(), -11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    offset: isize,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
        }
    }

    /// The current text.
    pub fn contents(&self) -> &str {
        &self.text
    }

    /// Consume the document, returning its current text.
    pub fn into_string(self) -> String {
        self.text
    }

    /// Current length minus original length, summed over all replacements.
    pub fn offset(&self) -> isize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: isize) {
        self.offset = offset;
    }

    pub fn reset_offset(&mut self) {
        self.offset = 0;
    }

    /// Text between the end of `first` and the start of `second`.
    pub fn between(&self, first: &Token, second: &Token) -> Result<&str, RenderError> {
        let (start, end) = self.locate(Span::new(first.end, second.start))?;
        Ok(&self.text[start..end])
    }

    /// Replace the text under `span` with `content`.
    pub fn replace(&mut self, span: Span, content: &str) -> Result<(), RenderError> {
        let (start, end) = self.locate(span)?;
        self.text.replace_range(start..end, content);
        let removed = end - start;
        self.offset += isize_from(content.len()) - isize_from(removed);
        Ok(())
    }

    /// Translate an original-epoch span into current byte positions.
    fn locate(&self, span: Span) -> Result<(usize, usize), RenderError> {
        let out_of_bounds = || RenderError::SpanOutOfBounds {
            start: span.start,
            end: span.end,
            len: self.text.len(),
        };
        let start = span
            .start
            .checked_add_signed(self.offset)
            .ok_or_else(out_of_bounds)?;
        let end = span
            .end
            .checked_add_signed(self.offset)
            .ok_or_else(out_of_bounds)?;
        if start > end
            || end > self.text.len()
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return Err(out_of_bounds());
        }
        Ok((start, end))
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.text)
    }
}

impl From<Document> for String {
    fn from(document: Document) -> Self {
        document.text
    }
}

fn isize_from(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}
