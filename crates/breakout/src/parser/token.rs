//! Token and group types produced by tokenization.
//!
//! Token offsets are byte positions in the exact text that was tokenized.
//! They are only meaningful against that text, or against a
//! [`Document`](crate::interpreter::Document) created from it, which shifts
//! them by its running offset.

use bon::Builder;
use serde::Serialize;

/// Whether a token is a variable reference or a control tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// `{{ path }}` or `{{ path|context }}`
    Variable,
    /// `{% keyword ... %}`
    Block,
}

/// A half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A delimiter-bounded span recognized in the source text.
///
/// # Example
///
/// ```
/// use breakout::parser::{Token, TokenKind};
///
/// let token = Token::builder()
///     .kind(TokenKind::Variable)
///     .start(10)
///     .end(19)
///     .full("{{ foo }}")
///     .content(" foo ")
///     .keyword("foo")
///     .build();
///
/// assert_eq!(token.span().len(), 9);
/// assert_eq!(token.path(), "foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize)]
#[builder(on(String, into))]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the opening delimiter.
    pub start: usize,
    /// Byte offset just past the closing delimiter.
    pub end: usize,
    /// The tag including its delimiters.
    pub full: String,
    /// The text strictly between the delimiters.
    pub content: String,
    /// First whitespace-delimited word of the trimmed content.
    #[builder(default)]
    pub keyword: String,
}

impl Token {
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Trimmed content, the path expression of a variable tag.
    pub fn path(&self) -> &str {
        self.content.trim()
    }

    pub fn is_block(&self) -> bool {
        self.kind == TokenKind::Block
    }

    /// True for a block token with the given keyword.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is_block() && self.keyword == keyword
    }
}

/// A family of control tags that open and close a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    If,
    For,
    Raw,
}

impl Family {
    /// The family a block keyword opens, if any.
    pub fn opened_by(keyword: &str) -> Option<Family> {
        match keyword {
            "if" => Some(Family::If),
            "for" => Some(Family::For),
            "raw" => Some(Family::Raw),
            _ => None,
        }
    }

    /// The family a block keyword closes, if any.
    pub fn closed_by(keyword: &str) -> Option<Family> {
        match keyword {
            "endif" => Some(Family::If),
            "endfor" => Some(Family::For),
            "endraw" => Some(Family::Raw),
            _ => None,
        }
    }

    pub fn opener(self) -> &'static str {
        match self {
            Family::If => "if",
            Family::For => "for",
            Family::Raw => "raw",
        }
    }

    pub fn closer(self) -> &'static str {
        match self {
            Family::If => "endif",
            Family::For => "endfor",
            Family::Raw => "endraw",
        }
    }
}

/// A matched control block: opener, nested body, and closer.
///
/// `closer` is `None` only for an opener that was never closed, which the
/// lenient tokenizer tolerates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub family: Family,
    pub opener: Token,
    pub body: Vec<Node>,
    pub closer: Option<Token>,
}

impl Group {
    /// Span from the start of the opener to the end of the closer.
    pub fn span(&self) -> Option<Span> {
        self.closer
            .as_ref()
            .map(|closer| Span::new(self.opener.start, closer.end))
    }
}

/// One element of a nested token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Token(Token),
    Group(Group),
}

impl Node {
    /// The first token of this node (the opener for groups).
    pub fn first_token(&self) -> &Token {
        match self {
            Node::Token(token) => token,
            Node::Group(group) => &group.opener,
        }
    }
}
