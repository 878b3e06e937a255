use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Contents of `<...>` (without the angle brackets)
    Tag,
    /// Plain text between constructs
    Text,
    /// Body of a top-level `${...}` (without `${` and the closing `}`)
    Expression,
    /// Quoted attribute value, quotes included
    Attribute,
    /// Comment body (without the comment markers)
    Comment,
    /// Reserved for CSS-in-JS sub-tokenization. Never emitted.
    Style,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Tag => "tag",
            TokenKind::Text => "text",
            TokenKind::Expression => "expression",
            TokenKind::Attribute => "attribute",
            TokenKind::Comment => "comment",
            TokenKind::Style => "style",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A classified, positioned span of template content.
///
/// `start` and `end` are byte offsets into the tokenized string, so
/// `value == &source[start..end]` always holds. `depth` is the number of open
/// tag contexts at the moment the token was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

impl Token {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Move the token by `offset` bytes (used when the tokenized string was
    /// cut out of a larger file).
    pub fn shifted(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}
