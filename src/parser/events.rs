//! Event generation.
//!
//! Classifies raw template content into lexical events for the state machine.
//! Tag syntax is recognized for HTML only; comment markers differ per content
//! type. Every event has a fixed lexeme, and the lexemes of a generated event
//! list concatenate back to the input.

use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Flavor of template content being tokenized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Html,
    Css,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Html => "html",
            ContentType::Css => "css",
        }
    }

    /// Comment syntax used by this content type
    pub fn comment_syntax(&self) -> CommentSyntax {
        match self {
            ContentType::Html => CommentSyntax::Markup,
            ContentType::Css => CommentSyntax::Block,
        }
    }
}

impl FromStr for ContentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ContentType::Html),
            "css" => Ok(ContentType::Css),
            _ => Err(Error::UnknownContentType(s.to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Comment marker family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSyntax {
    /// `<!--` ... `-->`
    Markup,
    /// `/*` ... `*/`
    Block,
}

impl CommentSyntax {
    pub fn open(&self) -> &'static str {
        match self {
            CommentSyntax::Markup => "<!--",
            CommentSyntax::Block => "/*",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            CommentSyntax::Markup => "-->",
            CommentSyntax::Block => "*/",
        }
    }
}

/// Lexical signal consumed by the tokenizer state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Char(char),
    /// `<` (HTML only)
    TagStart,
    /// `>` (HTML only)
    TagEnd,
    /// `${`
    ExpressionStart,
    /// `}`
    ExpressionEnd,
    /// `"`, `'` or `` ` ``
    Quote(char),
    CommentStart(CommentSyntax),
    CommentEnd(CommentSyntax),
    Eof,
}

impl Event {
    /// Length in bytes of the source text this event stands for
    pub fn lexeme_len(&self) -> usize {
        match self {
            Event::Char(c) | Event::Quote(c) => c.len_utf8(),
            Event::TagStart | Event::TagEnd | Event::ExpressionEnd => 1,
            Event::ExpressionStart => 2,
            Event::CommentStart(syntax) => syntax.open().len(),
            Event::CommentEnd(syntax) => syntax.close().len(),
            Event::Eof => 0,
        }
    }

    /// Append the source text of this event to `buf`
    pub fn push_lexeme(&self, buf: &mut String) {
        match self {
            Event::Char(c) | Event::Quote(c) => buf.push(*c),
            Event::TagStart => buf.push('<'),
            Event::TagEnd => buf.push('>'),
            Event::ExpressionStart => buf.push_str("${"),
            Event::ExpressionEnd => buf.push('}'),
            Event::CommentStart(syntax) => buf.push_str(syntax.open()),
            Event::CommentEnd(syntax) => buf.push_str(syntax.close()),
            Event::Eof => {}
        }
    }
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// Classify the event starting at the front of `rest`.
///
/// `rest` is non-empty and starts with `ch`.
fn scan(rest: &str, ch: char, content_type: ContentType) -> Event {
    let syntax = content_type.comment_syntax();
    if rest.starts_with(syntax.open()) {
        return Event::CommentStart(syntax);
    }
    if rest.starts_with(syntax.close()) {
        return Event::CommentEnd(syntax);
    }

    let next = rest[ch.len_utf8()..].chars().next();
    match ch {
        '<' if content_type == ContentType::Html && !matches!(next, Some('!' | '?')) => Event::TagStart,
        '>' if content_type == ContentType::Html => Event::TagEnd,
        '$' if next == Some('{') => Event::ExpressionStart,
        '}' => Event::ExpressionEnd,
        c if is_quote(c) => Event::Quote(c),
        c => Event::Char(c),
    }
}

/// Generate the event list for `content`, terminated by exactly one `Eof`.
pub fn generate_events(content: &str, content_type: ContentType) -> Vec<Event> {
    let mut events = Vec::with_capacity(content.len() + 1);
    let mut cursor = 0;

    while let Some(ch) = content[cursor..].chars().next() {
        let event = scan(&content[cursor..], ch, content_type);
        cursor += event.lexeme_len();
        events.push(event);
    }

    events.push(Event::Eof);
    events
}
