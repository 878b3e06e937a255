//! Rendering of token streams back onto their source.

use crate::parser::{Token, TokenKind};
use std::ops::Range;

/// A piece of source text: either a token or the delimiter text between tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Token(&'a Token),
    Gap(Range<usize>),
}

/// Split `source` into tokens and the gaps around them, in order.
pub fn segments<'a>(source: &str, tokens: &'a [Token]) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(tokens.len() * 2 + 1);
    let mut cursor = 0;
    for token in tokens {
        if token.start > cursor {
            out.push(Segment::Gap(cursor..token.start));
        }
        out.push(Segment::Token(token));
        cursor = cursor.max(token.end);
    }
    if cursor < source.len() {
        out.push(Segment::Gap(cursor..source.len()));
    }
    out
}

/// Source ranges not covered by any token
pub fn gaps(source: &str, tokens: &[Token]) -> Vec<Range<usize>> {
    segments(source, tokens)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Gap(range) => Some(range),
            Segment::Token(_) => None,
        })
        .collect()
}

/// Rebuild the source from token values and the gaps between them.
pub fn reconstruct(source: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(source.len());
    for segment in segments(source, tokens) {
        match segment {
            Segment::Token(token) => out.push_str(&token.value),
            Segment::Gap(range) => out.push_str(&source[range]),
        }
    }
    out
}

/// Wrap every token and delimiter of `source` in 256-color ANSI codes.
pub fn highlight(source: &str, tokens: &[Token]) -> String {
    // 256-color ANSI codes approximating JetBrains New UI dark theme
    const TAG: &str = "\x1b[38;5;180m"; // #d5b778 - tags and delimiters
    const STRING: &str = "\x1b[38;5;72m"; // #6aab73 - attribute values
    const EXPRESSION: &str = "\x1b[38;5;173m"; // #ce8e6d - embedded expressions
    const COMMENT: &str = "\x1b[38;5;244m";
    const STYLE: &str = "\x1b[38;5;103m";
    const RESET: &str = "\x1b[0m";

    let mut out = String::with_capacity(source.len() * 2);
    for segment in segments(source, tokens) {
        let (color, text) = match segment {
            Segment::Token(token) => {
                let color = match token.kind {
                    TokenKind::Tag => Some(TAG),
                    TokenKind::Attribute => Some(STRING),
                    TokenKind::Expression => Some(EXPRESSION),
                    TokenKind::Comment => Some(COMMENT),
                    TokenKind::Style => Some(STYLE),
                    TokenKind::Text => None,
                };
                (color, token.value.as_str())
            }
            Segment::Gap(range) => (Some(TAG), &source[range]),
        };

        match color {
            Some(color) => {
                out.push_str(color);
                out.push_str(text);
                out.push_str(RESET);
            }
            None => out.push_str(text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ContentType, tokenize};

    #[test]
    fn test_gaps_are_delimiters() {
        let source = "<p>${x}<!--c--></p>";
        let tokens = tokenize(source, ContentType::Html);
        let gaps: Vec<&str> = gaps(source, &tokens).into_iter().map(|r| &source[r]).collect();
        assert_eq!(gaps, vec!["<", ">${", "}<!--", "--><", ">"]);
    }

    #[test]
    fn test_reconstruct() {
        let source = "<a href=\"${url}\">${label}</a> trailing <";
        let tokens = tokenize(source, ContentType::Html);
        assert_eq!(reconstruct(source, &tokens), source);
    }

    #[test]
    fn test_highlight_keeps_text() {
        let source = "<b>hi</b>";
        let tokens = tokenize(source, ContentType::Html);
        let rendered = highlight(source, &tokens);
        assert!(rendered.contains("hi"));
        assert!(rendered.contains("\x1b[38;5;180mb\x1b[0m"));
        assert!(!rendered.contains("\x1b[38;5;180mhi"));
    }
}
