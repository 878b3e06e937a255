//! Tokenizer for the content of `html` and `css` tagged template literals.
//!
//! [`tokenize`] turns template content into a flat, source-ordered list of
//! [`Token`]s (tags, text, embedded `${...}` expressions, quoted attribute
//! values and comments). It never fails: unterminated constructs are flushed
//! as best-effort tokens at end of input.
//!
//! ```
//! use template_tokenizer::{ContentType, TokenKind, tokenize};
//!
//! let tokens = tokenize("<div>Hi</div>", ContentType::Html);
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [TokenKind::Tag, TokenKind::Text, TokenKind::Tag]);
//! ```

pub mod error;
pub mod extract;
pub mod parser;
pub mod render;

pub use error::{Error, Result};
pub use extract::{TemplateLiteral, extract_templates};
pub use parser::{ContentType, Token, TokenKind};

use parser::{generate_events, run_machine};

/// Tokenize one complete piece of template content.
///
/// Each call owns its own parse state, so calls may run concurrently.
pub fn tokenize(content: &str, content_type: ContentType) -> Vec<Token> {
    let events = generate_events(content, content_type);
    let event_count = events.len();
    let tokens = run_machine(events);
    tracing::debug!(%content_type, bytes = content.len(), events = event_count, tokens = tokens.len(), "tokenized");
    tokens
}

/// Alias of [`tokenize`] under the name used by template tooling.
pub fn tokenize_template_content(content: &str, content_type: ContentType) -> Vec<Token> {
    tokenize(content, content_type)
}

/// Tokens of one template literal, with offsets into the enclosing file
#[derive(Debug, Clone)]
pub struct TemplateTokens<'a> {
    pub template: TemplateLiteral<'a>,
    pub tokens: Vec<Token>,
}

/// Find every tagged template literal in script `source` and tokenize it.
pub fn tokenize_templates(source: &str) -> Vec<TemplateTokens<'_>> {
    extract_templates(source)
        .into_iter()
        .map(|template| {
            let tokens = tokenize(template.content, template.content_type)
                .into_iter()
                .map(|token| token.shifted(template.start))
                .collect();
            TemplateTokens { template, tokens }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(tokens: &[Token]) -> Vec<(TokenKind, &str, usize, usize, usize)> {
        tokens
            .iter()
            .map(|t| (t.kind, t.value.as_str(), t.start, t.end, t.depth))
            .collect()
    }

    #[test]
    fn test_empty() {
        assert!(tokenize("", ContentType::Html).is_empty());
        assert!(tokenize("", ContentType::Css).is_empty());
    }

    #[test]
    fn test_simple_element() {
        let tokens = tokenize("<div>Hi</div>", ContentType::Html);
        assert_eq!(
            summary(&tokens),
            vec![
                (TokenKind::Tag, "div", 1, 4, 1),
                (TokenKind::Text, "Hi", 5, 7, 0),
                (TokenKind::Tag, "/div", 8, 12, 1),
            ]
        );
    }

    #[test]
    fn test_alias_matches() {
        let source = "<p class=\"a\">${b}</p>";
        assert_eq!(tokenize_template_content(source, ContentType::Html), tokenize(source, ContentType::Html));
    }

    #[test]
    fn test_quote_matching() {
        let tokens = tokenize("<div data-x=\"it's a test\">", ContentType::Html);
        assert_eq!(
            summary(&tokens),
            vec![
                (TokenKind::Tag, "div data-x=", 1, 12, 1),
                (TokenKind::Attribute, "\"it's a test\"", 12, 25, 1),
            ]
        );
    }

    #[test]
    fn test_expression_without_nesting() {
        let tokens = tokenize("${ a + (b ? 1 : 2) }", ContentType::Html);
        assert_eq!(summary(&tokens), vec![(TokenKind::Expression, " a + (b ? 1 : 2) ", 2, 19, 0)]);
    }

    #[test]
    fn test_expression_with_nested_substitution() {
        let tokens = tokenize("${ fn(${x}) }", ContentType::Html);
        assert_eq!(summary(&tokens), vec![(TokenKind::Expression, " fn(${x}) ", 2, 12, 0)]);
    }

    #[test]
    fn test_bare_brace_closes_expression() {
        // Only `${` opens a nesting level, so the object literal's `}` ends
        // the expression early.
        let tokens = tokenize("${ f({a: 1}) }", ContentType::Html);
        assert_eq!(
            summary(&tokens),
            vec![
                (TokenKind::Expression, " f({a: 1", 2, 10, 0),
                (TokenKind::Text, ") }", 11, 14, 0),
            ]
        );
    }

    #[test]
    fn test_brace_inside_expression_string() {
        let tokens = tokenize("${ \"}\" }", ContentType::Css);
        assert_eq!(summary(&tokens), vec![(TokenKind::Expression, " \"}\" ", 2, 7, 0)]);
    }

    #[test]
    fn test_tag_expression_stays_in_tag() {
        let tokens = tokenize("<img src=${src}>", ContentType::Html);
        assert_eq!(summary(&tokens), vec![(TokenKind::Tag, "img src=${src}", 1, 15, 1)]);
    }

    #[test]
    fn test_unbalanced_close_tags() {
        let tokens = tokenize("</div></div>", ContentType::Html);
        assert_eq!(
            summary(&tokens),
            vec![(TokenKind::Tag, "/div", 1, 5, 1), (TokenKind::Tag, "/div", 7, 11, 1)]
        );
    }

    #[test]
    fn test_css_comment_and_expression() {
        let tokens = tokenize("a { color: ${c}; } /* note */", ContentType::Css);
        assert_eq!(
            summary(&tokens),
            vec![
                (TokenKind::Text, "a { color: ", 0, 11, 0),
                (TokenKind::Expression, "c", 13, 14, 0),
                (TokenKind::Text, "; } ", 15, 19, 0),
                (TokenKind::Comment, " note ", 21, 27, 0),
            ]
        );
    }

    #[test]
    fn test_tokenize_templates_shifts_offsets() {
        let source = "const t = html`<b>${x}</b>`;";
        let found = tokenize_templates(source);
        assert_eq!(found.len(), 1);
        for token in &found[0].tokens {
            assert_eq!(&source[token.span()], token.value);
        }
        let expression = found[0].tokens.iter().find(|t| t.kind == TokenKind::Expression).unwrap();
        assert_eq!(expression.value, "x");
        assert_eq!(expression.start, 20);
    }
}
