//! Discovery of tagged template literals (``html`...` `` and ``css`...` ``)
//! in script source.
//!
//! This is a scanner, not a JavaScript parser: string literals and comments
//! outside of templates are not skipped, so a tag spelled inside a plain
//! string is picked up too.

use crate::parser::ContentType;

/// A template literal body found in script source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLiteral<'a> {
    pub content_type: ContentType,
    /// Byte offset just past the opening backtick
    pub start: usize,
    /// Byte offset of the closing backtick, or the source length when the
    /// literal is unterminated
    pub end: usize,
    pub content: &'a str,
}

const TAGS: &[(&[u8], ContentType)] = &[(b"html`", ContentType::Html), (b"css`", ContentType::Css)];

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Tag starting at `i`, with the length of the tag including its backtick
fn tag_at(bytes: &[u8], i: usize) -> Option<(ContentType, usize)> {
    if i > 0 && is_ident_byte(bytes[i - 1]) {
        return None;
    }
    TAGS.iter()
        .find(|(tag, _)| bytes[i..].starts_with(tag))
        .map(|(tag, content_type)| (*content_type, tag.len()))
}

/// Where the scan currently is, innermost last
#[derive(Debug, Clone, Copy)]
enum Frame {
    Template,
    /// Inside `${...}`, with the count of plain `{` still open
    Substitution { braces: usize },
}

/// Index of the backtick closing a template body starting at `i`.
///
/// Nested substitutions and template literals are tracked on an explicit
/// stack, so nesting depth is bounded by memory only.
fn find_template_end(bytes: &[u8], mut i: usize) -> usize {
    let mut stack = vec![Frame::Template];

    while i < bytes.len() {
        let Some(&frame) = stack.last() else {
            break;
        };
        let top = stack.len() - 1;

        match (frame, bytes[i]) {
            (Frame::Template, b'\\') => i += 2,
            (Frame::Template, b'`') => {
                stack.pop();
                if stack.is_empty() {
                    return i;
                }
                i += 1;
            }
            (Frame::Template, b'$') if bytes.get(i + 1) == Some(&b'{') => {
                stack.push(Frame::Substitution { braces: 0 });
                i += 2;
            }
            (Frame::Template, _) => i += 1,
            (Frame::Substitution { braces }, b'{') => {
                stack[top] = Frame::Substitution { braces: braces + 1 };
                i += 1;
            }
            (Frame::Substitution { braces: 0 }, b'}') => {
                stack.pop();
                i += 1;
            }
            (Frame::Substitution { braces }, b'}') => {
                stack[top] = Frame::Substitution { braces: braces - 1 };
                i += 1;
            }
            (Frame::Substitution { .. }, b'`') => {
                stack.push(Frame::Template);
                i += 1;
            }
            (Frame::Substitution { .. }, b'"' | b'\'') => i = skip_string(bytes, i),
            (Frame::Substitution { .. }, _) => i += 1,
        }
    }

    bytes.len()
}

/// Index just past a single- or double-quoted string starting at `i`
fn skip_string(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return j,
            b if b == quote => return j + 1,
            _ => j += 1,
        }
    }
    bytes.len()
}

/// Find every tagged template literal in `source`, in source order.
pub fn extract_templates(source: &str) -> Vec<TemplateLiteral<'_>> {
    let bytes = source.as_bytes();
    let mut templates = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let Some((content_type, tag_len)) = tag_at(bytes, i) else {
            i += 1;
            continue;
        };

        let start = i + tag_len;
        let end = find_template_end(bytes, start).min(bytes.len());
        tracing::debug!(%content_type, start, end, "found template literal");
        templates.push(TemplateLiteral {
            content_type,
            start,
            end,
            content: &source[start..end],
        });
        i = end + 1;
    }

    templates
}
