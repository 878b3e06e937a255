use super::events::Event;
use super::token::{Token, TokenKind};

/// Working memory of one tokenizer run.
///
/// Created fresh for every run and owned exclusively by its machine.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Text accumulated for the token being built
    pub current_token: String,
    /// Byte offset where `current_token` begins
    pub token_start: usize,
    /// Byte offset of the event being processed
    pub position: usize,
    /// Number of open tag contexts
    pub depth: usize,
    pub in_expression: bool,
    /// Nested `${` opened inside the current expression and not yet closed
    pub expression_depth: usize,
    /// Active quote character while inside a string
    pub string_delimiter: Option<char>,
    pub tokens: Vec<Token>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, event: &Event) {
        if self.current_token.is_empty() {
            self.token_start = self.position;
        }
        event.push_lexeme(&mut self.current_token);
    }

    /// Emit the accumulated text as a token of `kind`. No-op when nothing is
    /// accumulated.
    pub fn save_token(&mut self, kind: TokenKind) {
        if self.current_token.is_empty() {
            return;
        }
        let value = std::mem::take(&mut self.current_token);
        let start = self.token_start;
        let end = start + value.len();
        self.tokens.push(Token { kind, value, start, end, depth: self.depth });
    }

    pub fn advance(&mut self, event: &Event) {
        self.position += event.lexeme_len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_empty_is_noop() {
        let mut ctx = ParseContext::new();
        ctx.save_token(TokenKind::Text);
        assert!(ctx.tokens.is_empty());
    }

    #[test]
    fn test_token_offsets_follow_position() {
        let mut ctx = ParseContext::new();
        ctx.advance(&Event::TagStart);
        for c in "ab".chars() {
            let event = Event::Char(c);
            ctx.append(&event);
            ctx.advance(&event);
        }
        ctx.depth = 1;
        ctx.save_token(TokenKind::Tag);

        assert_eq!(ctx.tokens, vec![Token { kind: TokenKind::Tag, value: "ab".into(), start: 1, end: 3, depth: 1 }]);
        assert!(ctx.current_token.is_empty());
    }
}
