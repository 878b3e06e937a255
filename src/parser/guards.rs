//! Transition guards.

use super::context::ParseContext;
use super::events::Event;

/// A quote closes the active string only if it repeats the opening delimiter.
pub fn is_matching_quote(ctx: &ParseContext, event: &Event) -> bool {
    matches!(event, Event::Quote(c) if ctx.string_delimiter == Some(*c))
}

/// A `}` closes the current expression only when no nested `${` is pending.
pub fn is_expression_complete(ctx: &ParseContext) -> bool {
    ctx.expression_depth == 0
}
