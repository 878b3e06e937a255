//! Tokenizer state machine.
//!
//! Consumes events from [`super::events`] and emits [`Token`]s. Every
//! `(state, event)` pair is resolved by [`transition`] into a target state
//! and a fixed list of [`Action`]s which are then applied to the
//! [`ParseContext`]. Events without a dedicated transition are literal content
//! of whatever is being accumulated.

use super::context::ParseContext;
use super::events::Event;
use super::guards::{is_expression_complete, is_matching_quote};
use super::token::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    InText,
    InTag,
    InAttributeString,
    InExpression,
    InExpressionString,
    /// `${...}` inside a tag, e.g. an attribute value
    InTagExpression,
    InComment,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Append,
    Save(TokenKind),
    IncrementDepth,
    DecrementDepth,
    StartExpression,
    EndExpression,
    IncrementExpressionDepth,
    DecrementExpressionDepth,
    SetStringDelimiter,
    ClearStringDelimiter,
}

use Action::*;

const APPEND: &[Action] = &[Append];
const NONE: &[Action] = &[];

const OPEN_TAG: &[Action] = &[Save(TokenKind::Text), IncrementDepth];
const OPEN_EXPRESSION: &[Action] = &[Save(TokenKind::Text), StartExpression];
const OPEN_COMMENT: &[Action] = &[Save(TokenKind::Text)];
const FLUSH_TEXT: &[Action] = &[Save(TokenKind::Text)];

const CLOSE_TAG: &[Action] = &[Save(TokenKind::Tag), DecrementDepth];
const OPEN_ATTRIBUTE: &[Action] = &[Save(TokenKind::Tag), Append, SetStringDelimiter];
const OPEN_TAG_EXPRESSION: &[Action] = &[Append, StartExpression];
const FLUSH_TAG: &[Action] = &[Save(TokenKind::Tag)];

const CLOSE_ATTRIBUTE: &[Action] = &[Append, Save(TokenKind::Attribute), ClearStringDelimiter];
const FLUSH_ATTRIBUTE: &[Action] = &[Save(TokenKind::Attribute)];

const CLOSE_EXPRESSION: &[Action] = &[Save(TokenKind::Expression), EndExpression];
const CLOSE_TAG_EXPRESSION: &[Action] = &[Append, EndExpression];
const NESTED_OPEN: &[Action] = &[Append, IncrementExpressionDepth];
const NESTED_CLOSE: &[Action] = &[Append, DecrementExpressionDepth];
const OPEN_STRING: &[Action] = &[Append, SetStringDelimiter];
const CLOSE_STRING: &[Action] = &[Append, ClearStringDelimiter];
const FLUSH_EXPRESSION: &[Action] = &[Save(TokenKind::Expression)];

const CLOSE_COMMENT: &[Action] = &[Save(TokenKind::Comment)];
const FLUSH_COMMENT: &[Action] = &[Save(TokenKind::Comment)];

/// Resolve the target state and actions for `event` in `state`.
pub fn transition(state: State, event: &Event, ctx: &ParseContext) -> (State, &'static [Action]) {
    match state {
        State::Idle | State::InText => match event {
            Event::TagStart => (State::InTag, OPEN_TAG),
            Event::ExpressionStart => (State::InExpression, OPEN_EXPRESSION),
            Event::CommentStart(_) => (State::InComment, OPEN_COMMENT),
            Event::Eof => (State::Done, FLUSH_TEXT),
            _ => (State::InText, APPEND),
        },

        State::InTag => match event {
            Event::TagEnd => (State::Idle, CLOSE_TAG),
            Event::Quote(_) => (State::InAttributeString, OPEN_ATTRIBUTE),
            Event::ExpressionStart => (State::InTagExpression, OPEN_TAG_EXPRESSION),
            Event::Eof => (State::Done, FLUSH_TAG),
            _ => (State::InTag, APPEND),
        },

        State::InAttributeString => match event {
            Event::Quote(_) if is_matching_quote(ctx, event) => (State::InTag, CLOSE_ATTRIBUTE),
            Event::Eof => (State::Done, FLUSH_ATTRIBUTE),
            _ => (State::InAttributeString, APPEND),
        },

        State::InExpression => match event {
            Event::ExpressionEnd if is_expression_complete(ctx) => (State::Idle, CLOSE_EXPRESSION),
            Event::ExpressionEnd => (State::InExpression, NESTED_CLOSE),
            Event::ExpressionStart => (State::InExpression, NESTED_OPEN),
            Event::Quote(_) => (State::InExpressionString, OPEN_STRING),
            Event::Eof => (State::Done, FLUSH_EXPRESSION),
            _ => (State::InExpression, APPEND),
        },

        State::InExpressionString => match event {
            Event::Quote(_) if is_matching_quote(ctx, event) => (State::InExpression, CLOSE_STRING),
            Event::Eof => (State::Done, FLUSH_EXPRESSION),
            _ => (State::InExpressionString, APPEND),
        },

        State::InTagExpression => match event {
            Event::ExpressionEnd if is_expression_complete(ctx) => (State::InTag, CLOSE_TAG_EXPRESSION),
            Event::ExpressionEnd => (State::InTagExpression, NESTED_CLOSE),
            Event::ExpressionStart => (State::InTagExpression, NESTED_OPEN),
            Event::Eof => (State::Done, FLUSH_TAG),
            _ => (State::InTagExpression, APPEND),
        },

        State::InComment => match event {
            Event::CommentEnd(_) => (State::Idle, CLOSE_COMMENT),
            Event::Eof => (State::Done, FLUSH_COMMENT),
            _ => (State::InComment, APPEND),
        },

        State::Done => (State::Done, NONE),
    }
}

fn apply(action: Action, ctx: &mut ParseContext, event: &Event) {
    match action {
        Append => ctx.append(event),
        Save(kind) => ctx.save_token(kind),
        IncrementDepth => ctx.depth += 1,
        DecrementDepth => ctx.depth = ctx.depth.saturating_sub(1),
        StartExpression => {
            ctx.in_expression = true;
            ctx.expression_depth = 0;
        }
        EndExpression => {
            ctx.in_expression = false;
            ctx.expression_depth = 0;
        }
        IncrementExpressionDepth => ctx.expression_depth += 1,
        DecrementExpressionDepth => ctx.expression_depth = ctx.expression_depth.saturating_sub(1),
        SetStringDelimiter => {
            if let Event::Quote(c) = event {
                ctx.string_delimiter = Some(*c);
            }
        }
        ClearStringDelimiter => ctx.string_delimiter = None,
    }
}

/// The tokenizer state machine with its per-run context
#[derive(Debug)]
pub struct Machine {
    state: State,
    ctx: ParseContext,
}

impl Machine {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            ctx: ParseContext::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn context(&self) -> &ParseContext {
        &self.ctx
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Feed one event
    pub fn step(&mut self, event: &Event) {
        let (next, actions) = transition(self.state, event, &self.ctx);
        tracing::trace!(from = ?self.state, ?event, to = ?next, "transition");

        for action in actions {
            apply(*action, &mut self.ctx, event);
        }
        self.ctx.advance(event);
        self.state = next;
    }

    /// Stop the run and hand out the emitted tokens. An event source that
    /// never sent `Eof` is terminated here so the pending token is flushed.
    pub fn finish(mut self) -> Vec<Token> {
        if !self.is_done() {
            self.step(&Event::Eof);
        }
        self.ctx.tokens
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a complete event sequence through a fresh machine.
pub fn run_machine<I>(events: I) -> Vec<Token>
where
    I: IntoIterator<Item = Event>,
{
    let mut machine = Machine::new();
    for event in events {
        machine.step(&event);
    }
    machine.finish()
}
