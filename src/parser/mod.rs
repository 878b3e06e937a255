pub mod context;
pub mod events;
pub mod guards;
pub mod machine;
pub mod positions;
pub mod token;

pub use context::ParseContext;
pub use events::{CommentSyntax, ContentType, Event, generate_events};
pub use machine::{Action, Machine, State, run_machine, transition};
pub use token::{Token, TokenKind};
