pub mod combinators;
mod grammar;
pub mod state;

pub use combinators::*;
pub use grammar::*;
pub use state::{MAX_NESTING, ParseError, ParseResult, ParseState, Parser};
