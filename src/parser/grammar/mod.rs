//! Grammar module for the void language
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: identifiers and integer literals
//! - `ty`: `void` and pointer types
//! - `expression`: atoms, prefix operators and the precedence tiers
//! - `statement`: variable declarations

mod expression;
mod literal;
mod statement;
mod ty;

use crate::ast::{Expression, Program, Statement, Type};
use crate::lexer::lexeme;

use super::combinators::{BoxedParser, end_of_input, many};
use super::state::{ParseResult, ParseState, Parser};

pub use expression::{atom, expression};
pub use literal::{identifier, integer};
pub use statement::{statement, var_decl};
pub use ty::ty;

/// program := statement*
pub fn program() -> BoxedParser<Program> {
    many(statement()) >> |statements: Vec<Statement>| Program { statements }
}

/// Run `parser` over the whole of `source`.
///
/// Surrounding whitespace is allowed; anything else left over is an error.
/// On failure the furthest failure seen anywhere in the input is reported.
fn parse_all<T: 'static>(parser: BoxedParser<T>, source: &str, what: &str) -> ParseResult<T> {
    log::debug!("parsing {what} from {} bytes of input", source.len());

    let mut state = ParseState::new(source);
    let parser = parser - lexeme(end_of_input());

    match parser.parse(&mut state) {
        Ok(value) => {
            log::debug!("parsed {what}");
            Ok(value)
        }
        Err(err) => {
            let err = state
                .take_furthest_error()
                .unwrap_or_else(|| state.locate(err));
            log::debug!("failed to parse {what}: {err}");
            Err(err)
        }
    }
}

/// Parse a single declaration, e.g. `void * x = 1 + 2;`
pub fn parse(source: &str) -> ParseResult<Statement> {
    parse_all(statement(), source, "statement")
}

pub fn parse_statement(source: &str) -> ParseResult<Statement> {
    parse(source)
}

pub fn parse_expression(source: &str) -> ParseResult<Expression> {
    parse_all(expression(), source, "expression")
}

pub fn parse_type(source: &str) -> ParseResult<Type> {
    parse_all(ty().label("type"), source, "type")
}

/// Parse any number of declarations
pub fn parse_program(source: &str) -> ParseResult<Program> {
    parse_all(program(), source, "program")
}
