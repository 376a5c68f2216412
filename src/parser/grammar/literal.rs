//! Literal parsers for the void language

use crate::ast::expression::{Expression, Identifier, IntLiteral};
use crate::ast::span::SourceRange;
use crate::lexer::{lexeme, name, signed_integer};

use crate::parser::combinators::BoxedParser;
use crate::parser::state::ParseError;

/// identifier := name
pub fn identifier() -> BoxedParser<Expression> {
    lexeme(name())
        ^ |name: String, position: SourceRange| {
            Expression::Identifier(Identifier { name, position })
        }
}

/// integer := signed_integer, within the range of i64
pub fn integer() -> BoxedParser<Expression> {
    lexeme(signed_integer()).try_map_with_span(|text: String, position: SourceRange| {
        match text.parse::<i64>() {
            Ok(value) => Ok(Expression::IntLiteral(IntLiteral { value, position })),
            Err(_) => Err(ParseError::new("integer literal out of range")
                .relabel(format!("integer between {} and {}", i64::MIN, i64::MAX))
                .found(text)
                .at(position.start)),
        }
    })
}
