//! Type parsers for the void language

use crate::ast::ty::Type;
use crate::lexer::{keyword, lexeme, symbol};

use crate::parser::combinators::{BoxedParser, many};

/// type := "void" ("*")*
///
/// Every `*` wraps the type built so far, so `void * *` is a pointer to a
/// pointer to void.
pub fn ty() -> BoxedParser<Type> {
    (lexeme(keyword("void")) + many(symbol("*")))
        >> |(_, stars): (String, Vec<String>)| {
            stars.iter().fold(Type::Void, |pointee, _| Type::pointer(pointee))
        }
}
