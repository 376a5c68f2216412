//! Statement parsers for the void language

use crate::ast::expression::Expression;
use crate::ast::span::SourceRange;
use crate::ast::statement::{Statement, VarDecl};
use crate::ast::ty::Type;
use crate::lexer::{lexeme, name, symbol};

use crate::parser::combinators::{BoxedParser, optional};

use super::expression::expression;
use super::ty::ty;

/// var_decl := type name ("=" expression)? ";"
pub fn var_decl() -> BoxedParser<Statement> {
    let initializer = optional(symbol("=") * expression());
    (((ty().label("type") + lexeme(name())) + initializer) - symbol(";"))
        ^ |((ty, name), initializer): ((Type, String), Option<Expression>),
           position: SourceRange| {
            Statement::VarDecl(VarDecl {
                ty,
                name,
                initializer,
                position,
            })
        }
}

/// statement := var_decl
pub fn statement() -> BoxedParser<Statement> {
    var_decl()
}
