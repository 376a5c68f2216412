pub mod expression;
pub mod span;
pub mod statement;
pub mod ty;

pub use expression::{
    BinOpKind, BinaryExpr, Expression, Identifier, IntLiteral, UnaryExpr, UnaryOpKind,
};
pub use span::{SourcePos, SourceRange};
pub use statement::{Statement, VarDecl};
pub use ty::Type;

/// A sequence of declarations, in source order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}
