//! Canonical printer for void source
//!
//! Binary expressions are always fully parenthesized, so the printed form
//! makes the parsed precedence explicit no matter how the input was written.
//! Prefix operators are printed directly in front of their operand.

use std::fmt::{self, Display};

use crate::ast::{
    Program,
    expression::{BinOpKind, BinaryExpr, Expression, UnaryOpKind},
    statement::{Statement, VarDecl},
    ty::Type,
};

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("void")?;
        for _ in 0..self.pointer_depth() {
            f.write_str("*")?;
        }
        Ok(())
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Display for UnaryOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Output still to be written, innermost last
enum Piece<'a> {
    Expr(&'a Expression),
    Binary(&'a BinaryExpr),
    Text(&'static str),
}

/// Write expression trees without recursing, so deep chains print fine.
fn write_pieces(f: &mut fmt::Formatter<'_>, mut pending: Vec<Piece<'_>>) -> fmt::Result {
    while let Some(piece) = pending.pop() {
        match piece {
            Piece::Text(text) => f.write_str(text)?,
            Piece::Expr(Expression::IntLiteral(lit)) => write!(f, "{}", lit.value)?,
            Piece::Expr(Expression::Identifier(ident)) => f.write_str(&ident.name)?,
            Piece::Expr(Expression::Unary(unary)) => {
                f.write_str(unary.op.symbol())?;
                pending.push(Piece::Expr(unary.operand.as_ref()));
            }
            Piece::Expr(Expression::Binary(bin)) | Piece::Binary(bin) => {
                f.write_str("(")?;
                pending.push(Piece::Text(")"));
                pending.push(Piece::Expr(bin.right.as_ref()));
                pending.push(Piece::Text(" "));
                pending.push(Piece::Text(bin.op.symbol()));
                pending.push(Piece::Text(" "));
                pending.push(Piece::Expr(bin.left.as_ref()));
            }
        }
    }
    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pieces(f, vec![Piece::Expr(self)])
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pieces(f, vec![Piece::Binary(self)])
    }
}

impl Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(init) = &self.initializer {
            write!(f, " = {init}")?;
        }
        f.write_str(";")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::VarDecl(decl) => Display::fmt(decl, f),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{stmt}")?;
        }
        Ok(())
    }
}
