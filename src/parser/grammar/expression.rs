//! Expression parsers for the void language
//!
//! Precedence is encoded by tiers: each tier is built from the next tighter
//! one, so `*`, `/` and `%` always bind before `+` and `-`, which bind before
//! shifts, comparisons, equality, `&&` and finally `||`.

use crate::ast::expression::{BinOpKind, BinaryExpr, Expression, UnaryExpr, UnaryOpKind};
use crate::ast::span::SourceRange;
use crate::lexer::symbol;

use crate::parser::combinators::{Associativity, BoxedParser, binary_tier, lazy, many, nested};

use super::literal::{identifier, integer};

fn op(kind: BinOpKind) -> BoxedParser<BinOpKind> {
    symbol(kind.symbol()) >> move |_: String| kind
}

fn prefix(kind: UnaryOpKind) -> BoxedParser<UnaryOpKind> {
    symbol(kind.symbol()) >> move |_: String| kind
}

fn binary(left: Expression, op: BinOpKind, right: Expression) -> Expression {
    Expression::Binary(BinaryExpr::new(left, op, right))
}

fn left_tier(
    operand: BoxedParser<Expression>,
    operator: BoxedParser<BinOpKind>,
) -> BoxedParser<Expression> {
    binary_tier(operand, operator, Associativity::Left, binary)
}

/// parenthesized := "(" expression ")"
fn parenthesized() -> BoxedParser<Expression> {
    (symbol("(") * nested(lazy(expression)) - symbol(")"))
        ^ |expr: Expression, position: SourceRange| expr.with_position(position)
}

/// atom := identifier | "(" expression ")" | integer
pub fn atom() -> BoxedParser<Expression> {
    // the alternatives start with disjoint characters; integer goes last so
    // an out-of-range literal is the failure the label sees
    (identifier() | parenthesized() | integer()).label("expression")
}

/// unary := ("!" | "&" | "*")* atom
fn unary_expr() -> BoxedParser<Expression> {
    let operator = (prefix(UnaryOpKind::Not)
        | prefix(UnaryOpKind::AddressOf)
        | prefix(UnaryOpKind::Deref))
        ^ |kind: UnaryOpKind, position: SourceRange| (kind, position);

    (many(operator) + atom())
        >> |(prefixes, operand): (Vec<(UnaryOpKind, SourceRange)>, Expression)| {
            prefixes.into_iter().rev().fold(operand, |operand, (kind, position)| {
                Expression::Unary(UnaryExpr::new(kind, position, operand))
            })
        }
}

/// multiplicative := unary (("*" | "/" | "%") unary)*
fn multiplicative_expr() -> BoxedParser<Expression> {
    left_tier(
        unary_expr(),
        op(BinOpKind::Mul) | op(BinOpKind::Div) | op(BinOpKind::Mod),
    )
}

/// additive := multiplicative (("+" | "-") multiplicative)*
fn additive_expr() -> BoxedParser<Expression> {
    left_tier(multiplicative_expr(), op(BinOpKind::Add) | op(BinOpKind::Sub))
}

/// shift := additive (("<<" | ">>") additive)*
fn shift_expr() -> BoxedParser<Expression> {
    left_tier(additive_expr(), op(BinOpKind::Shl) | op(BinOpKind::Shr))
}

/// comparison := shift (("<=" | "<" | ">=" | ">") shift)*
fn comparison_expr() -> BoxedParser<Expression> {
    // two-character operators first, so `<=` is not read as `<`
    left_tier(
        shift_expr(),
        op(BinOpKind::Le) | op(BinOpKind::Lt) | op(BinOpKind::Ge) | op(BinOpKind::Gt),
    )
}

/// equality := comparison (("==" | "!=") comparison)*
fn equality_expr() -> BoxedParser<Expression> {
    left_tier(comparison_expr(), op(BinOpKind::Eq) | op(BinOpKind::Ne))
}

/// logical_and := equality ("&&" equality)*
fn logical_and_expr() -> BoxedParser<Expression> {
    left_tier(equality_expr(), op(BinOpKind::And))
}

/// logical_or := logical_and ("||" logical_and)*
fn logical_or_expr() -> BoxedParser<Expression> {
    left_tier(logical_and_expr(), op(BinOpKind::Or))
}

/// expression := logical_or
pub fn expression() -> BoxedParser<Expression> {
    logical_or_expr().label("expression")
}
