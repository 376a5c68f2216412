use std::cell::OnceCell;
use std::ops::{Add, BitOr, BitXor, Mul, Shr, Sub};
use std::rc::Rc;

use crate::ast::span::SourceRange;

use super::state::{ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<(T, U)> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let b = other.parse(state)?;
            Ok((a, b))
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let _ = other.parse(state)?;
            Ok(a)
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let _ = self.parse(state)?;
            other.parse(state)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Map with the source range this parser consumed
    pub fn map_with_span<U: 'static, F: Fn(T, SourceRange) -> U + 'static>(
        self,
        f: F,
    ) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let a = self.parse(state)?;
            Ok(f(a, state.range_from(start)))
        })
    }

    /// Like `map_with_span`, but the mapping may reject the value
    pub fn try_map_with_span<U: 'static, F>(self, f: F) -> BoxedParser<U>
    where
        F: Fn(T, SourceRange) -> ParseResult<U> + 'static,
    {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.position();
            let a = self.parse(state)?;
            let range = state.range_from(start);
            match f(a, range) {
                Ok(value) => Ok(value),
                Err(err) => {
                    state.restore(start);
                    state.record_error(err.clone());
                    Err(err)
                }
            }
        })
    }

    /// Choice: try self, if fails try other from the same position
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    // Error is already recorded in state by the parser
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Add a label to this parser for better error messages
    ///
    /// Only unlabeled failures at the start of the construct are relabeled, so
    /// the innermost label wins and a failure deeper inside keeps its more
    /// precise description.
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let start = state.skip_whitespace_from(state.position());
            match self.parse(state) {
                Ok(v) => Ok(v),
                Err(err) if !err.labeled && err.offset <= start => {
                    let err = err.relabel(name);
                    state.record_error(err.clone());
                    Err(err)
                }
                Err(err) => Err(err),
            }
        })
    }

    pub fn many(self) -> BoxedParser<Vec<T>> {
        many(self)
    }

    pub fn optional(self) -> BoxedParser<Option<T>> {
        optional(self)
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<(T, U)>;

    fn add(self, rhs: BoxedParser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

/// `^` for map with range: A ^ fn(a, range) -> B
impl<T: 'static, U: 'static, F: Fn(T, SourceRange) -> U + 'static> BitXor<F> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn bitxor(self, f: F) -> Self::Output {
        self.map_with_span(f)
    }
}

// === Repetition and friends ===

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                // no progress means the next round would match the same thing again
                Ok(_) if state.position() == pos => break,
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Optional: parse zero or one
pub fn optional<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Option<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        match parser.parse(state) {
            Ok(item) => Ok(Some(item)),
            Err(_) => {
                state.restore(pos);
                Ok(None)
            }
        }
    })
}

/// Build the parser on first use, for grammars that refer to themselves
///
/// The built parser is kept and reused by every later run.
pub fn lazy<T: 'static, F: Fn() -> BoxedParser<T> + 'static>(f: F) -> BoxedParser<T> {
    let built: OnceCell<BoxedParser<T>> = OnceCell::new();
    BoxedParser::new(move |state: &mut ParseState| built.get_or_init(&f).parse(state))
}

/// Run `parser` one nesting level deeper
///
/// Fails with "nesting too deep" instead of recursing past the nesting limit.
pub fn nested<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        state.enter_nesting()?;
        let result = parser.parse(state);
        state.leave_nesting();
        result
    })
}

/// Succeeds only when all input has been consumed
pub fn end_of_input() -> BoxedParser<()> {
    BoxedParser::new(|state: &mut ParseState| {
        if state.has_next() {
            Err(state.fail(&["end of input"]))
        } else {
            Ok(())
        }
    })
}

// === Operator tiers ===

/// How a chain of same-tier operators groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`
    Left,
    /// `a = b = c` is `a = (b = c)`
    Right,
}

/// tier := operand (operator operand)*
///
/// One precedence level of binary operators. Tighter-binding tiers are built
/// first and passed in as `operand`.
pub fn binary_tier<T, O, F>(
    operand: BoxedParser<T>,
    operator: BoxedParser<O>,
    associativity: Associativity,
    build: F,
) -> BoxedParser<T>
where
    T: 'static,
    O: 'static,
    F: Fn(T, O, T) -> T + 'static,
{
    let rest = many(operator + operand.clone());
    (operand + rest)
        >> move |(first, rest): (T, Vec<(O, T)>)| match associativity {
            Associativity::Left => rest
                .into_iter()
                .fold(first, |left, (op, right)| build(left, op, right)),
            Associativity::Right => fold_right(first, rest, &build),
        }
}

fn fold_right<T, O>(first: T, rest: Vec<(O, T)>, build: &impl Fn(T, O, T) -> T) -> T {
    let mut rest = rest.into_iter().rev();
    let Some((mut op, mut acc)) = rest.next() else {
        return first;
    };
    for (prev_op, operand) in rest {
        acc = build(operand, op, acc);
        op = prev_op;
    }
    build(first, op, acc)
}
