//! Lexical primitives
//!
//! The grammar is scannerless: instead of producing a token stream up front,
//! each primitive matches a prefix of the remaining input directly. Every
//! primitive consumes nothing when it fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::parser::combinators::BoxedParser;
use crate::parser::state::{ParseState, Parser};

const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z_][0-9a-zA-Z_]*";

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"));

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Match a single character satisfying `predicate`.
pub fn satisfy<F: Fn(char) -> bool + 'static>(
    predicate: F,
    expected: impl Into<String>,
) -> BoxedParser<String> {
    let expected = expected.into();
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(c) if predicate(c) => {
            state.advance(c.len_utf8());
            Ok(c.to_string())
        }
        _ => Err(state.fail(&[expected.as_str()])),
    })
}

/// Match exactly the character `expected`.
pub fn character(expected: char) -> BoxedParser<String> {
    satisfy(move |c| c == expected, format!("{expected:?}"))
}

/// Match any one character from `set`.
pub fn one_of(set: &'static str) -> BoxedParser<String> {
    let descriptions: Vec<String> = set.chars().map(|c| format!("{c:?}")).collect();
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(c) if set.contains(c) => {
            state.advance(c.len_utf8());
            Ok(c.to_string())
        }
        _ => {
            let expected: Vec<&str> = descriptions.iter().map(String::as_str).collect();
            Err(state.fail(&expected))
        }
    })
}

/// Match a fixed string.
pub fn literal(text: &'static str) -> BoxedParser<String> {
    let description = format!("'{text}'");
    BoxedParser::new(move |state: &mut ParseState| {
        if state.remaining().starts_with(text) {
            state.advance(text.len());
            Ok(text.to_string())
        } else {
            Err(state.fail(&[description.as_str()]))
        }
    })
}

/// Match a reserved word, which must not run on into an identifier.
pub fn keyword(word: &'static str) -> BoxedParser<String> {
    let description = format!("'{word}'");
    BoxedParser::new(move |state: &mut ParseState| {
        let rest = state.remaining();
        let boundary = rest
            .strip_prefix(word)
            .map(|after| !after.starts_with(is_identifier_char));
        if boundary == Some(true) {
            state.advance(word.len());
            Ok(word.to_string())
        } else {
            Err(state.fail(&[description.as_str()]))
        }
    })
}

/// Match a regular expression at the cursor.
///
/// Only a match starting exactly at the cursor counts. Patterns should begin
/// with `^` so that a failed match does not scan the rest of the input.
pub fn regex(pattern: &Regex, expected: &'static str) -> BoxedParser<String> {
    let pattern = pattern.clone();
    BoxedParser::new(move |state: &mut ParseState| {
        let matched = pattern
            .find(state.remaining())
            .filter(|m| m.start() == 0)
            .map(|m| m.as_str().to_string());
        match matched {
            Some(text) => {
                state.advance(text.len());
                Ok(text)
            }
            None => Err(state.fail(&[expected])),
        }
    })
}

/// name := [a-zA-Z_][0-9a-zA-Z_]*
pub fn name() -> BoxedParser<String> {
    regex(&IDENTIFIER, "identifier")
}

/// Zero or more whitespace characters; never fails.
pub fn whitespace() -> BoxedParser<String> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = state.position();
        let end = state.skip_whitespace_from(start);
        state.advance(end - start);
        Ok(state.source()[start..end].to_string())
    })
}

/// signed_integer := ("+" | "-")? [0-9]+
pub fn signed_integer() -> BoxedParser<String> {
    BoxedParser::new(|state: &mut ParseState| {
        let rest = state.remaining();
        let sign = match rest.chars().next() {
            Some('+' | '-') => 1,
            _ => 0,
        };
        let digits = rest[sign..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Err(state.fail(&["integer literal"]));
        }
        let text = rest[..sign + digits].to_string();
        state.advance(text.len());
        Ok(text)
    })
}

/// Skip leading whitespace, then run `parser`.
///
/// The whitespace is given back if `parser` fails.
pub fn lexeme<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<T> {
    BoxedParser::new(move |state: &mut ParseState| {
        let pos = state.position();
        state.restore(state.skip_whitespace_from(pos));
        match parser.parse(state) {
            Ok(value) => Ok(value),
            Err(err) => {
                state.restore(pos);
                Err(err)
            }
        }
    })
}

/// A fixed string with optional leading whitespace.
pub fn symbol(text: &'static str) -> BoxedParser<String> {
    lexeme(literal(text))
}
