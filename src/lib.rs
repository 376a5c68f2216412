//! # voidlang - a parser for a minimal C-like declaration language
//!
//! voidlang turns source text such as `void * * x = 1 + 2 * y;` into an
//! abstract syntax tree annotated with source ranges, and renders that tree
//! back to canonical text.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Code (&str)
//!     ↓
//! [Lexical primitives] → characters, names, integers, whitespace
//!     ↓
//! [Combinators] → sequence, choice, repetition, labels, operator tiers
//!     ↓
//! [Grammar] → Statement / Expression / Type
//!     ↓
//! [Printer] → canonical text
//! ```
//!
//! There is no separate tokenizer: the grammar is scannerless, and every
//! lexical primitive is itself a parser over the remaining input.
//!
//! ## Module Structure
//!
//! - [`ast`] - Syntax tree definitions and source ranges
//! - [`lexer`] - Lexical primitives
//! - [`parser`] - Combinators, parse state, grammar and entry points
//! - [`fmt`] - Canonical printing
//!
//! ## Example
//!
//! ```
//! let stmt = voidlang::parse("void* p = 1 + 2 * 3;").unwrap();
//! assert_eq!(stmt.to_string(), "void* p = (1 + (2 * 3));");
//! ```

pub mod ast;
pub mod fmt;
pub mod lexer;
pub mod parser;

pub use parser::{
    ParseError, ParseResult, parse, parse_expression, parse_program, parse_statement, parse_type,
};
