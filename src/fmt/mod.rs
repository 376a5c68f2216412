//! Code formatting for void
//!
//! This module provides the `Display` implementations that render the AST
//! back to canonical source text.

pub mod surface;
