use thiserror::Error;

use crate::ast::span::{SourcePos, SourceRange};

/// A single parse failure: what was expected, what was found, and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}{}", detail(.expected, .found))]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    /// Byte offset at which matching stopped
    pub offset: usize,
    /// Line and column of `offset`, filled in by [`ParseState::locate`]
    pub position: SourcePos,
    /// Set once a labeled combinator has named the expected construct
    pub labeled: bool,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: Vec::new(),
            found: None,
            offset: 0,
            position: SourcePos { line: 1, column: 1 },
            labeled: false,
        }
    }

    pub fn expected(mut self, what: impl Into<String>) -> Self {
        self.expected.push(what.into());
        self
    }

    pub fn found(mut self, what: impl Into<String>) -> Self {
        self.found = Some(what.into());
        self
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Replace the expected set with a single construct name.
    pub fn relabel(mut self, name: impl Into<String>) -> Self {
        self.expected = vec![name.into()];
        self.labeled = true;
        self
    }

    /// Render the error together with the offending source line and a caret.
    pub fn render(&self, source: &str) -> String {
        let line_text = source.lines().nth(self.position.line - 1).unwrap_or("");
        let gutter = self.position.line.to_string();
        let pad = " ".repeat(gutter.len());
        format!(
            "error: {}\n{pad} --> {}\n{pad} |\n{gutter} | {line_text}\n{pad} | {}^",
            self,
            self.position,
            " ".repeat(self.position.column - 1),
        )
    }

    fn absorb(&mut self, other: ParseError) {
        for what in other.expected {
            if !self.expected.contains(&what) {
                self.expected.push(what);
            }
        }
    }
}

fn detail(expected: &[String], found: &Option<String>) -> String {
    let mut out = match expected {
        [] => String::new(),
        [single] => format!(": expected {single}"),
        many => format!(": expected one of {}", many.join(", ")),
    };
    if let Some(found) = found {
        out.push_str(&format!(", found {found}"));
    }
    out
}

pub type ParseResult<T> = Result<T, ParseError>;

/// The input being parsed and the cursor into it.
pub struct ParseState {
    source: String,
    offset: usize,
    nesting: usize,
    furthest: Option<ParseError>,
}

/// How many constructs may be open inside each other at once
pub const MAX_NESTING: usize = 64;

impl ParseState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            offset: 0,
            nesting: 0,
            furthest: None,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The input not yet consumed.
    pub fn remaining(&self) -> &str {
        &self.source[self.offset..]
    }

    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub fn has_next(&self) -> bool {
        self.offset < self.source.len()
    }

    /// Move the cursor forward by `len` bytes.
    pub fn advance(&mut self, len: usize) {
        self.offset = (self.offset + len).min(self.source.len());
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn restore(&mut self, position: usize) {
        self.offset = position;
    }

    /// First offset at or after `from` that is not whitespace.
    pub fn skip_whitespace_from(&self, from: usize) -> usize {
        let rest = &self.source[from..];
        from + (rest.len() - rest.trim_start().len())
    }

    /// The range consumed since `start`, without surrounding whitespace.
    pub fn range_from(&self, start: usize) -> SourceRange {
        let start = self.skip_whitespace_from(start).min(self.offset);
        let consumed = &self.source[start..self.offset];
        SourceRange::new(start, start + consumed.trim_end().len())
    }

    /// Resolve the line and column of an error.
    ///
    /// Failures are cheap to build because only their offset is known; this
    /// is done once for the error that gets reported.
    pub fn locate(&self, err: ParseError) -> ParseError {
        let position = SourcePos::from_offset(&self.source, err.offset);
        ParseError { position, ..err }
    }

    /// An error at the cursor, describing what is there.
    pub fn error_here(&self, msg: impl Into<String>) -> ParseError {
        let err = ParseError::new(msg).at(self.offset);
        match self.peek() {
            Some(c) => err.found(format!("{c:?}")),
            None => err,
        }
    }

    /// Build a "no match" error at the cursor, record it and return it.
    pub fn fail(&mut self, expected: &[&str]) -> ParseError {
        let msg = if self.has_next() {
            "unexpected input"
        } else {
            "unexpected end of input"
        };
        let err = expected
            .iter()
            .fold(self.error_here(msg), |err, what| err.expected(*what));
        self.record_error(err.clone());
        err
    }

    /// Keep track of the failure that got furthest into the input.
    ///
    /// Failures at the same offset are merged, except that a labeled failure
    /// supersedes unlabeled ones.
    pub fn record_error(&mut self, err: ParseError) {
        match &mut self.furthest {
            Some(current) if err.offset < current.offset => return,
            Some(current) if err.offset == current.offset => {
                if err.labeled && !current.labeled {
                    *current = err;
                } else if err.labeled == current.labeled {
                    current.absorb(err);
                }
                return;
            }
            _ => {}
        }
        self.furthest = Some(err);
    }

    pub fn furthest_error(&self) -> Option<&ParseError> {
        self.furthest.as_ref()
    }

    /// The furthest failure, with its line and column resolved.
    pub fn take_furthest_error(&mut self) -> Option<ParseError> {
        let err = self.furthest.take()?;
        Some(self.locate(err))
    }

    /// Open one more level of nesting, failing once [`MAX_NESTING`] levels are open.
    pub fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.nesting >= MAX_NESTING {
            let err = self
                .error_here("nesting too deep")
                .relabel(format!("at most {MAX_NESTING} levels of nesting"));
            self.record_error(err.clone());
            return Err(err);
        }
        self.nesting += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_from_trims_whitespace() {
        let mut state = ParseState::new("  abc  ;");
        state.advance(7);
        assert_eq!(state.range_from(0), SourceRange::new(2, 5));
    }

    #[test]
    fn test_range_from_empty_consumption() {
        let state = ParseState::new("   x");
        assert_eq!(state.range_from(0), SourceRange::new(0, 0));
    }

    #[test]
    fn test_furthest_error_wins() {
        let mut state = ParseState::new("abcdef");
        state.advance(1);
        state.fail(&["'x'"]);
        state.advance(2);
        state.fail(&["'y'"]);
        state.restore(0);
        state.fail(&["'z'"]);

        let err = state.furthest_error().unwrap();
        assert_eq!(err.offset, 3);
        assert_eq!(err.expected, vec!["'y'".to_string()]);
    }

    #[test]
    fn test_same_offset_errors_merge() {
        let mut state = ParseState::new("abc");
        state.fail(&["'x'"]);
        state.fail(&["'y'", "'x'"]);

        let err = state.furthest_error().unwrap();
        assert_eq!(err.expected, vec!["'x'".to_string(), "'y'".to_string()]);
    }

    #[test]
    fn test_labeled_error_supersedes_unlabeled() {
        let mut state = ParseState::new("abc");
        let err = state.fail(&["identifier"]);
        state.record_error(err.relabel("expression"));
        state.fail(&["'('"]);

        let err = state.furthest_error().unwrap();
        assert!(err.labeled);
        assert_eq!(err.expected, vec!["expression".to_string()]);
    }

    #[test]
    fn test_error_display() {
        let mut state = ParseState::new("void x = ;");
        state.advance(9);
        let err = state.fail(&["expression"]);
        let err = state.locate(err);
        assert_eq!(
            err.to_string(),
            "unexpected input at 1:10: expected expression, found ';'"
        );
    }

    #[test]
    fn test_error_display_at_end() {
        let mut state = ParseState::new("void x");
        state.advance(6);
        let err = state.fail(&["'='", "';'"]);
        let err = state.locate(err);
        assert_eq!(
            err.to_string(),
            "unexpected end of input at 1:7: expected one of '=', ';'"
        );
    }

    #[test]
    fn test_failures_are_located_on_demand() {
        let mut state = ParseState::new("void x;\nvoid é = ;");
        state.advance(18);
        let err = state.fail(&["expression"]);
        assert_eq!(err.offset, 18);

        let located = state.take_furthest_error().unwrap();
        // 'é' is two bytes but one column
        assert_eq!(located.position, SourcePos { line: 2, column: 10 });
    }

    #[test]
    fn test_nesting_limit() {
        let mut state = ParseState::new("(((");
        for _ in 0..MAX_NESTING {
            assert!(state.enter_nesting().is_ok());
        }
        let err = state.enter_nesting().unwrap_err();
        assert_eq!(err.message, "nesting too deep");
        assert!(err.labeled);

        state.leave_nesting();
        assert!(state.enter_nesting().is_ok());
    }
}
