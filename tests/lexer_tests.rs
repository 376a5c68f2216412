use voidlang::lexer::{
    character, keyword, lexeme, literal, name, one_of, regex, satisfy, signed_integer, symbol,
    whitespace,
};
use regex::Regex;
use voidlang::parser::{BoxedParser, ParseResult, ParseState, Parser};

fn run<T>(parser: BoxedParser<T>, input: &str) -> (ParseResult<T>, usize) {
    let mut state = ParseState::new(input);
    let result = parser.parse(&mut state);
    (result, state.position())
}

#[test]
fn lex_character() {
    let (result, pos) = run(character('a'), "abc");
    assert_eq!(result.unwrap(), "a");
    assert_eq!(pos, 1);
}

#[test]
fn lex_character_mismatch_consumes_nothing() {
    let (result, pos) = run(character('a'), "xbc");
    let err = result.unwrap_err();
    assert_eq!(err.expected, vec!["'a'".to_string()]);
    assert_eq!(err.found.as_deref(), Some("'x'"));
    assert_eq!(pos, 0);
}

#[test]
fn lex_multibyte_character() {
    let (result, pos) = run(character('é'), "é!");
    assert_eq!(result.unwrap(), "é");
    assert_eq!(pos, 2);
}

#[test]
fn lex_one_of() {
    assert_eq!(run(one_of("+-"), "-1").0.unwrap(), "-");
    assert_eq!(run(one_of("+-"), "+1").0.unwrap(), "+");

    let err = run(one_of("+-"), "*").0.unwrap_err();
    assert_eq!(err.expected, vec!["'+'".to_string(), "'-'".to_string()]);
}

#[test]
fn lex_satisfy() {
    let digit = || satisfy(|c| c.is_ascii_digit(), "digit");
    assert_eq!(run(digit(), "7x").0.unwrap(), "7");
    assert_eq!(run(digit(), "x7").0.unwrap_err().expected, vec!["digit"]);
}

#[test]
fn lex_literal() {
    let (result, pos) = run(literal("void"), "void x");
    assert_eq!(result.unwrap(), "void");
    assert_eq!(pos, 4);

    let (result, pos) = run(literal("void"), "vo");
    assert!(result.is_err());
    assert_eq!(pos, 0);
}

#[test]
fn lex_keyword_requires_boundary() {
    assert!(run(keyword("void"), "voidx").0.is_err());
    assert!(run(keyword("void"), "void_").0.is_err());
    assert!(run(keyword("void"), "void*").0.is_ok());
    assert!(run(keyword("void"), "void").0.is_ok());
    assert!(run(keyword("void"), "void x").0.is_ok());
}

#[test]
fn lex_regex_matches_at_cursor() {
    let pattern = Regex::new("^[0-9]+").unwrap();

    let (result, pos) = run(regex(&pattern, "digits"), "123abc");
    assert_eq!(result.unwrap(), "123");
    assert_eq!(pos, 3);

    let (result, pos) = run(regex(&pattern, "digits"), "abc123");
    assert_eq!(result.unwrap_err().expected, vec!["digits"]);
    assert_eq!(pos, 0);
}

#[test]
fn lex_regex_ignores_later_matches() {
    let unanchored = Regex::new("[0-9]+").unwrap();
    let (result, pos) = run(regex(&unanchored, "digits"), "abc123");
    assert!(result.is_err());
    assert_eq!(pos, 0);
}

#[test]
fn lex_names() {
    assert_eq!(run(name(), "_foo1 bar").0.unwrap(), "_foo1");
    assert_eq!(run(name(), "x").0.unwrap(), "x");
    assert_eq!(run(name(), "CamelCase;").0.unwrap(), "CamelCase");
    assert!(run(name(), "1abc").0.is_err());
}

#[test]
fn lex_whitespace() {
    let (result, pos) = run(whitespace(), "  \t\nx");
    assert_eq!(result.unwrap(), "  \t\n");
    assert_eq!(pos, 4);
}

#[test]
fn lex_whitespace_never_fails() {
    let (result, pos) = run(whitespace(), "x");
    assert_eq!(result.unwrap(), "");
    assert_eq!(pos, 0);

    assert_eq!(run(whitespace(), "").0.unwrap(), "");
}

#[test]
fn lex_signed_integers() {
    assert_eq!(run(signed_integer(), "42;").0.unwrap(), "42");
    assert_eq!(run(signed_integer(), "-17").0.unwrap(), "-17");
    assert_eq!(run(signed_integer(), "+3").0.unwrap(), "+3");
    assert_eq!(run(signed_integer(), "007").0.unwrap(), "007");
}

#[test]
fn lex_signed_integer_needs_digits() {
    for input in ["-", "-x", "x", ""] {
        let (result, pos) = run(signed_integer(), input);
        assert!(result.is_err(), "{input:?} should not lex as an integer");
        assert_eq!(pos, 0);
    }
}

#[test]
fn lex_lexeme_skips_leading_whitespace() {
    let (result, pos) = run(lexeme(literal("=")), "   = 1");
    assert_eq!(result.unwrap(), "=");
    assert_eq!(pos, 4);
}

#[test]
fn lex_lexeme_gives_whitespace_back_on_failure() {
    let (result, pos) = run(lexeme(literal("=")), "   ;");
    let err = result.unwrap_err();
    assert_eq!(err.offset, 3);
    assert_eq!(pos, 0);
}

#[test]
fn lex_symbol() {
    let (result, pos) = run(symbol("*"), "\n * x");
    assert_eq!(result.unwrap(), "*");
    assert_eq!(pos, 3);
}
