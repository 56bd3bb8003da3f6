//! Tests for error messages and offsets.

mod common;
use common::*;

#[test]
fn missing_projection() {
    let err = parse_err("SELECT FROM t");
    assert_eq!(err.message, "*, table or expression expected");
    assert_eq!(err.offset, 7);
}

#[test]
fn missing_relation() {
    let err = parse_err("SELECT a FROM");
    assert_eq!(err.message, "table, join or subselect expected");
    assert_eq!(err.offset, 13);
}

#[test]
fn unclosed_string_literal() {
    let err = parse_err("SELECT 'abc");
    assert_eq!(err.message, "unclosed string literal");
    assert_eq!(err.offset, 7);
}

#[test]
fn unclosed_quoted_identifier() {
    let err = parse_err("SELECT \"abc FROM t");
    assert_eq!(err.message, "unclosed string literal");
}

#[test]
fn leftover_input_after_statement() {
    let err = parse_err("SELECT a; SELECT b");
    assert_eq!(err.message, "end of statement expected");
    assert_eq!(err.offset, 10);
}

#[test]
fn empty_input() {
    let err = parse_err("");
    assert_eq!(err.message, "select expected");
    assert_eq!(err.offset, 0);
}

#[test]
fn not_a_select() {
    let err = parse_err("INSERT INTO t (a) VALUES (1)");
    assert_eq!(err.message, "select expected");
    assert_eq!(err.offset, 0);
}

#[test]
fn illegal_character() {
    let err = parse_err("SELECT a FROM t WHERE a = @1");
    assert_eq!(err.message, "illegal character");
    assert_eq!(err.offset, 26);
}

#[test]
fn unclosed_parenthesis() {
    let err = parse_err("SELECT (1 + 2 FROM t");
    assert_eq!(err.message, ") expected");
    assert_eq!(err.offset, 14);
}

#[test]
fn missing_join_target() {
    let err = parse_err("SELECT a FROM t JOIN WHERE x = 1");
    assert_eq!(err.message, "table, join or subselect expected");
    assert_eq!(err.offset, 21);
}

#[test]
fn missing_cast_type() {
    let err = parse_err("SELECT CAST(a AS blob) FROM t");
    assert_eq!(err.message, "type expected");
    assert_eq!(err.offset, 17);
}

#[test]
fn missing_case_end() {
    let err = parse_err("SELECT CASE WHEN a THEN b FROM t");
    assert_eq!(err.message, "end expected");
    assert_eq!(err.offset, 26);
}

#[test]
fn missing_where_expression() {
    let err = parse_err("SELECT a FROM t WHERE");
    assert_eq!(err.message, "expression expected");
    assert_eq!(err.offset, 21);
}

#[test]
fn errors_prefer_the_deepest_branch() {
    // The comparison's right-hand side is missing: the reported failure is
    // past the `=` rather than at the start of the WHERE expression.
    let err = parse_err("SELECT a FROM t WHERE a =");
    assert_eq!(err.offset, 25);
}

#[test]
fn error_display_includes_offset() {
    let err = parse_err("SELECT FROM t");
    assert_eq!(
        err.to_string(),
        "*, table or expression expected at offset 7"
    );
}
