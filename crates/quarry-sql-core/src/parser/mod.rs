//! SQL parser.
//!
//! A hand-written, backtracking recursive descent parser for the SQL-99
//! query dialect, with a memoized (packrat) expression grammar.
//!
//! # Parsing approach
//!
//! The statement and clause rules are plain recursive-descent methods.
//! Expressions go through a stack of precedence levels, loosest to
//! tightest: `OR`, `AND`, `NOT`, `EXISTS`, comparisons, the postfix
//! predicate chain (`IS` / `IN` / `BETWEEN`, including their placeholder
//! forms), additive and multiplicative arithmetic, sign prefixes, and
//! finally the primary expressions. The expression and select rules
//! memoize results per start position, so alternatives that re-parse the
//! same region (such as `(select)` versus `(expr)`) stay linear.
//!
//! # Supported grammar
//!
//! | Clause | Notes |
//! |--------|-------|
//! | `SELECT` | `DISTINCT` / `ALL`, `*`, `t.*`, `s.t.*`, aliased expressions |
//! | `FROM` | tables, schema-qualified tables, aliased sub-selects, joins |
//! | `WHERE` | any expression |
//! | `GROUP BY` | expressions, `GROUPING SETS`, `ROLLUP`, `CUBE` |
//! | `ORDER BY` | expressions with optional `ASC` / `DESC` |
//! | `UNION` | optional `ALL` / `DISTINCT`, left-associative chains |
//!
//! Joins are `[INNER] JOIN`, `LEFT [OUTER] JOIN`, and `RIGHT [OUTER] JOIN`
//! with an optional `ON` predicate; chained joins associate to the left.
//!
//! # Placeholders
//!
//! Three `?`-introduced forms support later parameter binding: the plain
//! placeholder `?[name][:type]`, the range placeholder `?[...)` accepted
//! only by `BETWEEN`, and the set placeholder `?{...}` accepted only by
//! `IN`.
//!
//! # Errors
//!
//! All failures are syntactic and carry the character offset of the
//! furthest-advancing parse attempt. A required keyword or delimiter
//! reports `"<text> expected"`; rule-level failures report fixed messages
//! such as `"expression expected"` or `"table, join or subselect
//! expected"`; input remaining after a complete statement reports
//! `"end of statement expected"`.

mod core;
mod expr;

pub use self::core::Parser;

use crate::ast::Statement;
use crate::error::ParseError;
use crate::lexer::Lexer;

/// Parses a complete SQL statement.
///
/// This is the crate's single entry point: it tokenizes `sql`, parses one
/// select statement (optionally terminated by `;`), and requires the input
/// to end there.
///
/// # Errors
///
/// Returns a [`ParseError`] with the failure message and the zero-based
/// character offset of the deepest parse attempt.
///
/// # Examples
///
/// ```rust
/// use quarry_sql_core::ast::Select;
/// use quarry_sql_core::parse_statement;
///
/// let statement = parse_statement("SELECT a, b FROM t WHERE a > 1")?;
/// assert!(matches!(statement, Select::Simple(_)));
/// # Ok::<(), quarry_sql_core::ParseError>(())
/// ```
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    let _span = tracing::trace_span!("parse_statement", len = sql.len()).entered();
    let result = Lexer::new(sql)
        .tokenize()
        .and_then(|tokens| Parser::new(tokens).parse_statement());
    if let Err(err) = &result {
        tracing::debug!(offset = err.offset, message = %err.message, "parse failed");
    }
    result
}
