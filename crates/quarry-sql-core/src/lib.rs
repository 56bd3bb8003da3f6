//! # quarry-sql-core
//!
//! A parser for the SQL-99 query dialect. It turns a statement string into
//! a typed abstract syntax tree, or a structured error naming the failure
//! and its character offset.
//!
//! The crate is two stages glued by one entry point:
//!
//! - a [`Lexer`] that tokenizes raw SQL into positioned tokens, skipping
//!   whitespace and comments;
//! - a [`Parser`] that consumes the token stream with backtracking
//!   recursive descent and a memoized expression grammar.
//!
//! Parsing is purely syntactic: no name resolution, no type checking, and
//! no execution. Consumers pattern-match on the [`ast`] types.
//!
//! ## Example
//!
//! ```rust
//! use quarry_sql_core::ast::{Projection, Select};
//! use quarry_sql_core::parse_statement;
//!
//! let statement = parse_statement("SELECT * FROM t")?;
//! let Select::Simple(select) = statement else {
//!     panic!("not a union");
//! };
//! assert!(matches!(select.projections[0], Projection::AllColumns { .. }));
//! # Ok::<(), quarry_sql_core::ParseError>(())
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use quarry_sql_core::parse_statement;
//!
//! let err = parse_statement("SELECT FROM t").unwrap_err();
//! assert_eq!(err.message, "*, table or expression expected");
//! assert_eq!(err.offset, 7);
//! ```
//!
//! ## Placeholders
//!
//! Statements may contain `?`-style placeholders for later parameter
//! binding, including the range form `BETWEEN ?[lo:integer)` and the set
//! form `IN ?{ids}`; see [`ast::Placeholder`].
//!
//! ## Feature flags
//!
//! - `serde`: derives `Serialize` / `Deserialize` on the AST types.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Select, Statement};
pub use error::ParseError;
pub use lexer::{Keyword, Lexer, Token, TokenKind};
pub use parser::{parse_statement, Parser};
