//! Abstract Syntax Tree (AST) types for parsed SQL statements.

mod expression;
mod statement;
mod types;

pub use expression::{
    ColumnIdent, CompareOp, Expr, FunctionCall, Literal, MathOp, Placeholder, TableIdent, UnaryOp,
};
pub use statement::{
    Group, GroupingElement, GroupingSet, JoinKind, Projection, Relation, Select, SetQuantifier,
    SimpleSelect, SortExpr, SortOrder, Statement,
};
pub use types::TypeLiteral;
