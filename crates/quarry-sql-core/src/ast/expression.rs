//! Expression AST types.

use super::statement::{Select, SetQuantifier};
use super::types::TypeLiteral;

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    /// Integer literal.
    Integer(i64),
    /// Decimal literal.
    Decimal(f64),
    /// Single-quoted string literal.
    String(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `unknown` (SQL three-valued logic).
    Unknown,
    /// `null`
    Null,
}

impl Literal {
    /// Returns true for the literals allowed on the right of `IS`:
    /// the three boolean truth values and `null`.
    #[must_use]
    pub const fn is_truth_value(&self) -> bool {
        matches!(self, Self::True | Self::False | Self::Unknown | Self::Null)
    }
}

/// A possibly schema-qualified table name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableIdent {
    /// Table name.
    pub name: String,
    /// Schema qualifier, if any.
    pub schema: Option<String>,
}

impl TableIdent {
    /// Creates an unqualified table name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Creates a schema-qualified table name.
    #[must_use]
    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema.into()),
        }
    }
}

/// A possibly table-qualified column name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnIdent {
    /// Column name.
    pub name: String,
    /// Table qualifier, if any.
    pub table: Option<TableIdent>,
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl UnaryOp {
    /// Returns the operator's spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MathOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl MathOp {
    /// Maps an operator spelling to the operator.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    /// Returns the operator's spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

/// Comparison operators, including `LIKE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<=`
    LtEq,
    /// `like`
    Like,
}

impl CompareOp {
    /// Maps an operator spelling to the operator.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "=" => Some(Self::Eq),
            "<>" => Some(Self::NotEq),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::GtEq),
            "<=" => Some(Self::LtEq),
            "like" => Some(Self::Like),
            _ => None,
        }
    }

    /// Returns the operator's spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Like => "like",
        }
    }
}

/// A `?`-introduced parameter placeholder, optionally named and optionally
/// carrying a declared type (`?name:integer`).
///
/// The same shape is reused for the range placeholder of
/// `BETWEEN ?[...)`-form and the set placeholder of `IN ?{...}`-form
/// predicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    /// Optional parameter name.
    pub name: Option<String>,
    /// Optional declared type.
    pub type_hint: Option<TypeLiteral>,
}

/// A function call such as `count(distinct x)`.
///
/// The name is stored lowercased; reserved words are legal function names.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCall {
    /// Lowercased function name.
    pub name: String,
    /// Optional `DISTINCT` / `ALL` on the argument list.
    pub quantifier: Option<SetQuantifier>,
    /// The arguments, possibly empty.
    pub args: Vec<Expr>,
}

/// A SQL expression.
///
/// Nodes produced at the `literal` and `column` grammar sites carry the
/// character offset of their first token in `pos`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The value.
        value: Literal,
        /// Source offset of the literal's first character.
        pos: usize,
    },

    /// A column reference.
    Column {
        /// The possibly qualified column name.
        column: ColumnIdent,
        /// Source offset of the first name segment.
        pos: usize,
    },

    /// A function call.
    Function(FunctionCall),

    /// `CAST(expr AS type)`
    Cast {
        /// The expression being cast.
        expr: Box<Expr>,
        /// The target type.
        target: TypeLiteral,
    },

    /// `CASE [scrutinee] WHEN .. THEN .. [ELSE ..] END`
    Case {
        /// Optional scrutinee expression.
        operand: Option<Box<Expr>>,
        /// The `WHEN`/`THEN` pairs; never empty.
        when_clauses: Vec<(Expr, Expr)>,
        /// Optional `ELSE` branch.
        else_clause: Option<Box<Expr>>,
    },

    /// A parenthesized sub-`SELECT` used as a scalar expression.
    Subquery(Box<Select>),

    /// A parenthesized expression.
    Paren(Box<Expr>),

    /// A parameter placeholder.
    Placeholder(Placeholder),

    /// A sign-prefixed expression.
    Unary {
        /// The sign.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
    },

    /// An arithmetic expression.
    Math {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: MathOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A comparison.
    Comparison {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: CompareOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// Logical conjunction.
    And {
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },

    /// Logical disjunction.
    Or {
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },

    /// Logical negation. Right-recursive, so `NOT NOT x` is legal.
    Not(Box<Expr>),

    /// `EXISTS (select)`
    Exists(Box<Select>),

    /// `expr IS [NOT] <truth value>`, chainable.
    Is {
        /// The tested expression.
        expr: Box<Expr>,
        /// True for `IS NOT`.
        negated: bool,
        /// One of `true`, `false`, `unknown`, `null`.
        value: Literal,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        /// The tested expression.
        expr: Box<Expr>,
        /// True for `NOT BETWEEN`.
        negated: bool,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
    },

    /// `expr [NOT] BETWEEN ?[...)` with a range placeholder instead of
    /// concrete bounds.
    BetweenPlaceholder {
        /// The tested expression.
        expr: Box<Expr>,
        /// True for `NOT BETWEEN`.
        negated: bool,
        /// The range placeholder.
        range: Placeholder,
    },

    /// `expr [NOT] IN (e1, e2, ...)`; the list is never empty.
    In {
        /// The tested expression.
        expr: Box<Expr>,
        /// True for `NOT IN`.
        negated: bool,
        /// The candidate values.
        list: Vec<Expr>,
    },

    /// `expr [NOT] IN ?{...}` with a set placeholder instead of listed
    /// values.
    InPlaceholder {
        /// The tested expression.
        expr: Box<Expr>,
        /// True for `NOT IN`.
        negated: bool,
        /// The set placeholder.
        set: Placeholder,
    },
}

impl Expr {
    /// Creates an integer literal at offset 0.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Literal {
            value: Literal::Integer(value),
            pos: 0,
        }
    }

    /// Creates a string literal at offset 0.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal {
            value: Literal::String(value.into()),
            pos: 0,
        }
    }

    /// Creates an unqualified column reference at offset 0.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            column: ColumnIdent {
                name: name.into(),
                table: None,
            },
            pos: 0,
        }
    }

    /// Creates a table-qualified column reference at offset 0.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            column: ColumnIdent {
                name: name.into(),
                table: Some(TableIdent::new(table)),
            },
            pos: 0,
        }
    }

    /// Creates a comparison expression.
    #[must_use]
    pub fn compare(self, op: CompareOp, right: Self) -> Self {
        Self::Comparison {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a conjunction.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        Self::And {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Creates a disjunction.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        Self::Or {
            left: Box::new(self),
            right: Box::new(right),
        }
    }
}
