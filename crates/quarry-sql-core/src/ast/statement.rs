//! Statement-level AST types: the `SELECT` envelope, projections,
//! relations, grouping, and ordering.

use super::expression::{Expr, TableIdent};

/// The root of a parsed statement.
///
/// The query dialect only has `SELECT`, so this is currently a synonym for
/// [`Select`]; a future extension to other statement kinds would widen it
/// into an enum.
pub type Statement = Select;

/// The `DISTINCT` / `ALL` modifier on `SELECT`, `UNION`, or an aggregate
/// argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetQuantifier {
    /// `distinct`
    Distinct,
    /// `all`
    All,
}

/// A `SELECT` statement: either a single query block or a `UNION` of two
/// selects. Chained unions associate to the left.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Select {
    /// A single query block.
    Simple(SimpleSelect),
    /// `left UNION [ALL|DISTINCT] right`
    Union {
        /// Left operand.
        left: Box<Select>,
        /// Optional `ALL` / `DISTINCT`.
        quantifier: Option<SetQuantifier>,
        /// Right operand.
        right: Box<Select>,
        /// Source offset of the statement's first token.
        pos: usize,
    },
}

impl Select {
    /// Returns the source offset of the statement's first token.
    #[must_use]
    pub const fn pos(&self) -> usize {
        match self {
            Self::Simple(simple) => simple.pos,
            Self::Union { pos, .. } => *pos,
        }
    }
}

/// A single `SELECT` query block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleSelect {
    /// Optional `DISTINCT` / `ALL`.
    pub quantifier: Option<SetQuantifier>,
    /// The select list; never empty.
    pub projections: Vec<Projection>,
    /// The `FROM` relations; empty when the clause is absent.
    pub relations: Vec<Relation>,
    /// The `WHERE` predicate.
    pub where_clause: Option<Expr>,
    /// The `GROUP BY` entries; empty when the clause is absent.
    pub group_by: Vec<Group>,
    /// The `ORDER BY` entries; empty when the clause is absent.
    pub order_by: Vec<SortExpr>,
    /// Source offset of the `select` keyword.
    pub pos: usize,
}

/// One entry of the select list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// `*`
    AllColumns {
        /// Source offset of the `*`.
        pos: usize,
    },
    /// `t.*` or `s.t.*`
    AllTableColumns {
        /// The qualifying table.
        table: TableIdent,
        /// Source offset of the first name segment.
        pos: usize,
    },
    /// An expression with an optional alias.
    Expression {
        /// The projected expression.
        expr: Expr,
        /// Optional alias (`AS` optional; bare identifier or string).
        alias: Option<String>,
        /// Source offset of the expression's first token.
        pos: usize,
    },
}

/// The kind of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinKind {
    /// `[INNER] JOIN`
    Inner,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
}

impl JoinKind {
    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner join",
            Self::Left => "left join",
            Self::Right => "right join",
        }
    }
}

/// One relation of the `FROM` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// A plain, possibly aliased table.
    Table {
        /// The possibly schema-qualified table name.
        table: TableIdent,
        /// Optional alias.
        alias: Option<String>,
        /// Source offset of the first name segment.
        pos: usize,
    },
    /// A parenthesized sub-select; the alias is mandatory.
    Subquery {
        /// The inner select.
        select: Box<Select>,
        /// The alias naming the derived table.
        alias: String,
        /// Source offset of the opening parenthesis.
        pos: usize,
    },
    /// A join; chains associate to the left.
    Join {
        /// Left relation.
        left: Box<Relation>,
        /// The join kind.
        kind: JoinKind,
        /// Right relation.
        right: Box<Relation>,
        /// Optional `ON` predicate.
        on: Option<Expr>,
        /// Source offset of the left relation's first token.
        pos: usize,
    },
}

/// One entry of the `GROUP BY` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    /// A bare grouping expression.
    Expression(Expr),
    /// `GROUPING SETS (set, ...)`
    GroupingSets(Vec<GroupingSet>),
    /// `ROLLUP (item, ...)`
    Rollup(Vec<GroupingElement>),
    /// `CUBE (item, ...)`
    Cube(Vec<GroupingElement>),
}

/// A parenthesized, possibly empty list of grouping expressions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupingSet {
    /// The expressions; `()` yields an empty list.
    pub elements: Vec<Expr>,
}

/// An item of a `ROLLUP` or `CUBE` list: a bare expression or a grouping
/// set. `GROUPING SETS` itself accepts only grouping sets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupingElement {
    /// A bare expression.
    Expression(Expr),
    /// A parenthesized grouping set.
    Set(GroupingSet),
}

/// Sort direction of an `ORDER BY` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// `asc`
    Asc,
    /// `desc`
    Desc,
}

/// One entry of the `ORDER BY` clause.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortExpr {
    /// The sort expression.
    pub expr: Expr,
    /// Optional explicit direction.
    pub order: Option<SortOrder>,
}
