//! Token types for the SQL lexer.

/// Reserved words of the SQL-99 query dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    // Query structure
    Select,
    From,
    Where,
    Group,
    Grouping,
    Sets,
    Rollup,
    Cube,
    Order,
    By,
    Union,
    Distinct,
    All,
    As,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Outer,
    On,

    // Logical operators and predicates
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Is,
    Exists,

    // Literals
    True,
    False,
    Unknown,
    Null,

    // CASE / CAST
    Case,
    When,
    Then,
    Else,
    End,
    Cast,

    // Aggregates
    Count,

    // Ordering
    Asc,
    Desc,

    // Data types
    Timestamp,
    Datetime,
    Date,
    Boolean,
    Varchar,
    Integer,
    Numeric,
    Decimal,
    Real,
}

impl Keyword {
    /// Attempts to parse a keyword from a word (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Some(Self::Select),
            "from" => Some(Self::From),
            "where" => Some(Self::Where),
            "group" => Some(Self::Group),
            "grouping" => Some(Self::Grouping),
            "sets" => Some(Self::Sets),
            "rollup" => Some(Self::Rollup),
            "cube" => Some(Self::Cube),
            "order" => Some(Self::Order),
            "by" => Some(Self::By),
            "union" => Some(Self::Union),
            "distinct" => Some(Self::Distinct),
            "all" => Some(Self::All),
            "as" => Some(Self::As),
            "join" => Some(Self::Join),
            "inner" => Some(Self::Inner),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "outer" => Some(Self::Outer),
            "on" => Some(Self::On),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "not" => Some(Self::Not),
            "in" => Some(Self::In),
            "between" => Some(Self::Between),
            "like" => Some(Self::Like),
            "is" => Some(Self::Is),
            "exists" => Some(Self::Exists),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "unknown" => Some(Self::Unknown),
            "null" => Some(Self::Null),
            "case" => Some(Self::Case),
            "when" => Some(Self::When),
            "then" => Some(Self::Then),
            "else" => Some(Self::Else),
            "end" => Some(Self::End),
            "cast" => Some(Self::Cast),
            "count" => Some(Self::Count),
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            "timestamp" => Some(Self::Timestamp),
            "datetime" => Some(Self::Datetime),
            "date" => Some(Self::Date),
            "boolean" => Some(Self::Boolean),
            "varchar" => Some(Self::Varchar),
            "integer" => Some(Self::Integer),
            "numeric" => Some(Self::Numeric),
            "decimal" => Some(Self::Decimal),
            "real" => Some(Self::Real),
            _ => None,
        }
    }

    /// Returns the keyword's canonical (lowercase) spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::From => "from",
            Self::Where => "where",
            Self::Group => "group",
            Self::Grouping => "grouping",
            Self::Sets => "sets",
            Self::Rollup => "rollup",
            Self::Cube => "cube",
            Self::Order => "order",
            Self::By => "by",
            Self::Union => "union",
            Self::Distinct => "distinct",
            Self::All => "all",
            Self::As => "as",
            Self::Join => "join",
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Outer => "outer",
            Self::On => "on",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::In => "in",
            Self::Between => "between",
            Self::Like => "like",
            Self::Is => "is",
            Self::Exists => "exists",
            Self::True => "true",
            Self::False => "false",
            Self::Unknown => "unknown",
            Self::Null => "null",
            Self::Case => "case",
            Self::When => "when",
            Self::Then => "then",
            Self::Else => "else",
            Self::End => "end",
            Self::Cast => "cast",
            Self::Count => "count",
            Self::Asc => "asc",
            Self::Desc => "desc",
            Self::Timestamp => "timestamp",
            Self::Datetime => "datetime",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Varchar => "varchar",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Decimal => "decimal",
            Self::Real => "real",
        }
    }
}

/// All delimiter spellings, longest first so the lexer can match greedily.
///
/// Multi-character delimiters must precede their single-character prefixes;
/// the lexer takes the first entry that prefixes the remaining input.
pub const DELIMITERS: &[&str] = &[
    "??(", "??)", "<>", ">=", "<=", "||", "->", "=>", "(", ")", "\"", "'", "%", "&", "*", "/",
    "+", "-", ",", ".", ":", ";", "<", ">", "?", "[", "]", "_", "|", "=", "{", "}", "^",
];

/// Returns true if `text` is a keyword or delimiter spelling the parser is
/// allowed to match literally.
#[must_use]
pub fn is_literal_text(text: &str) -> bool {
    Keyword::from_str(text).is_some() || DELIMITERS.contains(&text)
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A reserved word, matched case-insensitively.
    Keyword(Keyword),
    /// An unquoted or double-quoted identifier, original casing preserved.
    Identifier(String),
    /// Integer literal (e.g. `42`).
    Integer(i64),
    /// Decimal literal, digits on both sides of the point (e.g. `3.14`).
    Decimal(f64),
    /// Single-quoted string literal, quotes stripped.
    String(String),
    /// A punctuation/operator string from [`DELIMITERS`].
    Delimiter(&'static str),
    /// Synthetic end-of-input marker.
    Eof,
}

/// A token together with the character offset at which it began.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Zero-based character offset of the token's first character.
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns true if this token is the given keyword or delimiter,
    /// compared by spelling.
    #[must_use]
    pub fn is_literal(&self, text: &str) -> bool {
        match &self.kind {
            TokenKind::Keyword(kw) => kw.as_str() == text,
            TokenKind::Delimiter(d) => *d == text,
            _ => false,
        }
    }
}
