//! The statement and clause parsers.

use std::collections::HashMap;

use crate::ast::{
    Expr, Group, GroupingElement, GroupingSet, JoinKind, Projection, Relation, Select,
    SetQuantifier, SimpleSelect, SortExpr, SortOrder, Statement, TableIdent,
};
use crate::error::ParseError;
use crate::lexer::{is_literal_text, Keyword, Token, TokenKind};

pub(super) type PResult<T> = Result<T, ParseError>;

/// A backtracking recursive-descent parser over a token buffer.
///
/// Alternatives are tried in order; a failing alternative rewinds the token
/// cursor. Every error is also recorded in `deepest` so that the error of
/// the furthest-advancing branch is the one ultimately reported. The
/// expression and select rules memoize their results per start position,
/// which keeps parsing linear even where alternatives overlap.
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) deepest: Option<ParseError>,
    pub(super) expr_memo: HashMap<usize, PResult<(Expr, usize)>>,
    pub(super) select_memo: HashMap<usize, PResult<(Select, usize)>>,
}

impl Parser {
    /// Creates a parser over a token buffer produced by
    /// [`Lexer::tokenize`](crate::lexer::Lexer::tokenize).
    ///
    /// The buffer must end with an EOF token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens.last().is_some_and(Token::is_eof));
        Self {
            tokens,
            pos: 0,
            deepest: None,
            expr_memo: HashMap::new(),
            select_memo: HashMap::new(),
        }
    }

    /// Parses a complete statement: the select grammar, an optional
    /// trailing `;`, and strict end-of-input.
    ///
    /// # Errors
    ///
    /// Returns the error of the furthest-advancing parse attempt. Leftover
    /// input after a complete statement reports `"end of statement
    /// expected"`.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.statement() {
            Ok(statement) => Ok(statement),
            Err(err) => {
                let mut err = self.deepest.clone().unwrap_or(err);
                if err.message == "end of input expected" {
                    err.message = String::from("end of statement expected");
                }
                Err(err)
            }
        }
    }

    fn statement(&mut self) -> PResult<Statement> {
        let statement = self.select()?;
        self.eat_delimiter(";");
        if !self.current().is_eof() {
            return Err(self.fail("end of input expected"));
        }
        Ok(statement)
    }

    /// Memoized select rule: a chain of `UNION`s folded to the left.
    pub(super) fn select(&mut self) -> PResult<Select> {
        let start = self.pos;
        if let Some(hit) = self.select_memo.get(&start) {
            return match hit.clone() {
                Ok((select, end)) => {
                    self.pos = end;
                    Ok(select)
                }
                Err(err) => {
                    self.pos = start;
                    Err(err)
                }
            };
        }
        let result = self.select_inner();
        let entry = match &result {
            Ok(select) => Ok((select.clone(), self.pos)),
            Err(err) => {
                self.pos = start;
                Err(err.clone())
            }
        };
        self.select_memo.insert(start, entry);
        result
    }

    fn select_inner(&mut self) -> PResult<Select> {
        let pos = self.offset();
        let mut select = Select::Simple(self.simple_select()?);
        while self.eat_keyword(Keyword::Union) {
            let quantifier = self.set_quantifier();
            let right = self.simple_select()?;
            select = Select::Union {
                left: Box::new(select),
                quantifier,
                right: Box::new(Select::Simple(right)),
                pos,
            };
        }
        Ok(select)
    }

    fn simple_select(&mut self) -> PResult<SimpleSelect> {
        let pos = self.offset();
        self.literal("select")?;
        let quantifier = self.set_quantifier();
        let projections = self.comma_list(Self::projection)?;
        let relations = if self.eat_keyword(Keyword::From) {
            self.comma_list(Self::relation)?
        } else {
            Vec::new()
        };
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.expr()?)
        } else {
            None
        };
        let group_by = if self.eat_keyword(Keyword::Group) {
            self.literal("by")?;
            self.comma_list(Self::group)?
        } else {
            Vec::new()
        };
        let order_by = if self.eat_keyword(Keyword::Order) {
            self.literal("by")?;
            self.comma_list(Self::sort_expr)?
        } else {
            Vec::new()
        };
        Ok(SimpleSelect {
            quantifier,
            projections,
            relations,
            where_clause,
            group_by,
            order_by,
            pos,
        })
    }

    /// Parses an optional `DISTINCT` / `ALL`.
    pub(super) fn set_quantifier(&mut self) -> Option<SetQuantifier> {
        if self.eat_keyword(Keyword::Distinct) {
            Some(SetQuantifier::Distinct)
        } else if self.eat_keyword(Keyword::All) {
            Some(SetQuantifier::All)
        } else {
            None
        }
    }

    fn projection(&mut self) -> PResult<Projection> {
        let pos = self.offset();
        self.labeled("*, table or expression expected", |p| {
            if p.eat_delimiter("*") {
                return Ok(Projection::AllColumns { pos });
            }
            if let Some(table) = p.table_star() {
                return Ok(Projection::AllTableColumns { table, pos });
            }
            let expr = p.expr()?;
            let alias = p.alias()?;
            Ok(Projection::Expression { expr, alias, pos })
        })
    }

    /// Attempts `t.*` / `s.t.*`; rewinds entirely when it does not match.
    fn table_star(&mut self) -> Option<TableIdent> {
        let start = self.pos;
        let table = self.table_star_inner();
        if table.is_none() {
            self.pos = start;
        }
        table
    }

    fn table_star_inner(&mut self) -> Option<TableIdent> {
        let first = self.ident_opt()?;
        if !self.eat_delimiter(".") {
            return None;
        }
        if self.eat_delimiter("*") {
            return Some(TableIdent {
                name: first,
                schema: None,
            });
        }
        let second = self.ident_opt()?;
        if self.eat_delimiter(".") && self.eat_delimiter("*") {
            return Some(TableIdent {
                name: second,
                schema: Some(first),
            });
        }
        None
    }

    fn relation(&mut self) -> PResult<Relation> {
        let pos = self.offset();
        let mut relation = self.labeled("table, join or subselect expected", Self::relation_base)?;
        while let Some(kind) = self.join_kind()? {
            let right = self.labeled("table, join or subselect expected", Self::relation_base)?;
            let on = if self.eat_keyword(Keyword::On) {
                Some(self.expr()?)
            } else {
                None
            };
            relation = Relation::Join {
                left: Box::new(relation),
                kind,
                right: Box::new(right),
                on,
                pos,
            };
        }
        Ok(relation)
    }

    fn relation_base(&mut self) -> PResult<Relation> {
        let pos = self.offset();
        if self.eat_delimiter("(") {
            let select = self.select()?;
            self.literal(")")?;
            self.eat_keyword(Keyword::As);
            let alias = self.alias_name()?;
            return Ok(Relation::Subquery {
                select: Box::new(select),
                alias,
                pos,
            });
        }
        let first = self.ident()?;
        let table = if self.eat_delimiter(".") {
            let name = self.ident()?;
            TableIdent {
                name,
                schema: Some(first),
            }
        } else {
            TableIdent {
                name: first,
                schema: None,
            }
        };
        let alias = self.alias()?;
        Ok(Relation::Table { table, alias, pos })
    }

    fn join_kind(&mut self) -> PResult<Option<JoinKind>> {
        if self.eat_keyword(Keyword::Join) {
            return Ok(Some(JoinKind::Inner));
        }
        if self.eat_keyword(Keyword::Inner) {
            self.literal("join")?;
            return Ok(Some(JoinKind::Inner));
        }
        if self.eat_keyword(Keyword::Left) {
            self.eat_keyword(Keyword::Outer);
            self.literal("join")?;
            return Ok(Some(JoinKind::Left));
        }
        if self.eat_keyword(Keyword::Right) {
            self.eat_keyword(Keyword::Outer);
            self.literal("join")?;
            return Ok(Some(JoinKind::Right));
        }
        Ok(None)
    }

    fn group(&mut self) -> PResult<Group> {
        if self.eat_keyword(Keyword::Grouping) {
            self.literal("sets")?;
            self.literal("(")?;
            let sets = self.comma_list(Self::grouping_set)?;
            self.literal(")")?;
            return Ok(Group::GroupingSets(sets));
        }
        if self.eat_keyword(Keyword::Rollup) {
            return self.grouping_elements().map(Group::Rollup);
        }
        if self.eat_keyword(Keyword::Cube) {
            return self.grouping_elements().map(Group::Cube);
        }
        self.expr().map(Group::Expression)
    }

    fn grouping_elements(&mut self) -> PResult<Vec<GroupingElement>> {
        self.literal("(")?;
        let items = self.comma_list(Self::grouping_element)?;
        self.literal(")")?;
        Ok(items)
    }

    /// A `ROLLUP`/`CUBE` item: a grouping set takes precedence over a
    /// parenthesized expression.
    fn grouping_element(&mut self) -> PResult<GroupingElement> {
        if self.current().is_literal("(") {
            let start = self.pos;
            if let Ok(set) = self.grouping_set() {
                return Ok(GroupingElement::Set(set));
            }
            self.pos = start;
        }
        self.expr().map(GroupingElement::Expression)
    }

    fn grouping_set(&mut self) -> PResult<GroupingSet> {
        self.literal("(")?;
        if self.eat_delimiter(")") {
            return Ok(GroupingSet::default());
        }
        let elements = self.comma_list(Self::expr)?;
        self.literal(")")?;
        Ok(GroupingSet { elements })
    }

    fn sort_expr(&mut self) -> PResult<SortExpr> {
        let expr = self.expr()?;
        let order = if self.eat_keyword(Keyword::Asc) {
            Some(SortOrder::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(SortOrder::Desc)
        } else {
            None
        };
        Ok(SortExpr { expr, order })
    }

    /// Parses an optional alias: `[AS]` followed by a bare identifier or a
    /// string literal.
    fn alias(&mut self) -> PResult<Option<String>> {
        if self.eat_keyword(Keyword::As) {
            return self.alias_name().map(Some);
        }
        match &self.current().kind {
            TokenKind::Identifier(_) | TokenKind::String(_) => self.alias_name().map(Some),
            _ => Ok(None),
        }
    }

    fn alias_name(&mut self) -> PResult<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) | TokenKind::String(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.fail("identifier expected")),
        }
    }

    // --- Token-level helpers ---

    /// Returns the current token. The EOF token absorbs any further reads.
    pub(super) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the character offset of the current token.
    pub(super) fn offset(&self) -> usize {
        self.current().offset
    }

    /// Returns true if the token after the current one is the given
    /// delimiter.
    pub(super) fn next_is_delimiter(&self, text: &str) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(|t| matches!(&t.kind, TokenKind::Delimiter(d) if *d == text))
    }

    /// Advances past the current token, stopping at EOF.
    pub(super) fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Saves the cursor for later rewinding.
    pub(super) fn mark(&self) -> usize {
        self.pos
    }

    /// Rewinds the cursor to a previously saved mark.
    pub(super) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().as_keyword() == Some(keyword)
    }

    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn check_delimiter(&self, text: &str) -> bool {
        matches!(&self.current().kind, TokenKind::Delimiter(d) if *d == text)
    }

    pub(super) fn eat_delimiter(&mut self, text: &str) -> bool {
        if self.check_delimiter(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a specific keyword or delimiter, failing with
    /// `"<text> expected"`.
    ///
    /// # Panics
    ///
    /// Asserts that `text` is in the keyword or delimiter sets; requesting
    /// anything else is a bug in the grammar, not an input error.
    pub(super) fn literal(&mut self, text: &str) -> PResult<()> {
        assert!(is_literal_text(text), "not a keyword or delimiter: {text}");
        if self.current().is_literal(text) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(text))
        }
    }

    /// Consumes an identifier token, returning its text.
    pub(super) fn ident(&mut self) -> PResult<String> {
        match self.ident_opt() {
            Some(name) => Ok(name),
            None => Err(self.fail("identifier expected")),
        }
    }

    /// Consumes an identifier token if one is next.
    pub(super) fn ident_opt(&mut self) -> Option<String> {
        if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            self.advance();
            return Some(name);
        }
        None
    }

    /// Consumes an identifier or keyword token, returning its text
    /// (keywords come back lowercased).
    pub(super) fn ident_or_keyword(&mut self) -> PResult<String> {
        if let Some(keyword) = self.current().as_keyword() {
            self.advance();
            return Ok(String::from(keyword.as_str()));
        }
        self.ident()
    }

    /// Parses `f (, f)*`.
    pub(super) fn comma_list<T>(&mut self, f: fn(&mut Self) -> PResult<T>) -> PResult<Vec<T>> {
        let mut items = vec![f(self)?];
        while self.eat_delimiter(",") {
            items.push(f(self)?);
        }
        Ok(items)
    }

    /// Runs `f`; when it fails without consuming anything, the failure is
    /// replaced by `label` at the rule's start offset. Failures that made
    /// progress keep their own deeper message. The cursor is rewound on
    /// failure either way.
    pub(super) fn labeled<T>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let start = self.pos;
        let start_offset = self.offset();
        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.pos = start;
                if err.offset <= start_offset {
                    Err(self.fail(label))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Creates an error at the current offset and records it as the
    /// deepest-so-far when it is at least as far as the previous deepest.
    pub(super) fn fail(&mut self, message: impl Into<String>) -> ParseError {
        let err = ParseError::new(message, self.offset());
        self.record(&err);
        err
    }

    /// Creates a `"<text> expected"` error at the current offset.
    pub(super) fn expected(&mut self, text: &str) -> ParseError {
        let err = ParseError::expected(text, self.offset());
        self.record(&err);
        err
    }

    fn record(&mut self, err: &ParseError) {
        if self
            .deepest
            .as_ref()
            .map_or(true, |deepest| err.offset >= deepest.offset)
        {
            self.deepest = Some(err.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().expect("lexes"))
    }

    #[test]
    fn test_literal_matcher() {
        let mut p = parser("select *");
        assert!(p.literal("select").is_ok());
        assert!(p.literal("*").is_ok());
        let err = p.literal("from").unwrap_err();
        assert_eq!(err.message, "from expected");
    }

    #[test]
    #[should_panic(expected = "not a keyword or delimiter")]
    fn test_literal_matcher_rejects_unknown_text() {
        let mut p = parser("select");
        let _ = p.literal("limit");
    }

    #[test]
    fn test_ident_or_keyword_lowercases_keywords() {
        let mut p = parser("COUNT CamelCase");
        assert_eq!(p.ident_or_keyword().unwrap(), "count");
        assert_eq!(p.ident_or_keyword().unwrap(), "CamelCase");
    }

    #[test]
    fn test_deepest_error_wins() {
        let mut p = parser("select a from");
        let err = p.parse_statement().unwrap_err();
        assert_eq!(err.message, "table, join or subselect expected");
        assert_eq!(err.offset, 13);
    }

    #[test]
    fn test_statement_requires_end_of_input() {
        let mut p = parser("select a; select b");
        let err = p.parse_statement().unwrap_err();
        assert_eq!(err.message, "end of statement expected");
        assert_eq!(err.offset, 10);
    }
}
