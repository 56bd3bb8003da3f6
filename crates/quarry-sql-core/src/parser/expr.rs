//! The expression grammar: precedence layers from `OR` at the top down to
//! the primary expressions, with memoization at the entry point.

use crate::ast::{
    ColumnIdent, CompareOp, Expr, FunctionCall, Literal, MathOp, Placeholder, TableIdent,
    TypeLiteral, UnaryOp,
};
use crate::lexer::{Keyword, TokenKind};

use super::core::{PResult, Parser};

/// Additive operator family.
const ADD_OPS: &[&str] = &["+", "-"];
/// Multiplicative operator family.
const MUL_OPS: &[&str] = &["*", "/"];
/// Comparison operator family (`like` is a keyword, the rest delimiters).
const COMPARE_OPS: &[&str] = &["=", "<>", "<", ">", ">=", "<=", "like"];

impl Parser {
    /// Memoized entry point of the expression grammar.
    ///
    /// Results (successes and failures alike) are cached per start
    /// position, so overlapping attempts from different alternatives reuse
    /// earlier work and parsing stays linear in the input length.
    pub(super) fn expr(&mut self) -> PResult<Expr> {
        let start = self.mark();
        if let Some(hit) = self.expr_memo.get(&start) {
            return match hit.clone() {
                Ok((expr, end)) => {
                    self.reset(end);
                    Ok(expr)
                }
                Err(err) => {
                    self.reset(start);
                    Err(err)
                }
            };
        }
        let result = self.labeled("expression expected", Self::or_expr);
        let entry = match &result {
            Ok(expr) => Ok((expr.clone(), self.mark())),
            Err(err) => Err(err.clone()),
        };
        self.expr_memo.insert(start, entry);
        result
    }

    fn or_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.and_expr()?;
        while self.eat_keyword(Keyword::Or) {
            let rhs = self.and_expr()?;
            lhs = Expr::Or {
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.not_expr()?;
        while self.eat_keyword(Keyword::And) {
            let rhs = self.not_expr()?;
            lhs = Expr::And {
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `NOT` is right-recursive, so `NOT NOT x` is legal.
    fn not_expr(&mut self) -> PResult<Expr> {
        if self.eat_keyword(Keyword::Not) {
            return Ok(Expr::Not(Box::new(self.not_expr()?)));
        }
        self.exists_expr()
    }

    fn exists_expr(&mut self) -> PResult<Expr> {
        if self.eat_keyword(Keyword::Exists) {
            self.literal("(")?;
            let select = self.select()?;
            self.literal(")")?;
            return Ok(Expr::Exists(Box::new(select)));
        }
        self.comparison_expr()
    }

    fn comparison_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.postfix_expr()?;
        while let Some(op) = self.peek_operator(COMPARE_OPS).and_then(CompareOp::from_str) {
            self.advance();
            let rhs = self.postfix_expr()?;
            lhs = Expr::Comparison {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// The postfix predicate families: `IS [NOT] <truth>`, `[NOT] IN`, and
    /// `[NOT] BETWEEN`, folded left over a single repeated-suffix loop so
    /// that chains may interleave: `a BETWEEN b AND c IS NULL` is
    /// `(a BETWEEN b AND c) IS NULL`.
    ///
    /// The placeholder forms `IN ?{...}` and `BETWEEN ?[...)` are
    /// recognized before the value-list forms so the `?{` / `?[` prefix is
    /// never consumed by the general placeholder rule.
    fn postfix_expr(&mut self) -> PResult<Expr> {
        let mut lhs = self.add_expr()?;
        loop {
            let save = self.mark();
            let negated = self.eat_keyword(Keyword::Not);
            if self.eat_keyword(Keyword::In) {
                if self.at_placeholder("{") {
                    let set = self.bracket_placeholder("{", "}")?;
                    lhs = Expr::InPlaceholder {
                        expr: Box::new(lhs),
                        negated,
                        set,
                    };
                } else {
                    self.literal("(")?;
                    let list = self.comma_list(Self::expr)?;
                    self.literal(")")?;
                    lhs = Expr::In {
                        expr: Box::new(lhs),
                        negated,
                        list,
                    };
                }
            } else if self.eat_keyword(Keyword::Between) {
                if self.at_placeholder("[") {
                    let range = self.bracket_placeholder("[", ")")?;
                    lhs = Expr::BetweenPlaceholder {
                        expr: Box::new(lhs),
                        negated,
                        range,
                    };
                } else {
                    let low = self.add_expr()?;
                    self.literal("and")?;
                    let high = self.add_expr()?;
                    lhs = Expr::Between {
                        expr: Box::new(lhs),
                        negated,
                        low: Box::new(low),
                        high: Box::new(high),
                    };
                }
            } else if !negated && self.eat_keyword(Keyword::Is) {
                let is_negated = self.eat_keyword(Keyword::Not);
                let value = self.truth_literal()?;
                lhs = Expr::Is {
                    expr: Box::new(lhs),
                    negated: is_negated,
                    value,
                };
            } else {
                self.reset(save);
                break;
            }
        }
        Ok(lhs)
    }

    fn add_expr(&mut self) -> PResult<Expr> {
        self.math_level(ADD_OPS, Self::mul_expr)
    }

    fn mul_expr(&mut self) -> PResult<Expr> {
        self.math_level(MUL_OPS, Self::unary_expr)
    }

    /// One left-associative arithmetic level, parameterized by its operator
    /// family and the next-tighter level.
    fn math_level(&mut self, ops: &[&str], next: fn(&mut Self) -> PResult<Expr>) -> PResult<Expr> {
        let mut lhs = next(self)?;
        while let Some(op) = self.peek_operator(ops).and_then(MathOp::from_str) {
            self.advance();
            let rhs = next(self)?;
            lhs = Expr::Math {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary_expr(&mut self) -> PResult<Expr> {
        let op = if self.eat_delimiter("+") {
            Some(UnaryOp::Plus)
        } else if self.eat_delimiter("-") {
            Some(UnaryOp::Minus)
        } else {
            None
        };
        match op {
            Some(op) => Ok(Expr::Unary {
                op,
                operand: Box::new(self.unary_expr()?),
            }),
            None => self.simple_expr(),
        }
    }

    /// Primary expressions, tried in order: literal, function call, cast,
    /// case, column, `(select)`, `(expr)`, placeholder.
    fn simple_expr(&mut self) -> PResult<Expr> {
        let pos = self.offset();

        let literal = match &self.current().kind {
            TokenKind::Integer(value) => Some(Literal::Integer(*value)),
            TokenKind::Decimal(value) => Some(Literal::Decimal(*value)),
            TokenKind::String(text) => Some(Literal::String(text.clone())),
            TokenKind::Keyword(Keyword::True) => Some(Literal::True),
            TokenKind::Keyword(Keyword::False) => Some(Literal::False),
            TokenKind::Keyword(Keyword::Unknown) => Some(Literal::Unknown),
            TokenKind::Keyword(Keyword::Null) => Some(Literal::Null),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance();
            return Ok(Expr::Literal { value, pos });
        }

        if self.at_function_call() {
            let save = self.mark();
            match self.function_call() {
                Ok(expr) => return Ok(expr),
                Err(_) => self.reset(save),
            }
        }

        if self.eat_keyword(Keyword::Cast) {
            self.literal("(")?;
            let expr = self.expr()?;
            self.literal("as")?;
            let target = self.type_literal()?;
            self.literal(")")?;
            return Ok(Expr::Cast {
                expr: Box::new(expr),
                target,
            });
        }

        if self.check_keyword(Keyword::Case) {
            return self.case_expr();
        }

        if matches!(self.current().kind, TokenKind::Identifier(_)) {
            return self.column_expr(pos);
        }

        if self.check_delimiter("(") {
            let save = self.mark();
            self.advance();
            if let Ok(select) = self.select() {
                self.literal(")")?;
                return Ok(Expr::Subquery(Box::new(select)));
            }
            self.reset(save);
            self.advance();
            let expr = self.expr()?;
            self.literal(")")?;
            return Ok(Expr::Paren(Box::new(expr)));
        }

        if self.eat_delimiter("?") {
            let placeholder = self.placeholder_body()?;
            return Ok(Expr::Placeholder(placeholder));
        }

        Err(self.fail("Invalid expression"))
    }

    /// Returns true when an identifier or keyword directly followed by `(`
    /// is next; reserved words are legal function names.
    fn at_function_call(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Identifier(_) | TokenKind::Keyword(_)
        ) && self.next_is_delimiter("(")
    }

    fn function_call(&mut self) -> PResult<Expr> {
        let name = self.ident_or_keyword()?.to_lowercase();
        self.literal("(")?;
        let quantifier = self.set_quantifier();
        let args = if self.check_delimiter(")") {
            Vec::new()
        } else {
            self.comma_list(Self::expr)?
        };
        self.literal(")")?;
        Ok(Expr::Function(FunctionCall {
            name,
            quantifier,
            args,
        }))
    }

    fn case_expr(&mut self) -> PResult<Expr> {
        self.literal("case")?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.expr()?))
        };
        let mut when_clauses = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.expr()?;
            self.literal("then")?;
            let result = self.expr()?;
            when_clauses.push((condition, result));
        }
        if when_clauses.is_empty() {
            return Err(self.expected("when"));
        }
        let else_clause = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.expr()?))
        } else {
            None
        };
        self.literal("end")?;
        Ok(Expr::Case {
            operand,
            when_clauses,
            else_clause,
        })
    }

    /// A column reference of one, two, or three name segments.
    fn column_expr(&mut self, pos: usize) -> PResult<Expr> {
        let first = self.ident()?;
        if !self.eat_delimiter(".") {
            return Ok(Expr::Column {
                column: ColumnIdent {
                    name: first,
                    table: None,
                },
                pos,
            });
        }
        let second = self.ident()?;
        if !self.eat_delimiter(".") {
            return Ok(Expr::Column {
                column: ColumnIdent {
                    name: second,
                    table: Some(TableIdent {
                        name: first,
                        schema: None,
                    }),
                },
                pos,
            });
        }
        let third = self.ident()?;
        Ok(Expr::Column {
            column: ColumnIdent {
                name: third,
                table: Some(TableIdent {
                    name: second,
                    schema: Some(first),
                }),
            },
            pos,
        })
    }

    /// Returns true when a `?` directly followed by the given opening
    /// bracket is next.
    fn at_placeholder(&self, open: &str) -> bool {
        self.check_delimiter("?") && self.next_is_delimiter(open)
    }

    /// Parses `? <open> [name] [: type] <close>`; the range form closes
    /// with `)` rather than `]`.
    fn bracket_placeholder(&mut self, open: &str, close: &str) -> PResult<Placeholder> {
        self.literal("?")?;
        self.literal(open)?;
        let placeholder = self.placeholder_body()?;
        self.literal(close)?;
        Ok(placeholder)
    }

    /// The interior of any placeholder form: an optional name and an
    /// optional `: type` hint.
    fn placeholder_body(&mut self) -> PResult<Placeholder> {
        let name = self.ident_opt();
        let type_hint = if self.eat_delimiter(":") {
            Some(self.type_literal()?)
        } else {
            None
        };
        Ok(Placeholder { name, type_hint })
    }

    fn type_literal(&mut self) -> PResult<TypeLiteral> {
        if let Some(keyword) = self.current().as_keyword() {
            if let Some(ty) = TypeLiteral::from_keyword(keyword) {
                self.advance();
                return Ok(ty);
            }
        }
        Err(self.fail("type expected"))
    }

    fn truth_literal(&mut self) -> PResult<Literal> {
        let value = match self.current().as_keyword() {
            Some(Keyword::True) => Literal::True,
            Some(Keyword::False) => Literal::False,
            Some(Keyword::Unknown) => Literal::Unknown,
            Some(Keyword::Null) => Literal::Null,
            _ => return Err(self.fail("true, false, unknown or null expected")),
        };
        self.advance();
        Ok(value)
    }

    /// Returns the spelling of the current token when it is one of the
    /// given operator spellings (delimiters or keywords).
    fn peek_operator(&self, ops: &[&str]) -> Option<&'static str> {
        let text = match &self.current().kind {
            TokenKind::Delimiter(d) => *d,
            TokenKind::Keyword(keyword) => keyword.as_str(),
            _ => return None,
        };
        ops.contains(&text).then_some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn expr(sql: &str) -> Expr {
        let tokens = Lexer::new(sql).tokenize().expect("lexes");
        let mut parser = Parser::new(tokens);
        let expr = parser.expr().unwrap_or_else(|e| panic!("{sql:?}: {e}"));
        assert!(parser.current().is_eof(), "leftover input in {sql:?}");
        expr
    }

    #[test]
    fn test_mul_binds_tighter_than_add() {
        let e = expr("1 + 2 * 3");
        let Expr::Math { op: MathOp::Add, right, .. } = e else {
            panic!("expected addition at the top");
        };
        assert!(matches!(*right, Expr::Math { op: MathOp::Mul, .. }));
    }

    #[test]
    fn test_left_associative_subtraction() {
        let e = expr("1 - 2 - 3");
        let Expr::Math { op: MathOp::Sub, left, .. } = e else {
            panic!("expected subtraction at the top");
        };
        assert!(matches!(*left, Expr::Math { op: MathOp::Sub, .. }));
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let e = expr("not a = b");
        let Expr::Not(inner) = e else {
            panic!("expected NOT at the top");
        };
        assert!(matches!(*inner, Expr::Comparison { op: CompareOp::Eq, .. }));
    }

    #[test]
    fn test_and_over_or() {
        let e = expr("a = b and c = d or e");
        let Expr::Or { left, right } = e else {
            panic!("expected OR at the top");
        };
        assert!(matches!(*left, Expr::And { .. }));
        assert!(matches!(*right, Expr::Column { .. }));
    }

    #[test]
    fn test_between_is_postfix() {
        let e = expr("a between b and c");
        assert!(matches!(e, Expr::Between { negated: false, .. }));
    }

    #[test]
    fn test_postfix_chain_between_then_is() {
        let e = expr("a between b and c is null");
        let Expr::Is { expr: inner, negated: false, value: Literal::Null } = e else {
            panic!("expected IS NULL at the top");
        };
        assert!(matches!(*inner, Expr::Between { .. }));
    }

    #[test]
    fn test_is_chain() {
        let e = expr("a is null is not unknown");
        let Expr::Is { expr: inner, negated: true, value: Literal::Unknown } = e else {
            panic!("expected IS NOT UNKNOWN at the top");
        };
        assert!(matches!(
            *inner,
            Expr::Is { negated: false, value: Literal::Null, .. }
        ));
    }

    #[test]
    fn test_double_not() {
        let e = expr("not not a");
        let Expr::Not(inner) = e else { panic!("expected NOT") };
        assert!(matches!(*inner, Expr::Not(_)));
    }

    #[test]
    fn test_nested_parens_stay_linear() {
        let e = expr("((((a))))");
        let mut depth = 0;
        let mut cursor = &e;
        while let Expr::Paren(inner) = cursor {
            depth += 1;
            cursor = inner;
        }
        assert_eq!(depth, 4);
        assert!(matches!(cursor, Expr::Column { .. }));
    }

    #[test]
    fn test_unary_sign_nests() {
        let e = expr("- + 1");
        let Expr::Unary { op: UnaryOp::Minus, operand } = e else {
            panic!("expected unary minus");
        };
        assert!(matches!(*operand, Expr::Unary { op: UnaryOp::Plus, .. }));
    }

    #[test]
    fn test_in_list_non_empty() {
        let e = expr("x in (1, 2, 3)");
        let Expr::In { list, negated: false, .. } = e else {
            panic!("expected IN");
        };
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_not_in_set_placeholder() {
        let e = expr("x not in ?{ids}");
        let Expr::InPlaceholder { negated: true, set, .. } = e else {
            panic!("expected IN with set placeholder");
        };
        assert_eq!(set.name.as_deref(), Some("ids"));
        assert_eq!(set.type_hint, None);
    }

    #[test]
    fn test_between_range_placeholder() {
        let e = expr("x between ?[lo:integer)");
        let Expr::BetweenPlaceholder { negated: false, range, .. } = e else {
            panic!("expected BETWEEN with range placeholder");
        };
        assert_eq!(range.name.as_deref(), Some("lo"));
        assert_eq!(range.type_hint, Some(TypeLiteral::Integer));
    }

    #[test]
    fn test_reserved_word_as_function_name() {
        let e = expr("count(distinct x)");
        let Expr::Function(call) = e else {
            panic!("expected function call");
        };
        assert_eq!(call.name, "count");
        assert_eq!(call.quantifier, Some(crate::ast::SetQuantifier::Distinct));
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn test_function_name_is_lowercased() {
        let e = expr("UPPER(x)");
        let Expr::Function(call) = e else {
            panic!("expected function call");
        };
        assert_eq!(call.name, "upper");
    }

    #[test]
    fn test_cast_with_datetime_alias() {
        let e = expr("cast(x as datetime)");
        assert!(matches!(
            e,
            Expr::Cast { target: TypeLiteral::Timestamp, .. }
        ));
    }

    #[test]
    fn test_case_with_scrutinee() {
        let e = expr("case x when 1 then 'a' else 'b' end");
        let Expr::Case { operand, when_clauses, else_clause } = e else {
            panic!("expected CASE");
        };
        assert!(operand.is_some());
        assert_eq!(when_clauses.len(), 1);
        assert!(else_clause.is_some());
    }

    #[test]
    fn test_plain_placeholder_with_name_and_type() {
        let e = expr("?limit0:integer");
        let Expr::Placeholder(placeholder) = e else {
            panic!("expected placeholder");
        };
        assert_eq!(placeholder.name.as_deref(), Some("limit0"));
        assert_eq!(placeholder.type_hint, Some(TypeLiteral::Integer));
    }
}
