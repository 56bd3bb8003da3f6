#![allow(dead_code)]

use quarry_sql_core::ast::{
    Expr, Group, GroupingElement, Projection, Relation, Select, SimpleSelect, Statement,
};
use quarry_sql_core::{parse_statement, ParseError};

pub fn parse(sql: &str) -> Statement {
    parse_statement(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_statement(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_select(sql: &str) -> SimpleSelect {
    match parse(sql) {
        Select::Simple(s) => s,
        other => panic!("Expected a simple SELECT, got {other:?}"),
    }
}

/// Parses and zeroes all recorded positions, for comparing statements that
/// differ only in layout.
pub fn parse_normalized(sql: &str) -> Statement {
    let mut statement = parse(sql);
    strip_positions(&mut statement);
    statement
}

/// Sets every recorded position in the tree to zero.
pub fn strip_positions(select: &mut Select) {
    for_each_pos(select, &mut |pos| *pos = 0);
}

/// Collects every recorded position in the tree.
pub fn positions(select: &Select) -> Vec<usize> {
    let mut clone = select.clone();
    let mut all = Vec::new();
    for_each_pos(&mut clone, &mut |pos| all.push(*pos));
    all
}

/// Applies `f` to every position field in the tree.
pub fn for_each_pos(select: &mut Select, f: &mut impl FnMut(&mut usize)) {
    match select {
        Select::Simple(simple) => {
            f(&mut simple.pos);
            for projection in &mut simple.projections {
                match projection {
                    Projection::AllColumns { pos } | Projection::AllTableColumns { pos, .. } => {
                        f(pos);
                    }
                    Projection::Expression { expr, pos, .. } => {
                        f(pos);
                        walk_expr(expr, f);
                    }
                }
            }
            for relation in &mut simple.relations {
                walk_relation(relation, f);
            }
            if let Some(where_clause) = &mut simple.where_clause {
                walk_expr(where_clause, f);
            }
            for group in &mut simple.group_by {
                walk_group(group, f);
            }
            for sort in &mut simple.order_by {
                walk_expr(&mut sort.expr, f);
            }
        }
        Select::Union {
            left, right, pos, ..
        } => {
            f(pos);
            for_each_pos(left, f);
            for_each_pos(right, f);
        }
    }
}

fn walk_relation(relation: &mut Relation, f: &mut impl FnMut(&mut usize)) {
    match relation {
        Relation::Table { pos, .. } => f(pos),
        Relation::Subquery { select, pos, .. } => {
            f(pos);
            for_each_pos(select, f);
        }
        Relation::Join {
            left,
            right,
            on,
            pos,
            ..
        } => {
            f(pos);
            walk_relation(left, f);
            walk_relation(right, f);
            if let Some(on) = on {
                walk_expr(on, f);
            }
        }
    }
}

fn walk_group(group: &mut Group, f: &mut impl FnMut(&mut usize)) {
    match group {
        Group::Expression(expr) => walk_expr(expr, f),
        Group::GroupingSets(sets) => {
            for set in sets {
                for expr in &mut set.elements {
                    walk_expr(expr, f);
                }
            }
        }
        Group::Rollup(items) | Group::Cube(items) => {
            for item in items {
                match item {
                    GroupingElement::Expression(expr) => walk_expr(expr, f),
                    GroupingElement::Set(set) => {
                        for expr in &mut set.elements {
                            walk_expr(expr, f);
                        }
                    }
                }
            }
        }
    }
}

fn walk_expr(expr: &mut Expr, f: &mut impl FnMut(&mut usize)) {
    match expr {
        Expr::Literal { pos, .. } | Expr::Column { pos, .. } => f(pos),
        Expr::Function(call) => {
            for arg in &mut call.args {
                walk_expr(arg, f);
            }
        }
        Expr::Cast { expr, .. } => walk_expr(expr, f),
        Expr::Case {
            operand,
            when_clauses,
            else_clause,
        } => {
            if let Some(operand) = operand {
                walk_expr(operand, f);
            }
            for (condition, result) in when_clauses {
                walk_expr(condition, f);
                walk_expr(result, f);
            }
            if let Some(else_clause) = else_clause {
                walk_expr(else_clause, f);
            }
        }
        Expr::Subquery(select) | Expr::Exists(select) => for_each_pos(select, f),
        Expr::Paren(inner) | Expr::Not(inner) => walk_expr(inner, f),
        Expr::Placeholder(_) => {}
        Expr::Unary { operand, .. } => walk_expr(operand, f),
        Expr::Math { left, right, .. }
        | Expr::Comparison { left, right, .. }
        | Expr::And { left, right }
        | Expr::Or { left, right } => {
            walk_expr(left, f);
            walk_expr(right, f);
        }
        Expr::Is { expr, .. } => walk_expr(expr, f),
        Expr::Between {
            expr, low, high, ..
        } => {
            walk_expr(expr, f);
            walk_expr(low, f);
            walk_expr(high, f);
        }
        Expr::BetweenPlaceholder { expr, .. } | Expr::InPlaceholder { expr, .. } => {
            walk_expr(expr, f);
        }
        Expr::In { expr, list, .. } => {
            walk_expr(expr, f);
            for element in list {
                walk_expr(element, f);
            }
        }
    }
}
