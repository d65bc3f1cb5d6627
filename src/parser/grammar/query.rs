//! Query expressions
//!
//! ```text
//! query        = [WITH with_item (, with_item)*] set_expr [ORDER BY ...] [OFFSET n]
//! set_expr     = intersect ((UNION | EXCEPT) [ALL] intersect)*
//! intersect    = select (INTERSECT [ALL] select)*
//! select       = SELECT [DISTINCT | ALL] [TOP n] items FROM ... [WHERE] [GROUP BY] [HAVING]
//! ```

use super::constraints::condition;
use super::from::from_clause;
use super::operands::{column_ref, value_expression};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::TokenKind;
use crate::parser::AdqlVersion;
use crate::syntax::{
    Offset, Operand, OrderItem, Query, QueryBody, SelectClause, SelectItem, SelectQuery,
    SetOperation, SetOperator, TableName, WithItem,
};

/// Full query expression; `WITH` is only accepted at top level
pub(super) fn query(p: &mut Parser<'_>, top_level: bool) -> PResult<Query> {
    let start = p.token_index();

    let mut with = Vec::new();
    if top_level && p.at(TokenKind::WITH_KW) {
        p.bump();
        loop {
            with.push(with_item(p)?);
            if !p.eat(TokenKind::COMMA) {
                break;
            }
        }
    }

    let body_start = p.token_index();
    let mut body = set_expression(p)?;

    let order_by = if p.at(TokenKind::ORDER_KW) {
        order_by_clause(p)?
    } else {
        Vec::new()
    };
    let offset = offset_clause(p)?;
    let body_position = p.span_from(body_start);
    match &mut body {
        QueryBody::Select(select) => {
            select.order_by = order_by;
            select.offset = offset;
            select.position = body_position;
        }
        QueryBody::Set(set) => {
            set.order_by = order_by;
            set.offset = offset;
            set.position = body_position;
        }
    }

    Ok(Query {
        with,
        body,
        position: p.span_from(start),
    })
}

fn with_item(p: &mut Parser<'_>) -> PResult<WithItem> {
    let start = p.token_index();
    let name = p.identifier()?;

    let mut columns = Vec::new();
    if p.eat(TokenKind::L_PAREN) {
        loop {
            columns.push(p.identifier()?);
            if !p.eat(TokenKind::COMMA) {
                break;
            }
        }
        p.expect(TokenKind::R_PAREN)?;
    }

    p.expect(TokenKind::AS_KW)?;
    p.expect(TokenKind::L_PAREN)?;
    let query = query(p, false)?;
    p.expect(TokenKind::R_PAREN)?;

    Ok(WithItem {
        name,
        columns,
        query: Box::new(query),
        position: p.span_from(start),
    })
}

fn set_expression(p: &mut Parser<'_>) -> PResult<QueryBody> {
    let start = p.token_index();
    let mut left = intersect_term(p)?;
    loop {
        let op = if p.at(TokenKind::UNION_KW) {
            SetOperator::Union
        } else if p.at(TokenKind::EXCEPT_KW) {
            SetOperator::Except
        } else {
            break;
        };
        p.bump();
        let all = p.eat(TokenKind::ALL_KW);
        let right = intersect_term(p)?;
        left = set_operation(p, start, left, op, all, right);
    }
    Ok(left)
}

fn intersect_term(p: &mut Parser<'_>) -> PResult<QueryBody> {
    let start = p.token_index();
    let mut left = QueryBody::Select(Box::new(select_query(p)?));
    while p.at(TokenKind::INTERSECT_KW) {
        p.bump();
        let all = p.eat(TokenKind::ALL_KW);
        let right = QueryBody::Select(Box::new(select_query(p)?));
        left = set_operation(p, start, left, SetOperator::Intersect, all, right);
    }
    Ok(left)
}

fn set_operation(
    p: &Parser<'_>,
    start: usize,
    left: QueryBody,
    op: SetOperator,
    all: bool,
    right: QueryBody,
) -> QueryBody {
    QueryBody::Set(Box::new(SetOperation {
        left,
        op,
        all,
        right,
        order_by: Vec::new(),
        offset: None,
        position: p.span_from(start),
    }))
}

/// `SELECT ... FROM ... [WHERE ...] [GROUP BY ...] [HAVING ...]`
fn select_query(p: &mut Parser<'_>) -> PResult<SelectQuery> {
    let start = p.token_index();
    let select = select_clause(p)?;
    let from = from_clause(p)?;

    let where_clause = if p.eat(TokenKind::WHERE_KW) {
        Some(condition(p)?)
    } else {
        None
    };
    let group_by = if p.at(TokenKind::GROUP_KW) {
        group_by_clause(p)?
    } else {
        Vec::new()
    };
    let having = if p.eat(TokenKind::HAVING_KW) {
        Some(condition(p)?)
    } else {
        None
    };

    Ok(SelectQuery {
        select,
        from,
        where_clause,
        group_by,
        having,
        order_by: Vec::new(),
        offset: None,
        position: p.span_from(start),
    })
}

pub(super) fn select_clause(p: &mut Parser<'_>) -> PResult<SelectClause> {
    let start = p.token_index();
    p.expect(TokenKind::SELECT_KW)?;

    let distinct = if p.eat(TokenKind::DISTINCT_KW) {
        true
    } else {
        p.eat(TokenKind::ALL_KW);
        false
    };

    let top = if p.eat(TokenKind::TOP_KW) {
        Some(unsigned_integer(p, "TOP")?)
    } else {
        None
    };

    let mut items = Vec::new();
    loop {
        items.push(select_item(p)?);
        if !p.eat(TokenKind::COMMA) {
            break;
        }
    }

    Ok(SelectClause {
        distinct,
        top,
        items,
        position: p.span_from(start),
    })
}

fn select_item(p: &mut Parser<'_>) -> PResult<SelectItem> {
    let start = p.token_index();
    if p.eat(TokenKind::STAR) {
        return Ok(SelectItem::All {
            position: p.span_from(start),
        });
    }

    // table.* (the table name may be qualified)
    if p.is_identifier(0) && p.nth(1) == TokenKind::DOT {
        let checkpoint = p.checkpoint();
        let parts = p.identifier_chain(3)?;
        if p.kind() == TokenKind::DOT && p.nth(1) == TokenKind::STAR {
            p.bump();
            p.bump();
            if let Some(table) = TableName::from_parts(parts) {
                return Ok(SelectItem::AllOf {
                    table,
                    position: p.span_from(start),
                });
            }
        }
        p.rewind(checkpoint);
    }

    let operand = value_expression(p)?;
    let alias = if p.eat(TokenKind::AS_KW) {
        Some(p.identifier()?)
    } else if p.at_identifier() {
        Some(p.identifier()?)
    } else {
        None
    };
    Ok(SelectItem::Expr { operand, alias })
}

/// `ORDER BY item [ASC | DESC] (, item [ASC | DESC])*`
///
/// ADQL 2.0 only orders by columns or select-list indexes.
pub(super) fn order_by_clause(p: &mut Parser<'_>) -> PResult<Vec<OrderItem>> {
    p.expect(TokenKind::ORDER_KW)?;
    p.expect(TokenKind::BY_KW)?;

    let mut items = Vec::new();
    loop {
        let start = p.token_index();
        let expr = if p.version() == AdqlVersion::V2_0 {
            if p.at(TokenKind::UNSIGNED_INTEGER) {
                let token = p.bump();
                Operand::numeric(token.text).with_position(p.span_from(start))
            } else {
                column_ref(p)?
            }
        } else {
            value_expression(p)?
        };
        let descending = if p.eat(TokenKind::DESC_KW) {
            true
        } else {
            p.eat(TokenKind::ASC_KW);
            false
        };
        items.push(OrderItem {
            expr,
            descending,
            position: p.span_from(start),
        });
        if !p.eat(TokenKind::COMMA) {
            break;
        }
    }
    Ok(items)
}

/// `GROUP BY item (, item)*`
///
/// ADQL 2.0 only groups by columns.
pub(super) fn group_by_clause(p: &mut Parser<'_>) -> PResult<Vec<Operand>> {
    p.expect(TokenKind::GROUP_KW)?;
    p.expect(TokenKind::BY_KW)?;

    let mut items = Vec::new();
    loop {
        let item = if p.version() == AdqlVersion::V2_0 {
            column_ref(p)?
        } else {
            value_expression(p)?
        };
        items.push(item);
        if !p.eat(TokenKind::COMMA) {
            break;
        }
    }
    Ok(items)
}

fn offset_clause(p: &mut Parser<'_>) -> PResult<Option<Offset>> {
    let start = p.token_index();
    if !p.eat(TokenKind::OFFSET_KW) {
        return Ok(None);
    }
    let value = unsigned_integer(p, "OFFSET")?;
    Ok(Some(Offset {
        value,
        position: p.span_from(start),
    }))
}

fn unsigned_integer(p: &mut Parser<'_>, clause: &str) -> PResult<u64> {
    let token = p.expect(TokenKind::UNSIGNED_INTEGER)?;
    token.text.parse::<u64>().map_err(|_| {
        p.error_at(
            format!("Incorrect {clause} value: \"{}\" is not a valid unsigned integer!", token.text),
            p.span_from(p.token_index() - 1),
            ErrorCode::E0104,
        )
    })
}
