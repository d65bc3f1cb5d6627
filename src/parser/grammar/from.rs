//! FROM clause
//!
//! ```text
//! from_clause = FROM from_item (, from_item)*
//! from_item   = table_ref (join)*
//! join        = [NATURAL] [INNER | (LEFT | RIGHT | FULL) [OUTER]] JOIN table_ref [ON cond | USING (cols)]
//!             | CROSS JOIN table_ref
//! table_ref   = table_name [[AS] alias] | ( query ) [AS] alias
//! ```

use super::constraints::condition;
use super::query::query;
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::TokenKind;
use crate::syntax::{FromItem, Join, JoinCondition, JoinKind, TableName};

pub(super) fn from_clause(p: &mut Parser<'_>) -> PResult<Vec<FromItem>> {
    p.expect(TokenKind::FROM_KW)?;
    let mut items = Vec::new();
    loop {
        items.push(from_item(p)?);
        if !p.eat(TokenKind::COMMA) {
            break;
        }
    }
    Ok(items)
}

fn from_item(p: &mut Parser<'_>) -> PResult<FromItem> {
    let start = p.token_index();
    let mut left = table_ref(p)?;

    loop {
        if p.at(TokenKind::CROSS_KW) {
            p.bump();
            p.expect(TokenKind::JOIN_KW)?;
            let right = table_ref(p)?;
            left = FromItem::Join(Box::new(Join {
                left,
                kind: JoinKind::Cross,
                natural: false,
                right,
                condition: None,
                position: p.span_from(start),
            }));
            continue;
        }

        let natural = p.eat(TokenKind::NATURAL_KW);
        let kind = if let Some(kind) = join_kind(p)? {
            kind
        } else if natural {
            return Err(p.unexpected());
        } else {
            break;
        };

        let right = table_ref(p)?;
        let condition = if natural {
            None
        } else if p.eat(TokenKind::ON_KW) {
            Some(JoinCondition::On(condition(p)?))
        } else if p.eat(TokenKind::USING_KW) {
            p.expect(TokenKind::L_PAREN)?;
            let mut columns = vec![p.identifier()?];
            while p.eat(TokenKind::COMMA) {
                columns.push(p.identifier()?);
            }
            p.expect(TokenKind::R_PAREN)?;
            Some(JoinCondition::Using(columns))
        } else {
            return Err(p.unexpected());
        };

        left = FromItem::Join(Box::new(Join {
            left,
            kind,
            natural,
            right,
            condition,
            position: p.span_from(start),
        }));
    }

    Ok(left)
}

/// `[INNER] JOIN` or `(LEFT | RIGHT | FULL) [OUTER] JOIN`; `None` if no join starts here
fn join_kind(p: &mut Parser<'_>) -> PResult<Option<JoinKind>> {
    let kind = if p.eat(TokenKind::INNER_KW) {
        JoinKind::Inner
    } else if p.at(TokenKind::JOIN_KW) {
        JoinKind::Inner
    } else {
        let outer = if p.at(TokenKind::LEFT_KW) {
            JoinKind::LeftOuter
        } else if p.at(TokenKind::RIGHT_KW) {
            JoinKind::RightOuter
        } else if p.at(TokenKind::FULL_KW) {
            JoinKind::FullOuter
        } else {
            return Ok(None);
        };
        p.bump();
        p.eat(TokenKind::OUTER_KW);
        outer
    };
    p.expect(TokenKind::JOIN_KW)?;
    Ok(Some(kind))
}

fn table_ref(p: &mut Parser<'_>) -> PResult<FromItem> {
    let start = p.token_index();

    if p.eat(TokenKind::L_PAREN) {
        let subquery = query(p, false)?;
        p.expect(TokenKind::R_PAREN)?;
        p.eat(TokenKind::AS_KW);
        let alias = p.identifier()?;
        return Ok(FromItem::Subquery {
            query: Box::new(subquery),
            alias,
            position: p.span_from(start),
        });
    }

    let parts = p.identifier_chain(3)?;
    let name = TableName::from_parts(parts).ok_or_else(|| p.unexpected())?;
    let alias = if p.eat(TokenKind::AS_KW) {
        Some(p.identifier()?)
    } else if p.at_identifier() {
        Some(p.identifier()?)
    } else {
        None
    };

    Ok(FromItem::Table {
        name,
        alias,
        position: p.span_from(start),
    })
}
