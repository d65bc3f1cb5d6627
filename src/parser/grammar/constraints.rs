//! Search conditions
//!
//! ```text
//! condition = and_cond (OR and_cond)*
//! and_cond  = not_cond (AND not_cond)*
//! not_cond  = NOT not_cond | ( condition ) | EXISTS ( query ) | predicate
//! predicate = value (comp_op value
//!                   | [NOT] BETWEEN value AND value
//!                   | [NOT] (LIKE | ILIKE) value
//!                   | [NOT] IN ( query | value (, value)* )
//!                   | IS [NOT] NULL)
//! ```

use super::operands::value_expression;
use super::query::query;
use crate::parser::errors::{ErrorCode, ParseError};
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::TokenKind;
use crate::syntax::{ComparisonOp, Constraint, ConstraintKind, InList, Operand};

pub(super) fn condition(p: &mut Parser<'_>) -> PResult<Constraint> {
    let start = p.token_index();
    let mut left = and_condition(p)?;
    while p.eat(TokenKind::OR_KW) {
        let right = and_condition(p)?;
        left = Constraint::new(ConstraintKind::Or(Box::new(left), Box::new(right)))
            .with_position(p.span_from(start));
    }
    Ok(left)
}

fn and_condition(p: &mut Parser<'_>) -> PResult<Constraint> {
    let start = p.token_index();
    let mut left = not_condition(p)?;
    while p.eat(TokenKind::AND_KW) {
        let right = not_condition(p)?;
        left = Constraint::new(ConstraintKind::And(Box::new(left), Box::new(right)))
            .with_position(p.span_from(start));
    }
    Ok(left)
}

fn not_condition(p: &mut Parser<'_>) -> PResult<Constraint> {
    let start = p.token_index();

    if p.eat(TokenKind::NOT_KW) {
        let inner = not_condition(p)?;
        return Ok(Constraint::new(ConstraintKind::Not(Box::new(inner)))
            .with_position(p.span_from(start)));
    }

    if p.eat(TokenKind::EXISTS_KW) {
        p.expect(TokenKind::L_PAREN)?;
        let subquery = query(p, false)?;
        p.expect(TokenKind::R_PAREN)?;
        return Ok(Constraint::new(ConstraintKind::Exists(Box::new(subquery)))
            .with_position(p.span_from(start)));
    }

    // `(` opens either a grouped condition or a parenthesised value
    if p.kind() == TokenKind::L_PAREN && p.nth(1) != TokenKind::SELECT_KW {
        let checkpoint = p.checkpoint();
        let group_error = match grouped_condition(p, start) {
            Ok(group) => return Ok(group),
            Err(err) => err,
        };
        p.rewind(checkpoint);
        return predicate(p).map_err(|value_error| furthest(group_error, value_error));
    }

    predicate(p)
}

fn grouped_condition(p: &mut Parser<'_>, start: usize) -> PResult<Constraint> {
    p.expect(TokenKind::L_PAREN)?;
    let inner = condition(p)?;
    p.expect(TokenKind::R_PAREN)?;
    Ok(Constraint::new(ConstraintKind::Group(Box::new(inner))).with_position(p.span_from(start)))
}

/// Keep the error of the attempt that went further into the query
fn furthest(a: ParseError, b: ParseError) -> ParseError {
    let begin = |e: &ParseError| e.position.map(|pos| (pos.begin_line, pos.begin_column));
    if begin(&a) > begin(&b) { a } else { b }
}

fn predicate(p: &mut Parser<'_>) -> PResult<Constraint> {
    let start = p.token_index();
    let value = value_expression(p)?;

    if let Some(op) = comparison_operator(p) {
        let right = value_expression(p)?;
        check_comparable(p, &value, op, &right)?;
        return Ok(Constraint::comparison(value, op, right).with_position(p.span_from(start)));
    }

    if p.eat(TokenKind::IS_KW) {
        let negated = p.eat(TokenKind::NOT_KW);
        p.expect(TokenKind::NULL_KW)?;
        if value.as_column().is_none() {
            return Err(p.error_at(
                format!("Only a column can be tested against NULL, not \"{value}\"!"),
                value.position,
                ErrorCode::E0604,
            ));
        }
        return Ok(Constraint::new(ConstraintKind::IsNull { value, negated })
            .with_position(p.span_from(start)));
    }

    let negated = p.eat(TokenKind::NOT_KW);

    if p.eat(TokenKind::BETWEEN_KW) {
        let low = value_expression(p)?;
        p.expect(TokenKind::AND_KW)?;
        let high = value_expression(p)?;
        return Ok(Constraint::new(ConstraintKind::Between {
            value,
            low,
            high,
            negated,
        })
        .with_position(p.span_from(start)));
    }

    if p.at(TokenKind::LIKE_KW) || p.at(TokenKind::ILIKE_KW) {
        let op = match (p.bump().kind, negated) {
            (TokenKind::LIKE_KW, false) => ComparisonOp::Like,
            (TokenKind::LIKE_KW, true) => ComparisonOp::NotLike,
            (_, false) => ComparisonOp::ILike,
            (_, true) => ComparisonOp::NotILike,
        };
        let pattern = value_expression(p)?;
        for operand in [&value, &pattern] {
            if !operand.is_string() {
                return Err(p.type_mismatch(operand, "string", ErrorCode::E0602));
            }
        }
        return Ok(Constraint::comparison(value, op, pattern).with_position(p.span_from(start)));
    }

    if p.eat(TokenKind::IN_KW) {
        p.expect(TokenKind::L_PAREN)?;
        let list = if p.at(TokenKind::SELECT_KW) {
            InList::Subquery(Box::new(query(p, false)?))
        } else {
            let mut values = vec![value_expression(p)?];
            while p.eat(TokenKind::COMMA) {
                values.push(value_expression(p)?);
            }
            InList::Values(values)
        };
        p.expect(TokenKind::R_PAREN)?;
        return Ok(Constraint::new(ConstraintKind::In {
            value,
            list,
            negated,
        })
        .with_position(p.span_from(start)));
    }

    Err(p.unexpected())
}

fn comparison_operator(p: &mut Parser<'_>) -> Option<ComparisonOp> {
    let op = [
        (TokenKind::EQ, ComparisonOp::Eq),
        (TokenKind::NOT_EQ, ComparisonOp::NotEq),
        (TokenKind::LT, ComparisonOp::Lt),
        (TokenKind::LT_EQ, ComparisonOp::LtEq),
        (TokenKind::GT, ComparisonOp::Gt),
        (TokenKind::GT_EQ, ComparisonOp::GtEq),
    ]
    .into_iter()
    .find(|(kind, _)| p.at(*kind))
    .map(|(_, op)| op)?;
    p.bump();
    Some(op)
}

/// Both sides of a comparison must share a type
fn check_comparable(
    p: &Parser<'_>,
    left: &Operand,
    op: ComparisonOp,
    right: &Operand,
) -> PResult<()> {
    let comparable = (left.is_numeric() && right.is_numeric())
        || (left.is_string() && right.is_string())
        || (left.is_geometry() && right.is_geometry());
    if comparable {
        Ok(())
    } else {
        Err(p.error_at(
            format!(
                "Type mismatch! Impossible to compare \"{left}\" and \"{right}\" with \"{}\": incompatible types.",
                op.symbol()
            ),
            left.position,
            ErrorCode::E0604,
        ))
    }
}
