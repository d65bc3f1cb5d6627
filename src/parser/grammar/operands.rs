//! Value expressions
//!
//! ```text
//! value          = additive (|| additive)*
//! additive       = multiplicative ((+ | -) multiplicative)*
//! multiplicative = unary ((* | /) unary)*
//! unary          = (- | +) unary | primary
//! primary        = number | string+ | ( value ) | function | column
//! ```
//!
//! Arithmetic operands must be numeric and concatenated operands must be
//! strings; a mismatch is reported right away.

use smol_str::SmolStr;

use super::functions::{function_call, starts_function};
use crate::parser::errors::ErrorCode;
use crate::parser::parser::{PResult, Parser};
use crate::parser::syntax_kind::TokenKind;
use crate::syntax::{ArithOp, ColumnRef, Operand, OperandKind};

pub(super) fn value_expression(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    let first = additive(p)?;
    if !p.at(TokenKind::PIPE_PIPE) {
        return Ok(first);
    }

    check_string(p, &first)?;
    let mut parts = vec![first];
    while p.eat(TokenKind::PIPE_PIPE) {
        let part = additive(p)?;
        check_string(p, &part)?;
        parts.push(part);
    }
    Ok(Operand::new(OperandKind::Concatenation(parts)).with_position(p.span_from(start)))
}

fn additive(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    let mut left = multiplicative(p)?;
    loop {
        let op = if p.at(TokenKind::PLUS) {
            ArithOp::Add
        } else if p.at(TokenKind::MINUS) {
            ArithOp::Sub
        } else {
            break;
        };
        p.bump();
        let right = multiplicative(p)?;
        left = operation(p, start, left, op, right)?;
    }
    Ok(left)
}

fn multiplicative(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    let mut left = unary(p)?;
    loop {
        let op = if p.at(TokenKind::STAR) {
            ArithOp::Mul
        } else if p.at(TokenKind::SLASH) {
            ArithOp::Div
        } else {
            break;
        };
        p.bump();
        let right = unary(p)?;
        left = operation(p, start, left, op, right)?;
    }
    Ok(left)
}

fn operation(
    p: &Parser<'_>,
    start: usize,
    left: Operand,
    op: ArithOp,
    right: Operand,
) -> PResult<Operand> {
    check_numeric(p, &left)?;
    check_numeric(p, &right)?;
    Ok(Operand::new(OperandKind::Operation {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
    .with_position(p.span_from(start)))
}

fn unary(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    if p.eat(TokenKind::MINUS) {
        let inner = unary(p)?;
        check_numeric(p, &inner)?;
        return Ok(Operand::new(OperandKind::Negative(Box::new(inner)))
            .with_position(p.span_from(start)));
    }
    if p.eat(TokenKind::PLUS) {
        let inner = unary(p)?;
        check_numeric(p, &inner)?;
        return Ok(inner);
    }
    primary(p)
}

fn primary(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();

    match p.kind() {
        kind if kind.is_number() => {
            let token = p.bump();
            Ok(Operand::numeric(token.text).with_position(p.span_from(start)))
        }
        TokenKind::STRING => {
            // Consecutive literals ('abc' 'def') form a single string
            let mut value = String::new();
            while p.kind() == TokenKind::STRING {
                value.push_str(&unquote(p.bump().text));
            }
            Ok(Operand::string(SmolStr::new(value)).with_position(p.span_from(start)))
        }
        TokenKind::L_PAREN => {
            p.bump();
            let inner = value_expression(p)?;
            p.expect(TokenKind::R_PAREN)?;
            Ok(Operand::new(OperandKind::Wrapped(Box::new(inner)))
                .with_position(p.span_from(start)))
        }
        _ if starts_function(p) => function_call(p),
        _ if p.is_identifier(0) => column_ref(p),
        _ => {
            p.record(&[
                TokenKind::UNSIGNED_INTEGER.describe(),
                TokenKind::UNSIGNED_FLOAT.describe(),
                TokenKind::SCIENTIFIC_NUMBER.describe(),
                TokenKind::STRING.describe(),
                TokenKind::L_PAREN.describe(),
                TokenKind::MINUS.describe(),
                TokenKind::IDENT.describe(),
                TokenKind::DELIMITED_IDENT.describe(),
            ]);
            Err(p.unexpected())
        }
    }
}

/// `[[[catalog.]schema.]table.]column`
pub(super) fn column_ref(p: &mut Parser<'_>) -> PResult<Operand> {
    let start = p.token_index();
    let parts = p.identifier_chain(4)?;
    let column = ColumnRef::from_parts(parts).ok_or_else(|| p.unexpected())?;
    Ok(Operand::column(column).with_position(p.span_from(start)))
}

/// Value of a string literal token
fn unquote(text: &str) -> String {
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text)
        .replace("''", "'")
}

pub(super) fn check_numeric(p: &Parser<'_>, operand: &Operand) -> PResult<()> {
    if operand.is_numeric() {
        Ok(())
    } else {
        Err(p.type_mismatch(operand, "numeric", ErrorCode::E0601))
    }
}

pub(super) fn check_string(p: &Parser<'_>, operand: &Operand) -> PResult<()> {
    if operand.is_string() {
        Ok(())
    } else {
        Err(p.type_mismatch(operand, "string", ErrorCode::E0602))
    }
}

pub(super) fn check_geometry(p: &Parser<'_>, operand: &Operand) -> PResult<()> {
    if operand.is_geometry() {
        Ok(())
    } else {
        Err(p.type_mismatch(operand, "geometry", ErrorCode::E0603))
    }
}
