//! Grammar functions for ADQL 2.0 and 2.1
//!
//! Each function parses one production from the current position of a
//! [`Parser`] and returns the AST node it builds:
//! - `query` - query expressions, set operations, common table expressions
//! - `from` - FROM clause, joins, subqueries
//! - `constraints` - search conditions and predicates
//! - `operands` - value expressions, with type checks
//! - `functions` - function calls (math, aggregate, geometry, UDF, ...)
//!
//! Productions whose availability depends on the ADQL version test
//! [`Parser::version`]. Keywords unknown to a version never reach them: the
//! parser turns those into identifier candidates.

mod constraints;
mod from;
mod functions;
mod operands;
mod query;

use super::errors::ParseError;
use super::parser::{PResult, Parser};
use super::syntax_kind::TokenKind;
use super::AdqlVersion;
use crate::syntax::{Constraint, FromItem, Operand, OrderItem, Query, SelectClause};

/// Parse a whole query (an optional final `;` is accepted)
pub fn parse_query(input: &str, version: AdqlVersion) -> Result<Query, ParseError> {
    parse_with(input, version, |p| query::query(p, true))
}

/// Parse a lone SELECT clause (`SELECT ...`)
pub fn parse_select(input: &str, version: AdqlVersion) -> Result<SelectClause, ParseError> {
    parse_with(input, version, query::select_clause)
}

/// Parse a lone FROM clause (`FROM ...`)
pub fn parse_from(input: &str, version: AdqlVersion) -> Result<Vec<FromItem>, ParseError> {
    parse_with(input, version, from::from_clause)
}

/// Parse a lone WHERE clause (`WHERE ...`)
pub fn parse_where(input: &str, version: AdqlVersion) -> Result<Constraint, ParseError> {
    parse_with(input, version, |p| {
        p.expect(TokenKind::WHERE_KW)?;
        constraints::condition(p)
    })
}

/// Parse a lone ORDER BY clause (`ORDER BY ...`)
pub fn parse_order_by(input: &str, version: AdqlVersion) -> Result<Vec<OrderItem>, ParseError> {
    parse_with(input, version, query::order_by_clause)
}

/// Parse a lone GROUP BY clause (`GROUP BY ...`)
pub fn parse_group_by(input: &str, version: AdqlVersion) -> Result<Vec<Operand>, ParseError> {
    parse_with(input, version, query::group_by_clause)
}

fn parse_with<'a, T>(
    input: &'a str,
    version: AdqlVersion,
    production: impl FnOnce(&mut Parser<'a>) -> PResult<T>,
) -> Result<T, ParseError> {
    let mut p = Parser::new(input, version)?;
    let result = production(&mut p)?;
    if p.eat(TokenKind::SEMICOLON) {
        p.expect(TokenKind::EOF)?;
    } else if !p.at(TokenKind::EOF) {
        return Err(p.unexpected());
    }
    Ok(result)
}
