//! Assertions on parser failures.

use adql::{AdqlError, AdqlParser, ErrorCode, ParseError, UnresolvedIdentifiersError};

/// The aggregate error of a query rejected by a validation pass.
pub fn unresolved(parser: &AdqlParser, query: &str) -> UnresolvedIdentifiersError {
    match parser.parse_query(query) {
        Ok(_) => panic!("Expected {query:?} to be rejected"),
        Err(AdqlError::Unresolved(err)) => err,
        Err(AdqlError::Parse(err)) => {
            panic!("Expected {query:?} to fail a validation pass, got a syntax error: {err}")
        }
    }
}

/// The syntax error of a query that does not parse.
pub fn syntax_error(parser: &AdqlParser, query: &str) -> ParseError {
    match parser.parse_query(query) {
        Ok(_) => panic!("Expected {query:?} to be rejected"),
        Err(AdqlError::Parse(err)) => err,
        Err(AdqlError::Unresolved(err)) => {
            panic!("Expected {query:?} to be a syntax error, got: {err}")
        }
    }
}

/// Messages of every sub-error, in order.
pub fn messages(err: &UnresolvedIdentifiersError) -> Vec<String> {
    err.iter().map(|e| e.message.clone()).collect()
}

/// Codes of every sub-error, in order.
pub fn codes(err: &UnresolvedIdentifiersError) -> Vec<ErrorCode> {
    err.iter().map(|e| e.code).collect()
}

/// Assert sub-errors are sorted by position.
pub fn assert_document_order(err: &UnresolvedIdentifiersError) {
    let positions: Vec<_> = err.iter().filter_map(|e| e.position).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted, "Errors not in document order:\n{err}");
}
