//! Syntax error tests - codes, positions and hints

use adql::parser::parse_query;
use adql::{AdqlVersion, ErrorCode};
use rstest::rstest;

fn error(query: &str, version: AdqlVersion) -> adql::ParseError {
    match parse_query(query, version) {
        Ok(parsed) => panic!("Expected {query:?} to be rejected, got {parsed}"),
        Err(err) => err,
    }
}

// ============================================================================
// Lexical errors
// ============================================================================

#[rstest]
#[case("SELECT é FROM t", ErrorCode::E0101)]
#[case("SELECT _id FROM t", ErrorCode::E0101)]
#[case("SELECT 'abc FROM t", ErrorCode::E0102)]
#[case("SELECT \"abc FROM t", ErrorCode::E0103)]
fn test_lexical_error_codes(#[case] query: &str, #[case] code: ErrorCode) {
    let err = error(query, AdqlVersion::V2_0);
    assert_eq!(err.code, code);
    assert_eq!(err.line(), Some(1));
    assert!(err.has_hint(), "No hint for: {query}");
}

#[test]
fn test_incorrect_character_message() {
    let err = error("SELECT a\nFROM t\nWHERE a = ?", AdqlVersion::V2_1);
    assert_eq!(err.message, "Incorrect character encountered at l.3, c.11: \"?\" (63)!");
    assert_eq!(err.column(), Some(11));
}

// ============================================================================
// Unexpected tokens
// ============================================================================

#[test]
fn test_unexpected_end_of_query() {
    let err = error("SELECT a FROM t WHERE", AdqlVersion::V2_0);
    assert_eq!(err.code, ErrorCode::E0202);
    assert!(err.message.starts_with("Unexpected end of query!"));
}

#[test]
fn test_expected_tokens_are_listed() {
    let err = error("SELECT FROM t", AdqlVersion::V2_0);
    assert_eq!(err.code, ErrorCode::E0201);
    assert!(err.message.starts_with("Encountered \"FROM\"."));
    assert!(err.message.contains("Was expecting one of:"));
}

#[rstest]
#[case(AdqlVersion::V2_0, "\"DATE\" is not an ADQL word, but is however a reserved SQL word")]
#[case(AdqlVersion::V2_1, "\"DATE\" is not an ADQL word, but is however a reserved SQL word")]
fn test_reserved_sql_word_hint(#[case] version: AdqlVersion, #[case] reason: &str) {
    let err = error("SELECT date FROM t", version);
    assert_eq!(err.code, ErrorCode::E0201);
    let hint = err.hint.unwrap_or_default();
    assert!(hint.contains(reason), "Unexpected hint: {hint}");
    assert!(hint.contains("write it between double quotes"));
}

#[test]
fn test_reserved_adql_word_hint() {
    let err = error("SELECT offset FROM t", AdqlVersion::V2_1);
    assert_eq!(err.code, ErrorCode::E0201);
    assert!(
        err.hint
            .unwrap_or_default()
            .contains("\"OFFSET\" is a reserved ADQL word in v2.1")
    );
}

#[test]
fn test_union_in_v2_0_hint() {
    let err = error("SELECT * FROM foo UNION SELECT * FROM bar", AdqlVersion::V2_0);
    assert_eq!(err.code, ErrorCode::E0201);
    assert!(
        err.hint
            .unwrap_or_default()
            .contains("\"UNION\" is not supported in ADQL v2.0")
    );
}

#[test]
fn test_quoted_reserved_word_is_accepted() {
    assert!(parse_query("SELECT \"date\", \"offset\" FROM t", AdqlVersion::V2_1).is_ok());
}

#[test]
fn test_bare_predicate_in_where() {
    let err = error(
        "SELECT * FROM t WHERE CONTAINS(POINT('', ra, dec), CIRCLE('', 1, 2, 3))",
        AdqlVersion::V2_0,
    );
    assert!(err.code.is_syntactic());
}

// ============================================================================
// Function parameters
// ============================================================================

#[rstest]
#[case(
    "SELECT ABS(a, b) FROM t",
    AdqlVersion::V2_0,
    "Wrong number of parameters for the function \"ABS\": 1 expected, 2 given!"
)]
#[case(
    "SELECT POINT(ra, dec) FROM t",
    AdqlVersion::V2_0,
    "Wrong number of parameters for the function \"POINT\": 3 expected, 2 given!"
)]
#[case(
    "SELECT DISTANCE(a, b, c) FROM t",
    AdqlVersion::V2_1,
    "Wrong number of parameters for the function \"DISTANCE\": 2 or 4 expected, 3 given!"
)]
fn test_wrong_arity(#[case] query: &str, #[case] version: AdqlVersion, #[case] message: &str) {
    let err = error(query, version);
    assert_eq!(err.code, ErrorCode::E0203);
    assert_eq!(err.message, message);
}

#[rstest]
#[case("SELECT ABS('x') FROM t", ErrorCode::E0601)]
#[case("SELECT LOWER(1) FROM t", ErrorCode::E0602)]
#[case("SELECT AREA(1) FROM t", ErrorCode::E0603)]
#[case("SELECT POLYGON(p1, p2, 3) FROM t", ErrorCode::E0603)]
#[case("SELECT 'a' || 1 FROM t", ErrorCode::E0602)]
#[case("SELECT 1 + 'a' FROM t", ErrorCode::E0601)]
fn test_type_mismatch(#[case] query: &str, #[case] code: ErrorCode) {
    let err = error(query, AdqlVersion::V2_1);
    assert_eq!(err.code, code);
    assert!(err.message.starts_with("Type mismatch!"));
    assert!(err.position.is_some());
}
