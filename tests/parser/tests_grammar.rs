//! Grammar tests - versioned acceptance and ADQL serialisation

use adql::parser::{parse_query, tokenize};
use adql::syntax::{QueryBody, SetOperator};
use adql::{AdqlVersion, TokenKind};
use rstest::rstest;

// ============================================================================
// Accepted by both versions
// ============================================================================

#[rstest]
#[case("SELECT * FROM t")]
#[case("SELECT DISTINCT TOP 10 ra, dec AS d FROM gaia.source AS s")]
#[case("SELECT t.*, u.id FROM t JOIN u ON t.id = u.id")]
#[case("SELECT a FROM t NATURAL LEFT OUTER JOIN u")]
#[case("SELECT a FROM t WHERE b BETWEEN 1 AND 2 AND c IS NOT NULL")]
#[case("SELECT a FROM t WHERE b IN (SELECT b FROM u) OR EXISTS (SELECT * FROM v)")]
#[case("SELECT COUNT(*), AVG(DISTINCT mag) FROM t GROUP BY cls HAVING COUNT(*) > 2")]
#[case("SELECT a FROM t ORDER BY 1 DESC, a ASC")]
#[case("SELECT a || 'x' || b FROM t WHERE name LIKE 'M%'")]
#[case("SELECT POINT('ICRS', ra, dec) FROM t")]
#[case("SELECT a FROM t;")]
fn test_accepted_by_both_versions(#[case] query: &str) {
    for version in AdqlVersion::ALL {
        assert!(
            parse_query(query, version).is_ok(),
            "Failed to parse in {version}: {query}"
        );
    }
}

// ============================================================================
// ADQL 2.1 only
// ============================================================================

#[rstest]
#[case("WITH n AS (SELECT a FROM t) SELECT * FROM n")]
#[case("SELECT a FROM t UNION SELECT a FROM u")]
#[case("SELECT a FROM t EXCEPT ALL SELECT a FROM u")]
#[case("SELECT a FROM t ORDER BY a OFFSET 10")]
#[case("SELECT a FROM t WHERE name ILIKE 'm%'")]
#[case("SELECT LOWER(name), UPPER(name) FROM t")]
#[case("SELECT COALESCE(a, b, 0) FROM t")]
#[case("SELECT CAST(a AS INTEGER) FROM t")]
#[case("SELECT POINT(ra, dec) FROM t")]
#[case("SELECT CIRCLE(POINT(ra, dec), 1) FROM t")]
#[case("SELECT CIRCLE(pos, 1), BOX(pos, 1, 2) FROM t")]
#[case("SELECT POLYGON(p1, p2, p3) FROM t")]
#[case("SELECT POLYGON(p1, p2, p3, p4, p5) FROM t")]
#[case("SELECT DISTANCE(ra, dec, 10, 20) FROM t")]
fn test_only_in_v2_1(#[case] query: &str) {
    assert!(parse_query(query, AdqlVersion::V2_1).is_ok(), "Failed to parse: {query}");
    assert!(parse_query(query, AdqlVersion::V2_0).is_err(), "Parsed in v2.0: {query}");
}

#[rstest]
#[case("SELECT a AS ilike FROM t")]
#[case("SELECT a AS offset FROM t")]
fn test_only_in_v2_0(#[case] query: &str) {
    assert!(parse_query(query, AdqlVersion::V2_0).is_ok(), "Failed to parse: {query}");
    assert!(parse_query(query, AdqlVersion::V2_1).is_err(), "Parsed in v2.1: {query}");
}

// ============================================================================
// Serialisation
// ============================================================================

#[rstest]
#[case(
    "select top 5 ra , dec from gaia.source where ra>10",
    "SELECT TOP 5 ra, dec\nFROM gaia.source\nWHERE ra > 10"
)]
#[case(
    "SELECT \"My Col\" FROM t ORDER BY \"My Col\" DESC",
    "SELECT \"My Col\"\nFROM t\nORDER BY \"My Col\" DESC"
)]
#[case(
    "SELECT a FROM t WHERE NOT (a < 1 OR a > 2)",
    "SELECT a\nFROM t\nWHERE NOT (a < 1 OR a > 2)"
)]
fn test_canonical_adql(#[case] query: &str, #[case] expected: &str) {
    let parsed = parse_query(query, AdqlVersion::V2_0).unwrap();
    assert_eq!(parsed.to_string(), expected);
    // the canonical form parses to the same tree
    let reparsed = parse_query(expected, AdqlVersion::V2_0).unwrap();
    assert_eq!(reparsed.to_string(), expected);
}

#[test]
fn test_union_without_duplicates() {
    let query = parse_query("SELECT * FROM foo UNION SELECT * FROM bar", AdqlVersion::V2_1).unwrap();
    let QueryBody::Set(set) = &query.body else {
        panic!("Expected a set operation, got {query:?}");
    };
    assert_eq!(set.op, SetOperator::Union);
    assert!(!set.is_with_duplicates());
}

// ============================================================================
// Tokenizer
// ============================================================================

#[test]
fn test_tokenize_ends_with_eof() {
    let tokens = tokenize("SELECT a FROM t", false).unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
}

#[test]
fn test_tokenize_stops_at_end_of_query() {
    let tokens = tokenize("SELECT a; garbage é", true).unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["SELECT", "a", ""]);
    assert!(tokenize("SELECT a; garbage é", false).is_err());
}
