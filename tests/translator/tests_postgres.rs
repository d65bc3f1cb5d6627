//! PostgreSQL translation tests

use adql::syntax::Identifier;
use adql::{AdqlVersion, PostgreSqlTranslator, SqlTranslator, TranslationError};
use rstest::rstest;

use crate::helpers::parser_fixtures::{parse_ok, parser};

fn translate(query: &str) -> Result<String, TranslationError> {
    let query = parse_ok(&parser(AdqlVersion::V2_1), query);
    PostgreSqlTranslator::new().translate(&query)
}

#[rstest]
#[case("SELECT DISTINCT TOP 3 a FROM t", "SELECT DISTINCT a\nFROM t\nLIMIT 3")]
#[case(
    "SELECT a, COUNT(*) AS n FROM t GROUP BY a HAVING COUNT(*) > 1 ORDER BY 2 DESC",
    "SELECT a, COUNT(*) AS n\nFROM t\nGROUP BY a\nHAVING COUNT(*) > 1\nORDER BY 2 DESC"
)]
#[case(
    "SELECT t.a FROM s.t AS t LEFT OUTER JOIN u USING (id)",
    "SELECT t.a\nFROM s.t AS t LEFT OUTER JOIN u USING (id)"
)]
#[case(
    "SELECT a FROM t WHERE b NOT BETWEEN 1 AND 2 AND c IN (1, 2) OR d IS NULL",
    "SELECT a\nFROM t\nWHERE b NOT BETWEEN 1 AND 2 AND c IN (1, 2) OR d IS NULL"
)]
#[case(
    "SELECT a FROM t WHERE EXISTS (SELECT b FROM u WHERE u.b = t.a)",
    "SELECT a\nFROM t\nWHERE EXISTS(SELECT b\nFROM u\nWHERE u.b = t.a)"
)]
#[case("SELECT -(-a), 'it''s' FROM t", "SELECT -(-a), 'it''s'\nFROM t")]
#[case(
    "SELECT CAST(a AS DOUBLE PRECISION), COALESCE(b, 'x') FROM t",
    "SELECT CAST(a AS DOUBLE PRECISION), COALESCE(b, 'x')\nFROM t"
)]
#[case("SELECT my_udf(a, 1) FROM t", "SELECT my_udf(a, 1)\nFROM t")]
fn test_translation(#[case] adql: &str, #[case] sql: &str) {
    let query = adql::parser::parse_query(adql, AdqlVersion::V2_1).unwrap();
    assert_eq!(PostgreSqlTranslator::new().translate(&query).unwrap(), sql);
}

#[test]
fn test_set_operation_with_tail() {
    assert_eq!(
        translate("SELECT a FROM t INTERSECT SELECT a FROM u ORDER BY a OFFSET 2").unwrap(),
        "(SELECT a\nFROM t)\nINTERSECT\n(SELECT a\nFROM u)\nORDER BY a\nOFFSET 2"
    );
}

#[test]
fn test_rand_with_seed() {
    assert!(matches!(
        translate("SELECT RAND(42) FROM t"),
        Err(TranslationError::Unsupported { .. })
    ));
}

#[rstest]
#[case("SELECT CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) FROM t", "CONTAINS")]
#[case("SELECT AREA(CIRCLE(1, 2, 3)) FROM t", "AREA")]
fn test_geometry_needs_a_spatial_dialect(#[case] adql: &str, #[case] function: &str) {
    let err = translate(adql).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Impossible to translate the geometrical function \"{function}\" into SQL!")
    );
}

/// Dialect quoting every identifier
struct QuotingTranslator;

impl SqlTranslator for QuotingTranslator {
    fn quote_identifier(&self, identifier: &Identifier) -> String {
        format!("\"{}\"", identifier.name.to_lowercase())
    }
}

#[test]
fn test_hooks_can_be_overridden() {
    let query = adql::parser::parse_query("SELECT Ra AS x FROM Gaia.Source", AdqlVersion::V2_0).unwrap();
    assert_eq!(
        QuotingTranslator.translate(&query).unwrap(),
        "SELECT \"ra\" AS \"x\"\nFROM \"gaia\".\"source\""
    );
}
