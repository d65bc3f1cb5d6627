//! Database checker tests - table and column resolution through AdqlParser

use adql::{AdqlParser, AdqlVersion, DbChecker, DbColumn, DbMetadata, DbTable, ErrorCode, ParserConfig};
use adql::feature::DbType;
use rstest::rstest;

use crate::helpers::error_assertions::{assert_document_order, codes, messages, unresolved};
use crate::helpers::parser_fixtures::parse_ok;

fn tables() -> Vec<DbTable> {
    vec![
        DbTable::new(Some("gaia"), "source")
            .with_column(DbColumn::new("source_id").with_type(DbType::BigInt))
            .with_columns(["ra", "dec", "phot_g_mean_mag"]),
        DbTable::new(Some("twomass"), "source").with_columns(["designation", "ra", "dec"]),
        DbTable::new(Some("ivoa"), "obscore")
            .with_catalog("main")
            .with_columns(["obs_id", "s_ra", "s_dec", "s_region"]),
    ]
}

fn checked_parser(version: AdqlVersion) -> AdqlParser {
    AdqlParser::new(ParserConfig::default().with_version(version))
        .unwrap()
        .with_checker(DbChecker::new(tables()))
}

#[rstest]
#[case("SELECT source_id, ra FROM gaia.source")]
#[case("SELECT g.ra, t.designation FROM gaia.source AS g JOIN twomass.source AS t ON g.ra = t.ra")]
#[case("SELECT obs_id FROM main.ivoa.obscore")]
#[case("SELECT obs_id FROM ObsCore WHERE s_ra BETWEEN 10 AND 20")]
#[case("SELECT ra, COUNT(*) FROM gaia.source GROUP BY ra")]
#[case("SELECT g.* FROM gaia.source AS g")]
#[case("SELECT phot_g_mean_mag FROM gaia.source JOIN twomass.source USING (designation)")]
fn test_resolved(#[case] query: &str) {
    parse_ok(&checked_parser(AdqlVersion::V2_0), query);
}

#[rstest]
#[case("SELECT * FROM source", ErrorCode::E0703, "Ambiguous table name \"source\"!")]
#[case("SELECT * FROM gaia.obscore", ErrorCode::E0701, "Unknown table \"gaia.obscore\"!")]
#[case("SELECT x.* FROM gaia.source", ErrorCode::E0701, "Unknown table \"x\"!")]
#[case("SELECT designation FROM gaia.source", ErrorCode::E0702, "Unknown column \"designation\"!")]
#[case("SELECT * FROM other.ivoa.obscore", ErrorCode::E0701, "Unknown table \"other.ivoa.obscore\"!")]
fn test_unresolved(#[case] query: &str, #[case] code: ErrorCode, #[case] message: &str) {
    let err = unresolved(&checked_parser(AdqlVersion::V2_0), query);
    assert_eq!(codes(&err), vec![code]);
    assert_eq!(messages(&err), vec![message]);
}

#[test]
fn test_every_identifier_reported_in_order() {
    let err = unresolved(
        &checked_parser(AdqlVersion::V2_0),
        "SELECT foo, g.bar\nFROM gaia.source AS g, nowhere\nWHERE baz > 1\nORDER BY qux",
    );
    assert_eq!(
        codes(&err),
        vec![ErrorCode::E0702, ErrorCode::E0702, ErrorCode::E0701, ErrorCode::E0702, ErrorCode::E0702]
    );
    assert_document_order(&err);
}

#[test]
fn test_set_operation_order_by_uses_result_columns() {
    let parser = checked_parser(AdqlVersion::V2_1);
    parse_ok(
        &parser,
        "SELECT ra AS x FROM gaia.source UNION SELECT s_ra FROM ivoa.obscore ORDER BY x",
    );
    let err = unresolved(
        &parser,
        "SELECT ra FROM gaia.source EXCEPT SELECT s_ra FROM ivoa.obscore ORDER BY s_dec",
    );
    assert_eq!(messages(&err), vec!["Unknown column \"s_dec\"!"]);
}

#[test]
fn test_common_table_shadows_database() {
    let parser = checked_parser(AdqlVersion::V2_1);
    parse_ok(
        &parser,
        "WITH source AS (SELECT ra AS alpha FROM gaia.source) SELECT alpha FROM source",
    );
    let err = unresolved(
        &parser,
        "WITH source(a) AS (SELECT ra FROM gaia.source) SELECT ra FROM source",
    );
    assert_eq!(messages(&err), vec!["Unknown column \"ra\"!"]);
}

#[test]
fn test_checker_skipped_for_syntax_errors() {
    let parser = checked_parser(AdqlVersion::V2_0);
    assert!(matches!(
        parser.parse_query("SELECT nothing FROM"),
        Err(adql::AdqlError::Parse(_))
    ));
}

/// Metadata served from a borrowed catalogue
struct Catalogue<'a>(&'a [DbTable]);

impl DbMetadata for Catalogue<'_> {
    fn tables(&self) -> &[DbTable] {
        self.0
    }
}

#[test]
fn test_custom_metadata() {
    let tables = tables();
    let checker = DbChecker::new(Catalogue(&tables));
    let query = adql::parser::parse_query("SELECT nope FROM gaia.source", AdqlVersion::V2_0).unwrap();
    let errors = checker.resolve(&query);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, ErrorCode::E0702);
    assert_eq!(checker.metadata().tables().len(), 3);
}
