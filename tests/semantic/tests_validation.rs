//! Validation pass tests - merged errors of the features, coordinate
//! system and region passes

use adql::{AdqlError, AdqlParser, AdqlVersion, ErrorCode, FeatureType, ParserConfig};
use rstest::rstest;

use crate::helpers::error_assertions::{
    assert_document_order, codes, messages, syntax_error, unresolved,
};
use crate::helpers::parser_fixtures::{parse_ok, parser, parser_with_coord_sys, parser_without};

#[test]
fn test_syntax_error_stops_validation() {
    let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo);
    let err = syntax_error(&parser, "SELECT POINT('', 1, 2) FROM");
    assert_eq!(err.code, ErrorCode::E0202);
}

#[test]
fn test_every_unsupported_use_is_reported() {
    let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo);
    let err = unresolved(
        &parser,
        "SELECT POINT('', ra, dec), AREA(CIRCLE('', 1, 2, 3))\nFROM t\nWHERE CONTAINS(POINT('', ra, dec), BOX('', 1, 2, 3, 4)) = 1",
    );
    let forms: Vec<String> = messages(&err)
        .iter()
        .map(|m| m.split('"').nth(1).unwrap_or_default().to_string())
        .collect();
    assert_eq!(forms, vec!["POINT", "AREA", "CIRCLE", "CONTAINS", "POINT", "BOX"]);
    assert_document_order(&err);
    assert!(err.iter().all(|e| e.line().is_some()));
    assert_eq!(err.errors()[3].line(), Some(3));
}

#[test]
fn test_display_lists_every_error() {
    let parser = parser_without(AdqlVersion::V2_1, FeatureType::AdqlString);
    let err = unresolved(&parser, "SELECT LOWER(a), UPPER(b) FROM t");
    let text = err.to_string();
    assert!(text.starts_with("2 unresolved identifiers!"));
    assert_eq!(text.lines().count(), 3);
}

// ============================================================================
// Coordinate systems
// ============================================================================

#[rstest]
#[case("SELECT POINT('ICRS', ra, dec) FROM t", true)]
#[case("SELECT POINT('', ra, dec) FROM t", true)]
#[case("SELECT POINT('ICRS GEOCENTER', ra, dec) FROM t", true)]
#[case("SELECT POINT(cs, ra, dec) FROM t", true)]
#[case("SELECT POINT('GALACTIC', ra, dec) FROM t", false)]
fn test_coord_sys_policy(#[case] query: &str, #[case] accepted: bool) {
    let parser = parser_with_coord_sys(AdqlVersion::V2_0, &["ICRS * *"]);
    match parser.parse_query(query) {
        Ok(_) => assert!(accepted, "Accepted: {query}"),
        Err(err) => {
            assert!(!accepted, "Rejected: {query}: {err}");
            assert!(err.errors().iter().all(|e| e.code == ErrorCode::E0403));
        }
    }
}

#[test]
fn test_incorrect_coord_sys_without_policy() {
    let err = unresolved(
        &parser(AdqlVersion::V2_0),
        "SELECT POINT('ICRS FOO', ra, dec), CIRCLE('FK5 CARTESIAN2', 1, 2, 3) FROM t",
    );
    assert_eq!(codes(&err), vec![ErrorCode::E0401, ErrorCode::E0402]);
}

#[test]
fn test_invalid_policy_pattern() {
    let err = AdqlParser::new(ParserConfig::default().with_allowed_coord_sys(["ICRS"])).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0405);
}

#[test]
fn test_any_coord_sys() {
    let mut parser = parser_with_coord_sys(AdqlVersion::V2_0, &[]);
    assert!(parser.parse_query("SELECT POINT('ICRS', 1, 2) FROM t").is_err());
    parser.set_allowed_coord_sys(None).unwrap();
    parse_ok(&parser, "SELECT POINT('ICRS', 1, 2) FROM t");
}

// ============================================================================
// Regions
// ============================================================================

#[rstest]
#[case("SELECT REGION('CIRCLE ICRS 1 2 3') FROM t")]
#[case("SELECT REGION('10 20 0.5') FROM t")]
#[case("SELECT REGION('UNION (POSITION 1 2 NOT (BOX 1 2 3 4))') FROM t")]
fn test_valid_region(#[case] query: &str) {
    parse_ok(&parser(AdqlVersion::V2_0), query);
}

#[rstest]
#[case("SELECT REGION('CIRCLE ICRS 1 2') FROM t", ErrorCode::E0506)]
#[case("SELECT REGION(name) FROM t", ErrorCode::E0505)]
#[case("SELECT REGION('POSITION ' || name) FROM t", ErrorCode::E0505)]
fn test_invalid_region(#[case] query: &str, #[case] code: ErrorCode) {
    let err = unresolved(&parser(AdqlVersion::V2_0), query);
    assert_eq!(codes(&err), vec![code]);
}

#[test]
fn test_extended_region_param() {
    let parser = AdqlParser::new(
        ParserConfig::default()
            .with_version(AdqlVersion::V2_0)
            .with_extended_region_param(true),
    )
    .unwrap();
    parse_ok(&parser, "SELECT REGION(name) FROM t");
    parse_ok(&parser, "SELECT REGION('CIRCLE ICRS 1 2') FROM t");
}

#[test]
fn test_unsupported_shape_in_region() {
    let mut parser = parser(AdqlVersion::V2_0);
    let circle = adql::feature::lookup(FeatureType::AdqlGeo, "CIRCLE").unwrap();
    parser.features_mut().unsupport(circle);
    let err = unresolved(&parser, "SELECT REGION('UNION (CIRCLE 1 2 3 POSITION 1 2)') FROM t");
    assert_eq!(codes(&err), vec![ErrorCode::E0503]);
    assert!(err.errors()[0].hint.as_deref().unwrap_or_default().contains("\"CIRCLE\""));
}

#[test]
fn test_region_coord_sys_policy() {
    let parser = parser_with_coord_sys(AdqlVersion::V2_0, &["ICRS * *"]);
    let err = unresolved(&parser, "SELECT REGION('UNION ICRS (CIRCLE FK5 1 2 3 POSITION 1 2)') FROM t");
    assert_eq!(codes(&err), vec![ErrorCode::E0403]);
}

// ============================================================================
// Query checkers
// ============================================================================

#[test]
fn test_checker_runs_after_passes() {
    let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo).with_checker(
        |_: &adql::Query| -> Result<(), adql::UnresolvedIdentifiersError> {
            Err(adql::ParseError::new("rejected by the checker", ErrorCode::E0901).into())
        },
    );
    let err = unresolved(&parser, "SELECT POINT('', 1, 2) FROM t");
    assert_eq!(codes(&err), vec![ErrorCode::E0301]);
    let err = unresolved(&parser, "SELECT a FROM t");
    assert_eq!(messages(&err), vec!["rejected by the checker"]);
}

#[test]
fn test_adql_error_wraps_both_kinds() {
    let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo);
    assert!(matches!(parser.parse_query("SELECT"), Err(AdqlError::Parse(_))));
    assert!(matches!(
        parser.parse_query("SELECT POINT('', 1, 2) FROM t"),
        Err(AdqlError::Unresolved(_))
    ));
}
