//! pgSphere translation tests

use adql::{AdqlVersion, PgSphereTranslator, SqlTranslator, TranslationError};
use rstest::rstest;

use crate::helpers::parser_fixtures::{parse_ok, parser};

fn translate(version: AdqlVersion, query: &str) -> Result<String, TranslationError> {
    let query = parse_ok(&parser(version), query);
    PgSphereTranslator::new().translate(&query)
}

const POINT: &str = "spoint(RADIANS(ra), RADIANS(dec))";
const CIRCLE: &str = "scircle(spoint(RADIANS(1), RADIANS(2)), RADIANS(3))";

#[rstest]
#[case("CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) = 1", format!("{POINT} @ {CIRCLE}"))]
#[case("1 = CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3))", format!("{POINT} @ {CIRCLE}"))]
#[case("CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) <> 0", format!("{POINT} @ {CIRCLE}"))]
#[case("CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) = 0", format!("NOT ({POINT} @ {CIRCLE})"))]
#[case("INTERSECTS(CIRCLE(1, 2, 3), POINT(ra, dec)) = 1", format!("{CIRCLE} && {POINT}"))]
#[case(
    "CONTAINS(POINT(ra, dec), CIRCLE(1, 2, 3)) = 2",
    format!("CAST(({POINT} @ {CIRCLE}) AS INTEGER) = 2")
)]
fn test_spatial_predicates(#[case] condition: &str, #[case] sql: String) {
    let translated = translate(AdqlVersion::V2_1, &format!("SELECT id FROM t WHERE {condition}")).unwrap();
    assert_eq!(translated, format!("SELECT id\nFROM t\nWHERE {sql}"));
}

#[rstest]
#[case("DISTANCE(POINT(ra, dec), POINT(1, 2))", "DEGREES(spoint(RADIANS(ra), RADIANS(dec)) <-> spoint(RADIANS(1), RADIANS(2)))")]
#[case("AREA(CIRCLE(1, 2, 3))", "DEGREES(DEGREES(area(scircle(spoint(RADIANS(1), RADIANS(2)), RADIANS(3)))))")]
#[case("CENTROID(CIRCLE(1, 2, 3))", "center(scircle(spoint(RADIANS(1), RADIANS(2)), RADIANS(3)))")]
#[case("COORD1(POINT(ra, dec))", "DEGREES(long(spoint(RADIANS(ra), RADIANS(dec))))")]
#[case("COORD2(pos)", "DEGREES(lat(pos))")]
#[case("CIRCLE(pos, 0.5)", "scircle(pos, RADIANS(0.5))")]
fn test_geometry_functions(#[case] function: &str, #[case] sql: &str) {
    let translated = translate(AdqlVersion::V2_1, &format!("SELECT {function} FROM t")).unwrap();
    assert_eq!(translated, format!("SELECT {sql}\nFROM t"));
}

#[test]
fn test_box_around_a_point() {
    let sql = translate(AdqlVersion::V2_1, "SELECT BOX(POINT(1, 2), 3, 4) FROM t").unwrap();
    let center = "spoint(RADIANS(1), RADIANS(2))";
    assert_eq!(
        sql,
        format!(
            "SELECT sbox(spoint(long({center}) - RADIANS(3) / 2, lat({center}) - RADIANS(4) / 2), \
             spoint(long({center}) + RADIANS(3) / 2, lat({center}) + RADIANS(4) / 2))\nFROM t"
        )
    );
}

#[test]
fn test_coordinate_systems_are_ignored() {
    let sql = translate(AdqlVersion::V2_0, "SELECT POINT('ICRS GEOCENTER', ra, dec) FROM t").unwrap();
    assert_eq!(sql, format!("SELECT {POINT}\nFROM t"));
}

#[rstest]
#[case("POSITION ICRS 10 20", "spoint '(10.0d,20.0d)'")]
#[case("CIRCLE 10 20 0.5", "scircle '<(10.0d,20.0d),0.5d>'")]
#[case("BOX 10 20 2 4", "sbox '((9.0d,18.0d),(11.0d,22.0d))'")]
#[case("POLYGON 1 2 3 4 5 6", "spoly '{(1.0d,2.0d),(3.0d,4.0d),(5.0d,6.0d)}'")]
fn test_region_literals(#[case] stcs: &str, #[case] sql: &str) {
    let translated = translate(AdqlVersion::V2_0, &format!("SELECT REGION('{stcs}') FROM t")).unwrap();
    assert_eq!(translated, format!("SELECT {sql}\nFROM t"));
}

#[rstest]
#[case("UNION (CIRCLE 1 2 3 CIRCLE 4 5 6)", "UNION")]
#[case("INTERSECTION (CIRCLE 1 2 3 CIRCLE 4 5 6)", "INTERSECTION")]
#[case("NOT (CIRCLE 1 2 3)", "NOT")]
fn test_combined_regions_are_rejected(#[case] stcs: &str, #[case] keyword: &str) {
    let err = translate(AdqlVersion::V2_0, &format!("SELECT REGION('{stcs}') FROM t")).unwrap_err();
    assert_eq!(err.to_string(), format!("Impossible to translate a {keyword} region into SQL!"));
}

#[test]
fn test_coordsys_is_rejected() {
    let err = translate(AdqlVersion::V2_0, "SELECT COORDSYS(pos) FROM t").unwrap_err();
    assert!(matches!(err, TranslationError::Unsupported { .. }));
}

#[test]
fn test_plain_sql_is_unchanged() {
    assert_eq!(
        translate(AdqlVersion::V2_1, "SELECT TOP 5 a FROM t WHERE a LIKE 'x%' ORDER BY a").unwrap(),
        "SELECT a\nFROM t\nWHERE a LIKE 'x%'\nORDER BY a\nLIMIT 5"
    );
}
