//! Region tests - STC-S and DALI grammars, serialisation, geometry calls

use adql::parser::parse_select;
use adql::syntax::{Operand, SelectItem};
use adql::{AdqlVersion, CoordSys, ErrorCode, Frame, Region, RegionType};
use rstest::rstest;

fn first_operand(select: &str, version: AdqlVersion) -> Operand {
    let clause = parse_select(select, version).unwrap();
    match clause.items.into_iter().next() {
        Some(SelectItem::Expr { operand, .. }) => operand,
        other => panic!("Expected an expression, got {other:?}"),
    }
}

// ============================================================================
// DALI
// ============================================================================

#[test]
fn test_dali_position() {
    let region = Region::parse("10 20").unwrap();
    assert_eq!(region.region_type(), RegionType::Position);
    assert_eq!(region.coordinates(), &[[10.0, 20.0]]);
}

#[rstest]
#[case("10 ")]
#[case("1 2 3 4")]
#[case("1 2 3 4 5 6 7")]
#[case("1 2 NaN")]
fn test_incorrect_dali(#[case] text: &str) {
    let err = Region::parse(text).unwrap_err();
    assert_eq!(err.message, "Incorrect DALI region!");
    assert_eq!(err.code, ErrorCode::E0502);
}

#[rstest]
#[case("10 20", "10.0 20.0")]
#[case("10 20 0.5", "10.0 20.0 0.5")]
#[case("0 0 1 0 1 1", "0.0 0.0 1.0 0.0 1.0 1.0")]
#[case("1e8 -2.5e-4", "1.0E8 -2.5E-4")]
#[case("CIRCLE 1 2 3", "1.0 2.0 3.0")]
fn test_to_dali(#[case] text: &str, #[case] dali: &str) {
    let region = Region::parse(text).unwrap();
    assert_eq!(region.to_dali().as_deref(), Some(dali));
    assert_eq!(Region::parse(dali).unwrap(), region);
}

#[rstest]
#[case("CIRCLE ICRS 1 2 3")]
#[case("BOX 1 2 3 4")]
#[case("UNION (POSITION 1 2 POSITION 3 4)")]
#[case("NOT (CIRCLE 1 2 3)")]
fn test_no_dali_form(#[case] text: &str) {
    let region = Region::parse(text).unwrap();
    assert_eq!(region.to_dali(), None);
    assert_eq!(region.to_string(), region.to_stcs());
}

// ============================================================================
// STC-S
// ============================================================================

#[rstest]
#[case("POSITION 1 2", "POSITION 1.0 2.0")]
#[case("circle icrs 10 20 0.5", "CIRCLE ICRS 10.0 20.0 0.5")]
#[case("BOX FK5 GEOCENTER 1 2 3 4", "BOX FK5 GEOCENTER 1.0 2.0 3.0 4.0")]
#[case("POLYGON UNKNOWNFRAME 0 0 1 0 1 1 0 1", "POLYGON 0.0 0.0 1.0 0.0 1.0 1.0 0.0 1.0")]
#[case(
    "UNION ICRS (POSITION 1 2 NOT(CIRCLE 1 2 3))",
    "UNION ICRS ( POSITION 1.0 2.0 NOT ( CIRCLE 1.0 2.0 3.0 ) )"
)]
#[case(
    "INTERSECTION ( BOX 1 2 3 4 BOX 2 3 4 5 BOX 3 4 5 6 )",
    "INTERSECTION ( BOX 1.0 2.0 3.0 4.0 BOX 2.0 3.0 4.0 5.0 BOX 3.0 4.0 5.0 6.0 )"
)]
fn test_stcs_round_trip(#[case] text: &str, #[case] stcs: &str) {
    let region = Region::parse(text).unwrap();
    assert_eq!(region.to_stcs(), stcs);
    assert_eq!(Region::parse(stcs).unwrap(), region);
}

#[test]
fn test_walk_is_depth_first() {
    let region = Region::parse("UNION (NOT (POSITION 1 2) CIRCLE 1 2 3)").unwrap();
    let types: Vec<RegionType> = region.walk().iter().map(|r| r.region_type()).collect();
    assert_eq!(
        types,
        vec![
            RegionType::Union,
            RegionType::Not,
            RegionType::Position,
            RegionType::Circle
        ]
    );
}

#[rstest]
#[case("1e400 2")]
#[case("POSITION 1e400 2")]
#[case("CIRCLE ICRS 1 2 -1E309")]
fn test_overflowing_numbers_are_rejected(#[case] text: &str) {
    assert!(Region::parse(text).is_err());
}

#[rstest]
#[case("CIRCLE ICRS 1 2", "Unexpected End Of Expression! Expected syntax: \"CIRCLE <coordsys> <coordPair> <radius>\".")]
#[case("NOT POSITION 1 2", "Incorrect syntax: \"(\" was expected instead of \"POSITION\"! Expected syntax: \"NOT ( <region> )\".")]
#[case("POSITION 1 2 3", "Incorrect syntax: \"3\" was unexpected after the region \"POSITION 1.0 2.0\"!")]
fn test_stcs_errors(#[case] text: &str, #[case] message: &str) {
    let err = Region::parse(text).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0501);
    assert_eq!(err.message, message);
}

#[test]
fn test_cartesian_coord_sys_in_stcs() {
    let err = Region::parse("CIRCLE FK5 CARTESIAN2 1 2 3").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0402);
}

#[test]
fn test_combination_needs_two_regions() {
    let position = Region::position(CoordSys::default(), 1.0, 2.0);
    let err = Region::union(CoordSys::default(), vec![position]).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0508);
    assert_eq!(err.message, "A UNION must contain at least 2 regions, not 1!");
}

// ============================================================================
// Geometry function calls
// ============================================================================

#[rstest]
#[case("SELECT POINT('ICRS', 10, 20)", AdqlVersion::V2_0, "POSITION ICRS 10.0 20.0")]
#[case("SELECT CIRCLE('', 1, 2, 3)", AdqlVersion::V2_0, "CIRCLE 1.0 2.0 3.0")]
#[case("SELECT BOX('GALACTIC', 1, 2, 3, 4)", AdqlVersion::V2_0, "BOX GALACTIC 1.0 2.0 3.0 4.0")]
#[case("SELECT CIRCLE(POINT('FK5', 1, 2), 3)", AdqlVersion::V2_1, "CIRCLE FK5 1.0 2.0 3.0")]
#[case("SELECT POLYGON(1, 2, 3, 4, 5, 6)", AdqlVersion::V2_1, "POLYGON 1.0 2.0 3.0 4.0 5.0 6.0")]
#[case(
    "SELECT POLYGON(POINT(1, 2), POINT(3, 4), POINT(5, 6))",
    AdqlVersion::V2_1,
    "POLYGON 1.0 2.0 3.0 4.0 5.0 6.0"
)]
#[case("SELECT REGION('CIRCLE ICRS 1 2 3')", AdqlVersion::V2_0, "CIRCLE ICRS 1.0 2.0 3.0")]
fn test_region_of_geometry(#[case] select: &str, #[case] version: AdqlVersion, #[case] stcs: &str) {
    let region = Region::from_operand(&first_operand(select, version)).unwrap();
    assert_eq!(region.to_stcs(), stcs);
}

#[test]
fn test_region_of_point_keeps_frame() {
    let region = Region::from_operand(&first_operand("SELECT POINT('ICRS', 10, 20)", AdqlVersion::V2_0)).unwrap();
    assert_eq!(region.coord_sys().map(|c| c.frame()), Some(Frame::Icrs));
}

#[rstest]
#[case("SELECT POINT('ICRS', ra, 20)", AdqlVersion::V2_0, ErrorCode::E0504)]
#[case("SELECT POINT(coord_sys, 10, 20)", AdqlVersion::V2_0, ErrorCode::E0404)]
#[case("SELECT REGION('CIRCLE 1 2')", AdqlVersion::V2_0, ErrorCode::E0506)]
#[case("SELECT REGION(name)", AdqlVersion::V2_0, ErrorCode::E0505)]
#[case("SELECT DISTANCE(POINT(1, 2), POINT(3, 4))", AdqlVersion::V2_1, ErrorCode::E0507)]
fn test_region_of_geometry_errors(#[case] select: &str, #[case] version: AdqlVersion, #[case] code: ErrorCode) {
    let err = Region::from_operand(&first_operand(select, version)).unwrap_err();
    assert_eq!(err.code, code);
}

#[test]
fn test_region_serialization_error_keeps_cause() {
    let operand = first_operand("SELECT REGION('CIRCLE 1 2')", AdqlVersion::V2_0);
    let err = Region::from_operand(&operand).unwrap_err();
    assert_eq!(err.message, "Unsupported region serialization!");
    assert!(err.hint.unwrap_or_default().starts_with("Unexpected End Of Expression!"));
    assert!(err.position.is_some());
}
