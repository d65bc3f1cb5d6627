//! Coordinate system tests - parsing, serialisation and policies

use adql::stc::CoordSysPolicy;
use adql::{CoordSys, ErrorCode, Flavor, Frame, RefPos};
use rstest::rstest;

#[test]
fn test_full_coord_sys() {
    let coord_sys = CoordSys::parse("ICRS GEOCENTER SPHERICAL2").unwrap();
    assert_eq!(coord_sys.frame(), Frame::Icrs);
    assert_eq!(coord_sys.refpos(), RefPos::Geocenter);
    assert_eq!(coord_sys.flavor(), Flavor::Spherical2);
    assert!(!coord_sys.is_default());
}

#[test]
fn test_cartesian_with_frame() {
    let err = CoordSys::parse("ICRS CARTESIAN2").unwrap_err();
    assert_eq!(err.code, ErrorCode::E0402);
    assert!(
        err.message
            .contains("cartesian flavor MUST have an UNKNOWNFRAME and UNKNOWNREFPOS")
    );
}

#[rstest]
#[case("", "UNKNOWNFRAME UNKNOWNREFPOS SPHERICAL2")]
#[case("   ", "UNKNOWNFRAME UNKNOWNREFPOS SPHERICAL2")]
#[case("galactic", "GALACTIC UNKNOWNREFPOS SPHERICAL2")]
#[case("Barycenter", "UNKNOWNFRAME BARYCENTER SPHERICAL2")]
#[case("CARTESIAN3", "UNKNOWNFRAME UNKNOWNREFPOS CARTESIAN3")]
#[case("UNKNOWNFRAME UNKNOWNREFPOS CARTESIAN2", "UNKNOWNFRAME UNKNOWNREFPOS CARTESIAN2")]
#[case("FK4 LSR", "FK4 LSR SPHERICAL2")]
fn test_missing_parts_take_defaults(#[case] text: &str, #[case] full: &str) {
    assert_eq!(CoordSys::parse(text).unwrap().to_full_stcs(), full);
}

#[rstest]
#[case("ICRS GEOCENTER SPHERICAL2")]
#[case("fk5 heliocenter")]
#[case("CARTESIAN2")]
#[case("")]
fn test_stcs_round_trip(#[case] text: &str) {
    let coord_sys = CoordSys::parse(text).unwrap();
    assert_eq!(CoordSys::parse(&coord_sys.to_stcs()).unwrap(), coord_sys);
    assert_eq!(CoordSys::parse(&coord_sys.to_full_stcs()).unwrap(), coord_sys);
}

#[test]
fn test_every_valid_combination() {
    for &frame in Frame::ALL {
        for &refpos in RefPos::ALL {
            for &flavor in Flavor::ALL {
                let built = CoordSys::new(frame, refpos, flavor);
                let cartesian_with_context =
                    flavor.is_cartesian() && (!frame.is_default() || !refpos.is_default());
                assert_eq!(built.is_err(), cartesian_with_context, "{frame} {refpos} {flavor}");
            }
        }
    }
}

#[rstest]
#[case("ICRS FOO")]
#[case("GEOCENTER ICRS")]
#[case("SPHERICAL2 ICRS")]
#[case("ICRS ICRS")]
fn test_incorrect_syntax(#[case] text: &str) {
    let err = CoordSys::parse(text).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0401);
    assert!(err.message.contains("Expected syntax"));
}

// ============================================================================
// Policies
// ============================================================================

#[rstest]
#[case("ICRS * *", "ICRS", true)]
#[case("ICRS * *", "", true)]
#[case("ICRS * *", "ICRS BARYCENTER", true)]
#[case("ICRS * *", "FK5", false)]
#[case("(ICRS|FK5) GEOCENTER SPHERICAL2", "FK5 GEOCENTER", true)]
#[case("(ICRS|FK5) GEOCENTER SPHERICAL2", "FK5 BARYCENTER", false)]
#[case("* * CARTESIAN2", "CARTESIAN2", true)]
#[case("* * CARTESIAN2", "CARTESIAN3", false)]
fn test_policy(#[case] pattern: &str, #[case] coord_sys: &str, #[case] allowed: bool) {
    let policy = CoordSysPolicy::new(&[pattern]).unwrap();
    assert_eq!(policy.is_allowed(&CoordSys::parse(coord_sys).unwrap()), allowed);
}

#[test]
fn test_empty_policy_allows_only_default() {
    let policy = CoordSysPolicy::new::<&str>(&[]).unwrap();
    assert!(policy.is_allowed(&CoordSys::default()));
    let fk5 = CoordSys::parse("FK5").unwrap();
    let err = policy.check("FK5", &fk5).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0403);
    assert_eq!(
        err.message,
        "Coordinate system \"FK5\" (= \"FK5 UNKNOWNREFPOS SPHERICAL2\") not allowed in this implementation. No coordinate system is allowed!"
    );
}

#[test]
fn test_rejection_lists_patterns() {
    let policy = CoordSysPolicy::new(&["ICRS * *", "GALACTIC * *"]).unwrap();
    let err = policy.check("fk4", &CoordSys::parse("fk4").unwrap()).unwrap_err();
    assert!(
        err.message
            .ends_with("Allowed coordinate systems are: ICRS * *, GALACTIC * *")
    );
}

#[rstest]
#[case("ICRS *")]
#[case("ICRS * * *")]
#[case("FOO * *")]
#[case("(ICRS|BAR) * *")]
fn test_incorrect_pattern(#[case] pattern: &str) {
    let err = CoordSysPolicy::new(&[pattern]).unwrap_err();
    assert_eq!(err.code, ErrorCode::E0405);
}
