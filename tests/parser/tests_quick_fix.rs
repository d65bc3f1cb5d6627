//! Quick fix tests - fixed queries parse where the originals did not

use adql::facade::{replace_confusables, try_quick_fix};
use adql::parser::parse_query;
use adql::AdqlVersion;
use rstest::rstest;

#[rstest]
#[case(
    "SELECT date, point FROM t",
    AdqlVersion::V2_1,
    "SELECT \"date\", \"point\" FROM t"
)]
#[case(
    "SELECT _id, _2mass_name FROM t",
    AdqlVersion::V2_0,
    "SELECT \"_id\", \"_2mass_name\" FROM t"
)]
#[case(
    "SELECT lower FROM t WHERE offset > 0",
    AdqlVersion::V2_0,
    "SELECT \"lower\" FROM t WHERE offset > 0"
)]
#[case(
    "SELECT ra FROM t WHERE name = \u{2018}M31\u{2019}",
    AdqlVersion::V2_0,
    "SELECT ra FROM t WHERE name = 'M31'"
)]
fn test_fixed_query_parses(#[case] query: &str, #[case] version: AdqlVersion, #[case] expected: &str) {
    assert!(parse_query(query, version).is_err());
    let fixed = try_quick_fix(query, version);
    assert_eq!(fixed, expected);
    assert!(parse_query(&fixed, version).is_ok(), "Still invalid: {fixed}");
}

#[test]
fn test_valid_query_is_unchanged() {
    let query = "SELECT TOP 5 LOWER(name), COUNT(*) FROM t WHERE a <> 'date' GROUP BY name";
    assert_eq!(try_quick_fix(query, AdqlVersion::V2_1), query);
}

#[test]
fn test_confusables_only() {
    assert_eq!(replace_confusables("a\u{00A0}\u{2212}\u{200B}1"), "a -1");
}
