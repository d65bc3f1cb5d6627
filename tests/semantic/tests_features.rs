//! Feature set tests - support bookkeeping and the feature pass

use adql::feature::{available_features, available_features_of, lookup};
use adql::{AdqlVersion, FeatureSet, FeatureType, FunctionDef, LanguageFeature};
use rstest::rstest;

use crate::helpers::error_assertions::{messages, unresolved};
use crate::helpers::parser_fixtures::{catalogue_size, parse_ok, parser_without};

#[test]
fn test_support_is_monotonic() {
    let mut set = FeatureSet::new();
    for (count, feature) in available_features().iter().enumerate() {
        assert_eq!(set.supported().count(), count);
        assert!(set.support(feature));
        assert!(!set.support(feature), "Supported twice: {}", feature.id());
        assert!(set.is_supporting(feature));
    }
    for feature in available_features() {
        assert!(set.unsupport(feature));
        assert!(!set.is_supporting(feature));
    }
    assert_eq!(set.supported().count(), 0);
}

fn without_geometry() -> FeatureSet {
    let mut set = FeatureSet::all_supported();
    set.unsupport_all_of(FeatureType::AdqlGeo);
    set
}

fn with_declared_udf() -> FeatureSet {
    let mut set = FeatureSet::new();
    let udf = LanguageFeature::udf(FunctionDef::parse("my_fn(x DOUBLE) -> DOUBLE").unwrap());
    assert!(set.support(&udf));
    set
}

#[rstest]
#[case::empty(FeatureSet::new())]
#[case::everything(FeatureSet::all_supported())]
#[case::partial(without_geometry())]
#[case::declared_udf(with_declared_udf())]
fn test_whole_catalogue_toggles(#[case] mut set: FeatureSet) {
    set.support_all();
    for feature in available_features() {
        assert!(set.is_supporting(feature), "Not supported: {}", feature.id());
    }
    assert!(set.any_udf_allowed());
    assert_eq!(set.unsupported().count(), 0);

    set.unsupport_all();
    for feature in available_features() {
        assert!(!set.is_supporting(feature), "Still supported: {}", feature.id());
    }
    assert!(!set.any_udf_allowed());
    assert_eq!(set.supported().count(), 0);
    assert_eq!(set.unsupported().count(), available_features().len());
}

#[rstest]
#[case(FeatureType::AdqlString, 3)]
#[case(FeatureType::AdqlSets, 3)]
#[case(FeatureType::AdqlCommonTable, 1)]
#[case(FeatureType::AdqlConditional, 1)]
#[case(FeatureType::AdqlOffset, 1)]
#[case(FeatureType::AdqlGeo, 13)]
#[case(FeatureType::AdqlType, 1)]
#[case(FeatureType::AdqlUnit, 1)]
#[case(FeatureType::Udf, 0)]
fn test_support_all_of(#[case] feature_type: FeatureType, #[case] size: usize) {
    assert_eq!(catalogue_size(feature_type), size);

    let mut set = FeatureSet::new();
    set.support_all_of(feature_type);
    assert_eq!(set.supported_of(feature_type).count(), size);
    assert!(available_features_of(feature_type).all(|f| set.is_supporting(f)));

    set.unsupport_all_of(feature_type);
    assert_eq!(set.supported_of(feature_type).count(), 0);
}

#[test]
fn test_unsupported_lists_the_rest() {
    let mut set = FeatureSet::all_supported();
    set.unsupport_all_of(FeatureType::AdqlGeo);
    let unsupported: Vec<&str> = set.unsupported().map(|f| f.form()).collect();
    assert_eq!(unsupported.len(), catalogue_size(FeatureType::AdqlGeo));
    assert!(unsupported.contains(&"POINT"));
}

#[test]
fn test_features_without_type_are_refused() {
    let mut set = FeatureSet::new();
    let typeless = LanguageFeature::new(None, "FOO", true, None);
    let mandatory = LanguageFeature::new(Some(FeatureType::AdqlGeo), "FOO", false, None);
    assert!(!set.support(&typeless));
    assert!(!set.support(&mandatory));
    assert!(!set.is_supporting(&typeless));
}

#[test]
fn test_lookup_is_case_insensitive() {
    let lower = lookup(FeatureType::AdqlString, "lower").unwrap();
    assert_eq!(lower.form(), "LOWER");
    assert_eq!(
        lower.id(),
        "ivo://ivoa.net/std/TAPRegExt#features-adql-string!LOWER"
    );
    assert!(lookup(FeatureType::AdqlGeo, "LOWER").is_none());
}

// ============================================================================
// UDFs
// ============================================================================

#[test]
fn test_udf_matches_by_name_and_arity() {
    let declared = LanguageFeature::udf(FunctionDef::parse("gavo_match(pattern VARCHAR, str VARCHAR) -> INTEGER").unwrap());
    let call = LanguageFeature::udf(FunctionDef::from_call("GAVO_MATCH", 2));
    let other_arity = LanguageFeature::udf(FunctionDef::from_call("gavo_match", 1));
    assert_eq!(declared, call);
    assert_ne!(declared, other_arity);

    let mut set = FeatureSet::new();
    set.support(&declared);
    assert!(set.is_supporting(&call));
    assert!(!set.is_supporting(&other_arity));
}

#[test]
fn test_declared_udfs_survive_unsupport_all_of_udf() {
    let mut set = FeatureSet::new();
    set.support(&LanguageFeature::udf(FunctionDef::from_call("foo", 1)));
    set.allow_any_udf(true);
    set.unsupport_all_of(FeatureType::Udf);
    assert!(!set.any_udf_allowed());
    assert_eq!(set.supported_udfs().count(), 1);
    set.unsupport_all();
    assert_eq!(set.supported_udfs().count(), 0);
}

#[rstest]
#[case("foo(a INTEGER", "Wrong function definition syntax")]
#[case("foo(a) -> INTEGER", "Wrong parameter definition syntax: \"a\"!")]
#[case("1foo() -> INTEGER", "Wrong function definition syntax")]
fn test_wrong_function_definition(#[case] text: &str, #[case] start: &str) {
    let err = FunctionDef::parse(text).unwrap_err();
    assert!(err.message.starts_with(start), "Unexpected message: {}", err.message);
}

// ============================================================================
// Through the parser
// ============================================================================

#[test]
fn test_unsupported_point() {
    let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo);
    let err = unresolved(&parser, "SELECT POINT('', 12.3, 45.6) FROM foo");
    assert_eq!(
        messages(&err),
        vec!["Unsupported ADQL feature: \"POINT\" (of type 'ivo://ivoa.net/std/TAPRegExt#features-adql-geo')!"]
    );
}

#[rstest]
#[case(FeatureType::AdqlString, "SELECT a FROM t WHERE LOWER(a) ILIKE 'x'", 2)]
#[case(FeatureType::AdqlSets, "SELECT a FROM t UNION SELECT a FROM u EXCEPT SELECT a FROM v", 2)]
#[case(FeatureType::AdqlCommonTable, "WITH x AS (SELECT a FROM t) SELECT a FROM x", 1)]
#[case(FeatureType::AdqlConditional, "SELECT COALESCE(a, 0) FROM t", 1)]
#[case(FeatureType::AdqlOffset, "SELECT a FROM t OFFSET 10", 1)]
#[case(FeatureType::AdqlType, "SELECT CAST(a AS REAL) FROM t", 1)]
#[case(FeatureType::AdqlUnit, "SELECT IN_UNIT(a, 'km') FROM t", 1)]
fn test_each_feature_type(#[case] feature_type: FeatureType, #[case] query: &str, #[case] count: usize) {
    let parser = parser_without(AdqlVersion::V2_1, feature_type);
    let err = unresolved(&parser, query);
    assert_eq!(err.len(), count, "{err}");
    assert!(err.iter().all(|e| e.message.contains(feature_type.ivoid())));

    let all = parser_without(AdqlVersion::V2_1, FeatureType::Udf);
    parse_ok(&all, query);
}

#[test]
fn test_undeclared_udf() {
    let parser = parser_without(AdqlVersion::V2_1, FeatureType::Udf);
    let err = unresolved(&parser, "SELECT my_func(a, 2) FROM t");
    assert_eq!(err.len(), 1);
    assert!(err.errors()[0].message.contains("features-udf"));
}

#[test]
fn test_declared_udf() {
    let mut parser = parser_without(AdqlVersion::V2_1, FeatureType::Udf);
    let definition = FunctionDef::parse("my_func(x DOUBLE, n INTEGER) -> DOUBLE").unwrap();
    parser.features_mut().support(&LanguageFeature::udf(definition));
    parse_ok(&parser, "SELECT MY_FUNC(a, 2) FROM t");
    assert_eq!(unresolved(&parser, "SELECT my_func(a) FROM t").len(), 1);
}
