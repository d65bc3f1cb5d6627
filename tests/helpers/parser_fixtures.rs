//! Parser construction helpers for integration tests.

use adql::feature::available_features_of;
use adql::{AdqlParser, AdqlVersion, FeatureSet, FeatureType, ParserConfig, Query};

/// Parser with the default configuration of the given version.
pub fn parser(version: AdqlVersion) -> AdqlParser {
    AdqlParser::new(ParserConfig::default().with_version(version)).unwrap()
}

/// Parser supporting every feature except those of `unsupported`.
pub fn parser_without(version: AdqlVersion, unsupported: FeatureType) -> AdqlParser {
    let mut features = FeatureSet::all_supported();
    features.allow_any_udf(false);
    features.unsupport_all_of(unsupported);
    AdqlParser::new(
        ParserConfig::default()
            .with_version(version)
            .with_features(features),
    )
    .unwrap()
}

/// Parser restricted to the given coordinate system patterns.
pub fn parser_with_coord_sys(version: AdqlVersion, patterns: &[&str]) -> AdqlParser {
    AdqlParser::new(
        ParserConfig::default()
            .with_version(version)
            .with_allowed_coord_sys(patterns.iter().copied()),
    )
    .unwrap()
}

/// Parse a query that must be accepted.
pub fn parse_ok(parser: &AdqlParser, query: &str) -> Query {
    match parser.parse_query(query) {
        Ok(query) => query,
        Err(err) => panic!("Expected {query:?} to be accepted, got: {err}"),
    }
}

/// Number of optional features of a type in the standard catalogue.
pub fn catalogue_size(feature_type: FeatureType) -> usize {
    available_features_of(feature_type).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_without_geometry() {
        let parser = parser_without(AdqlVersion::V2_0, FeatureType::AdqlGeo);
        assert!(parser.parse_query("SELECT a FROM t").is_ok());
        assert!(parser.parse_query("SELECT POINT('', 1, 2) FROM t").is_err());
    }

    #[test]
    fn test_catalogue_size() {
        assert!(catalogue_size(FeatureType::AdqlGeo) > 10);
    }
}
