//! Catalogue of every optional feature of the ADQL standard

use std::sync::LazyLock;

use super::{FeatureType, LanguageFeature};

static AVAILABLE_FEATURES: LazyLock<Vec<LanguageFeature>> = LazyLock::new(|| {
    use FeatureType::*;

    let entries: &[(FeatureType, &str, &str)] = &[
        (AdqlString, "LOWER", "Put the given string in lower case."),
        (AdqlString, "UPPER", "Put the given string in upper case."),
        (AdqlString, "ILIKE", "Case-insensitive pattern matching."),
        (AdqlSets, "UNION", "Union of the rows of two queries."),
        (AdqlSets, "EXCEPT", "Rows of a query not returned by a second query."),
        (AdqlSets, "INTERSECT", "Rows returned by two queries."),
        (AdqlCommonTable, "WITH", "Named subqueries (common table expressions)."),
        (AdqlConditional, "COALESCE", "First non-NULL value of a list."),
        (AdqlOffset, "OFFSET", "Number of rows to skip."),
        (AdqlGeo, "AREA", "Area (in square degrees) of a region."),
        (AdqlGeo, "BOX", "Box region."),
        (AdqlGeo, "CENTROID", "Centroid of a region."),
        (AdqlGeo, "CIRCLE", "Circle region."),
        (AdqlGeo, "CONTAINS", "Whether a region is contained in another."),
        (AdqlGeo, "COORD1", "First coordinate of a point."),
        (AdqlGeo, "COORD2", "Second coordinate of a point."),
        (AdqlGeo, "COORDSYS", "Coordinate system of a region."),
        (AdqlGeo, "DISTANCE", "Angular distance between two points."),
        (AdqlGeo, "INTERSECTS", "Whether two regions overlap."),
        (AdqlGeo, "POINT", "Point on the sky."),
        (AdqlGeo, "POLYGON", "Polygon region."),
        (AdqlGeo, "REGION", "Region from an STC-S or DALI serialization."),
        (AdqlType, "CAST", "Conversion into another datatype."),
        (AdqlUnit, "IN_UNIT", "Conversion of a value into another unit."),
    ];

    entries
        .iter()
        .map(|(feature_type, form, description)| {
            LanguageFeature::standard(*feature_type, *form).with_description(*description)
        })
        .collect()
});

/// Every optional feature of the standard, UDFs excepted
pub fn available_features() -> &'static [LanguageFeature] {
    &AVAILABLE_FEATURES
}

pub fn available_features_of(
    feature_type: FeatureType,
) -> impl Iterator<Item = &'static LanguageFeature> {
    AVAILABLE_FEATURES
        .iter()
        .filter(move |f| f.feature_type() == Some(feature_type))
}

/// Catalogue entry of the given type and form (form matched case-insensitively)
pub fn lookup(feature_type: FeatureType, form: &str) -> Option<&'static LanguageFeature> {
    available_features_of(feature_type).find(|f| f.form().eq_ignore_ascii_case(form))
}
