//! Feature categories, identified by their TAPRegExt IVOID

use std::fmt;
use std::str::FromStr;

/// Category of an optional language feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeatureType {
    /// `LOWER`, `UPPER`, `ILIKE`
    AdqlString,
    /// `UNION`, `EXCEPT`, `INTERSECT`
    AdqlSets,
    /// `WITH`
    AdqlCommonTable,
    /// `COALESCE`
    AdqlConditional,
    /// `OFFSET`
    AdqlOffset,
    /// Geometry functions
    AdqlGeo,
    /// `CAST`
    AdqlType,
    /// `IN_UNIT`
    AdqlUnit,
    /// User defined functions
    Udf,
}

const IVOID_PREFIX: &str = "ivo://ivoa.net/std/TAPRegExt#";

impl FeatureType {
    pub const ALL: [FeatureType; 9] = [
        Self::AdqlString,
        Self::AdqlSets,
        Self::AdqlCommonTable,
        Self::AdqlConditional,
        Self::AdqlOffset,
        Self::AdqlGeo,
        Self::AdqlType,
        Self::AdqlUnit,
        Self::Udf,
    ];

    /// Full IVOID of this category
    pub fn ivoid(self) -> &'static str {
        match self {
            Self::AdqlString => "ivo://ivoa.net/std/TAPRegExt#features-adql-string",
            Self::AdqlSets => "ivo://ivoa.net/std/TAPRegExt#features-adql-sets",
            Self::AdqlCommonTable => "ivo://ivoa.net/std/TAPRegExt#features-adql-common-table",
            Self::AdqlConditional => "ivo://ivoa.net/std/TAPRegExt#features-adql-conditional",
            Self::AdqlOffset => "ivo://ivoa.net/std/TAPRegExt#features-adql-offset",
            Self::AdqlGeo => "ivo://ivoa.net/std/TAPRegExt#features-adql-geo",
            Self::AdqlType => "ivo://ivoa.net/std/TAPRegExt#features-adql-type",
            Self::AdqlUnit => "ivo://ivoa.net/std/TAPRegExt#features-adql-unit",
            Self::Udf => "ivo://ivoa.net/std/TAPRegExt#features-udf",
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ivoid())
    }
}

impl FromStr for FeatureType {
    type Err = String;

    /// Accepts the full IVOID or only its fragment (`features-adql-geo`),
    /// case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let fragment = match trimmed.get(..IVOID_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(IVOID_PREFIX) => {
                &trimmed[IVOID_PREFIX.len()..]
            }
            _ => trimmed,
        };
        Self::ALL
            .into_iter()
            .find(|t| t.ivoid()[IVOID_PREFIX.len()..].eq_ignore_ascii_case(fragment))
            .ok_or_else(|| format!("Unknown language feature type: \"{s}\"!"))
    }
}
