use crate::feature::FeatureSet;
use crate::parser::AdqlVersion;

/// Configuration of an [`AdqlParser`](super::AdqlParser)
///
/// ```
/// use adql::{AdqlVersion, ParserConfig};
///
/// let config = ParserConfig::default()
///     .with_version(AdqlVersion::V2_1)
///     .with_allowed_coord_sys(["ICRS * *"]);
/// assert_eq!(config.allowed_coord_sys.as_deref(), Some(&["ICRS * *".to_string()][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Grammar used to parse queries
    pub version: AdqlVersion,
    /// Optional features accepted in queries
    pub features: FeatureSet,
    /// Patterns of the coordinate systems queries may use; `None` allows all
    pub allowed_coord_sys: Option<Vec<String>>,
    /// Accept any user defined function, declared or not
    pub allow_any_udf: bool,
    /// Let `REGION(...)` take any string expression, left unchecked
    pub allow_extended_region_param: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        let mut features = FeatureSet::all_supported();
        features.allow_any_udf(false);
        Self {
            version: AdqlVersion::default(),
            features,
            allowed_coord_sys: None,
            allow_any_udf: false,
            allow_extended_region_param: false,
        }
    }
}

impl ParserConfig {
    pub fn with_version(mut self, version: AdqlVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_allowed_coord_sys<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_coord_sys = Some(patterns.into_iter().map(Into::into).collect());
        self
    }

    /// Remove any coordinate system restriction
    pub fn with_any_coord_sys(mut self) -> Self {
        self.allowed_coord_sys = None;
        self
    }

    pub fn with_any_udf(mut self, allowed: bool) -> Self {
        self.allow_any_udf = allowed;
        self
    }

    pub fn with_extended_region_param(mut self, allowed: bool) -> Self {
        self.allow_extended_region_param = allowed;
        self
    }
}
