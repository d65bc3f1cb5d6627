use indexmap::{IndexMap, IndexSet};

use super::{FeatureType, LanguageFeature, available_features, available_features_of};

/// Set of optional language features currently supported by a parser
///
/// Only optional features with a type can be stored. User defined
/// functions are either declared one by one, or all allowed at once with
/// [`FeatureSet::allow_any_udf`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureSet {
    supported: IndexMap<FeatureType, IndexSet<LanguageFeature>>,
    any_udf_allowed: bool,
}

impl FeatureSet {
    /// An empty set: no optional feature supported
    pub fn new() -> Self {
        Self::default()
    }

    /// Every available feature supported, and any UDF allowed
    pub fn all_supported() -> Self {
        let mut set = Self::new();
        set.support_all();
        set
    }

    /// Declare a feature as supported
    ///
    /// Returns `false` when the feature cannot be stored (no type or not
    /// optional) or was already supported.
    pub fn support(&mut self, feature: &LanguageFeature) -> bool {
        let Some(feature_type) = storable_type(feature) else {
            return false;
        };
        self.supported
            .entry(feature_type)
            .or_default()
            .insert(feature.clone())
    }

    /// Remove a feature from the supported ones
    ///
    /// Returns `false` when it was not supported.
    pub fn unsupport(&mut self, feature: &LanguageFeature) -> bool {
        let Some(feature_type) = storable_type(feature) else {
            return false;
        };
        self.supported
            .get_mut(&feature_type)
            .is_some_and(|features| features.shift_remove(feature))
    }

    /// Support every available feature and allow any UDF
    pub fn support_all(&mut self) {
        for feature in available_features() {
            self.support(feature);
        }
        self.any_udf_allowed = true;
    }

    /// Support nothing, not even the individually declared UDFs
    pub fn unsupport_all(&mut self) {
        self.supported.clear();
        self.any_udf_allowed = false;
    }

    /// Support every available feature of one type
    ///
    /// For [`FeatureType::Udf`] this allows any UDF.
    pub fn support_all_of(&mut self, feature_type: FeatureType) {
        if feature_type == FeatureType::Udf {
            self.any_udf_allowed = true;
            return;
        }
        for feature in available_features_of(feature_type) {
            self.support(feature);
        }
    }

    /// Unsupport every available feature of one type
    ///
    /// For [`FeatureType::Udf`] this only stops allowing any UDF: the
    /// individually declared ones stay supported.
    pub fn unsupport_all_of(&mut self, feature_type: FeatureType) {
        if feature_type == FeatureType::Udf {
            self.any_udf_allowed = false;
            return;
        }
        if let Some(features) = self.supported.get_mut(&feature_type) {
            features.clear();
        }
    }

    pub fn allow_any_udf(&mut self, allowed: bool) {
        self.any_udf_allowed = allowed;
    }

    pub fn any_udf_allowed(&self) -> bool {
        self.any_udf_allowed
    }

    pub fn is_supporting(&self, feature: &LanguageFeature) -> bool {
        let Some(feature_type) = feature.feature_type() else {
            return false;
        };
        (feature_type == FeatureType::Udf && self.any_udf_allowed)
            || self
                .supported
                .get(&feature_type)
                .is_some_and(|features| features.contains(feature))
    }

    /// All supported features, grouped by type in insertion order
    pub fn supported(&self) -> impl Iterator<Item = &LanguageFeature> {
        self.supported.values().flatten()
    }

    pub fn supported_of(&self, feature_type: FeatureType) -> impl Iterator<Item = &LanguageFeature> {
        self.supported.get(&feature_type).into_iter().flatten()
    }

    /// Individually declared UDFs
    pub fn supported_udfs(&self) -> impl Iterator<Item = &LanguageFeature> {
        self.supported_of(FeatureType::Udf)
    }

    /// Available features that are not supported
    pub fn unsupported(&self) -> impl Iterator<Item = &'static LanguageFeature> + '_ {
        available_features()
            .iter()
            .filter(|feature| !self.is_supporting(feature))
    }
}

fn storable_type(feature: &LanguageFeature) -> Option<FeatureType> {
    feature
        .feature_type()
        .filter(|_| feature.is_optional())
}
