use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use super::{FeatureType, FunctionDef};

/// A construct of the language that a service may or may not support
///
/// Standard features are identified by `type!form`. UDF features are
/// identified by their function name (case-insensitive) and number of
/// parameters, so a declared `foo(a INTEGER)` matches the call `FOO(12)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanguageFeature {
    feature_type: Option<FeatureType>,
    form: SmolStr,
    optional: bool,
    description: Option<String>,
    udf: Option<FunctionDef>,
}

impl LanguageFeature {
    /// An optional feature of the ADQL standard
    pub fn standard(feature_type: FeatureType, form: impl Into<SmolStr>) -> Self {
        Self::new(Some(feature_type), form, true, None)
    }

    pub fn new(
        feature_type: Option<FeatureType>,
        form: impl Into<SmolStr>,
        optional: bool,
        description: Option<String>,
    ) -> Self {
        Self {
            feature_type,
            form: form.into(),
            optional,
            description,
            udf: None,
        }
    }

    /// Feature standing for a user defined function
    pub fn udf(definition: FunctionDef) -> Self {
        Self {
            feature_type: Some(FeatureType::Udf),
            form: SmolStr::new(definition.to_string()),
            optional: true,
            description: definition.description.clone(),
            udf: Some(definition),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn feature_type(&self) -> Option<FeatureType> {
        self.feature_type
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn udf_definition(&self) -> Option<&FunctionDef> {
        self.udf.as_ref()
    }

    pub fn is_udf(&self) -> bool {
        self.feature_type == Some(FeatureType::Udf)
    }

    /// `type!form`, or just `form` for a typeless feature
    pub fn id(&self) -> String {
        match self.feature_type {
            Some(feature_type) => format!("{}!{}", feature_type.ivoid(), self.form),
            None => self.form.to_string(),
        }
    }
}

impl PartialEq for LanguageFeature {
    fn eq(&self, other: &Self) -> bool {
        match (&self.udf, &other.udf) {
            (Some(a), Some(b)) => {
                a.name.eq_ignore_ascii_case(&b.name) && a.nb_params() == b.nb_params()
            }
            (None, None) => self.id() == other.id(),
            _ => false,
        }
    }
}

impl Eq for LanguageFeature {}

impl Hash for LanguageFeature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.udf {
            Some(def) => {
                def.name.to_ascii_lowercase().hash(state);
                def.nb_params().hash(state);
            }
            None => self.id().hash(state),
        }
    }
}

impl fmt::Display for LanguageFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.form)
    }
}
