//! Optional language features
//!
//! ADQL marks some constructs as optional: a service declares which of them
//! it supports (TAPRegExt `languageFeatures`). Every such construct is a
//! [`LanguageFeature`]; a parser only accepts the ones present in its
//! [`FeatureSet`]. User defined functions are features too, built from a
//! [`FunctionDef`].

mod catalog;
mod function_def;
mod language_feature;
mod set;
mod types;

pub use catalog::{available_features, available_features_of, lookup};
pub use function_def::{DbType, FunctionDef, FunctionParam};
pub use language_feature::LanguageFeature;
pub use set::FeatureSet;
pub use types::FeatureType;
