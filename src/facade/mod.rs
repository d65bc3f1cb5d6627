//! Parser facade
//!
//! [`AdqlParser`] owns a [`ParserConfig`] and runs every query through the
//! same pipeline:
//!
//! 1. lexing and parsing with the grammar of the configured version; the
//!    first syntax error aborts
//! 2. optional feature check
//! 3. coordinate system check
//! 4. `REGION(...)` check, unless the extended region parameter is allowed
//!    or `REGION` is not supported
//! 5. the [`QueryChecker`], for full queries only, once 2 to 4 succeeded
//!
//! Errors of steps 2 to 4 are merged, in document order, into a single
//! [`UnresolvedIdentifiersError`].

mod config;
mod quick_fix;

pub use config::ParserConfig;
pub use quick_fix::{replace_confusables, try_quick_fix};

use std::fmt;

use crate::error::AdqlError;
use crate::feature::{FeatureSet, FeatureType, LanguageFeature};
use crate::parser::{self, AdqlVersion, ParseError, Token};
use crate::semantic::{
    QueryChecker, UnresolvedIdentifiersError, check_coord_systems, check_features, check_regions,
};
use crate::stc::CoordSysPolicy;
use crate::syntax::{Constraint, FromItem, Operand, OrderItem, Query, SelectClause, Walk};

/// Configured ADQL parser
///
/// ```
/// use adql::{AdqlError, AdqlParser, ParserConfig};
///
/// let parser = AdqlParser::new(ParserConfig::default().with_allowed_coord_sys(["ICRS * *"])).unwrap();
/// assert!(parser.parse_query("SELECT POINT('ICRS', ra, dec) FROM t").is_ok());
/// let err = parser.parse_query("SELECT POINT('FK5', ra, dec) FROM t").unwrap_err();
/// assert!(matches!(err, AdqlError::Unresolved(e) if e.len() == 1));
/// ```
pub struct AdqlParser {
    config: ParserConfig,
    policy: Option<CoordSysPolicy>,
    checker: Option<Box<dyn QueryChecker>>,
}

impl fmt::Debug for AdqlParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdqlParser")
            .field("config", &self.config)
            .field("checker", &self.checker.is_some())
            .finish()
    }
}

impl AdqlParser {
    /// Build a parser, failing when a coordinate system pattern is invalid
    pub fn new(config: ParserConfig) -> Result<Self, ParseError> {
        let policy = compile_policy(config.allowed_coord_sys.as_deref())?;
        Ok(Self {
            config,
            policy,
            checker: None,
        })
    }

    pub fn with_checker(mut self, checker: impl QueryChecker + 'static) -> Self {
        self.checker = Some(Box::new(checker));
        self
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn version(&self) -> AdqlVersion {
        self.config.version
    }

    pub fn features(&self) -> &FeatureSet {
        &self.config.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureSet {
        &mut self.config.features
    }

    pub fn coord_sys_policy(&self) -> Option<&CoordSysPolicy> {
        self.policy.as_ref()
    }

    pub fn set_version(&mut self, version: AdqlVersion) {
        self.config.version = version;
    }

    pub fn set_features(&mut self, features: FeatureSet) {
        self.config.features = features;
    }

    /// Replace the allowed coordinate systems; `None` allows all
    ///
    /// The previous policy is kept when a pattern is invalid.
    pub fn set_allowed_coord_sys(&mut self, patterns: Option<Vec<String>>) -> Result<(), ParseError> {
        self.policy = compile_policy(patterns.as_deref())?;
        self.config.allowed_coord_sys = patterns;
        Ok(())
    }

    pub fn set_allow_any_udf(&mut self, allowed: bool) {
        self.config.allow_any_udf = allowed;
    }

    pub fn set_allow_extended_region_param(&mut self, allowed: bool) {
        self.config.allow_extended_region_param = allowed;
    }

    pub fn set_checker(&mut self, checker: Option<Box<dyn QueryChecker>>) {
        self.checker = checker;
    }

    // ========================================================================
    // PARSING
    // ========================================================================

    /// Parse and check a full query
    pub fn parse_query(&self, input: &str) -> Result<Query, AdqlError> {
        tracing::debug!(version = %self.config.version, "parsing query");
        let query = parser::parse_query(input, self.config.version)?;
        self.check(&query)?;
        if let Some(checker) = &self.checker {
            checker.check(&query)?;
        }
        tracing::debug!("query accepted");
        Ok(query)
    }

    /// Parse and check a lone `SELECT` clause
    pub fn parse_select(&self, input: &str) -> Result<SelectClause, AdqlError> {
        let clause = parser::parse_select(input, self.config.version)?;
        self.check(&clause)?;
        Ok(clause)
    }

    /// Parse and check a lone `FROM` clause
    pub fn parse_from(&self, input: &str) -> Result<Vec<FromItem>, AdqlError> {
        let items = parser::parse_from(input, self.config.version)?;
        self.check(items.as_slice())?;
        Ok(items)
    }

    /// Parse and check a lone `WHERE` clause
    pub fn parse_where(&self, input: &str) -> Result<Constraint, AdqlError> {
        let constraint = parser::parse_where(input, self.config.version)?;
        self.check(&constraint)?;
        Ok(constraint)
    }

    /// Parse and check a lone `ORDER BY` clause
    pub fn parse_order_by(&self, input: &str) -> Result<Vec<OrderItem>, AdqlError> {
        let items = parser::parse_order_by(input, self.config.version)?;
        self.check(items.as_slice())?;
        Ok(items)
    }

    /// Parse and check a lone `GROUP BY` clause
    pub fn parse_group_by(&self, input: &str) -> Result<Vec<Operand>, AdqlError> {
        let items = parser::parse_group_by(input, self.config.version)?;
        self.check(items.as_slice())?;
        Ok(items)
    }

    /// Split `input` into tokens, without any grammar check
    pub fn tokenize<'a>(&self, input: &'a str, stop_at_end: bool) -> Result<Vec<Token<'a>>, ParseError> {
        parser::tokenize(input, stop_at_end)
    }

    /// Fix the most common mistakes of `query` (see [`try_quick_fix`])
    pub fn try_quick_fix(&self, query: &str) -> String {
        try_quick_fix(query, self.config.version)
    }

    /// Run the validation passes on an already parsed tree
    pub fn check<W: Walk + ?Sized>(&self, root: &W) -> Result<(), UnresolvedIdentifiersError> {
        let mut errors = check_features(root, &self.config.features, self.config.allow_any_udf);
        tracing::trace!(count = errors.len(), "feature check");

        let coord_sys_errors = check_coord_systems(root, self.policy.as_ref());
        tracing::trace!(count = coord_sys_errors.len(), "coordinate system check");
        errors.extend(coord_sys_errors);

        if self.checks_regions() {
            let region_errors = check_regions(root, &self.config.features, self.policy.as_ref());
            tracing::trace!(count = region_errors.len(), "region check");
            errors.extend(region_errors);
        }

        // stable: errors without position stay after the others, in pass order
        errors.sort_by_key(|e| (e.position.is_none(), e.position));
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "query rejected");
        }
        errors.into_iter().collect::<UnresolvedIdentifiersError>().into_result()
    }

    fn checks_regions(&self) -> bool {
        let region = LanguageFeature::standard(FeatureType::AdqlGeo, "REGION");
        !self.config.allow_extended_region_param && self.config.features.is_supporting(&region)
    }
}

fn compile_policy(patterns: Option<&[String]>) -> Result<Option<CoordSysPolicy>, ParseError> {
    patterns.map(CoordSysPolicy::new).transpose()
}
