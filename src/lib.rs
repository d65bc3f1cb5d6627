//! # adql-base
//!
//! Core library for ADQL (Astronomical Data Query Language) parsing, AST,
//! semantic checks, STC-S/DALI regions and SQL translation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! translator → SQL generation (PostgreSQL, pgSphere)
//!   ↓
//! facade     → AdqlParser: parse + validation passes + query checker
//!   ↓
//! semantic   → Feature / coordinate-system / region checks, DbChecker
//!   ↓
//! stc        → CoordSys, Region, STC-S and DALI grammars
//!   ↓
//! syntax     → AST types, ADQL serialisation, visitors
//!   ↓
//! feature    → LanguageFeature, FeatureSet, UDF definitions
//!   ↓
//! parser     → Logos lexer, recursive-descent grammar, ParseError
//!   ↓
//! base       → Primitives (TextPosition, LineIndex, TextRange)
//! ```
//!
//! ## Quick example
//!
//! ```
//! use adql::{AdqlParser, AdqlVersion, ParserConfig};
//!
//! let parser = AdqlParser::new(ParserConfig::default().with_version(AdqlVersion::V2_1)).unwrap();
//! let query = parser.parse_query("SELECT TOP 10 ra, dec FROM gaia.source WHERE ra > 10").unwrap();
//! assert_eq!(query.to_string(), "SELECT TOP 10 ra, dec\nFROM gaia.source\nWHERE ra > 10");
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → feature → syntax → stc → semantic → facade → translator)
// ============================================================================

/// Foundation types: TextPosition, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, keyword tables, recursive-descent grammar, ParseError
pub mod parser;

/// Optional language features and the per-parser feature set
pub mod feature;

/// Syntax: ADQL AST types, ADQL serialisation, visitors
pub mod syntax;

/// STC: coordinate systems and regions (STC-S and DALI)
pub mod stc;

/// Semantic validation passes and query checkers
pub mod semantic;

/// Parser facade: configuration, multi-pass validation, quick fixes
pub mod facade;

/// SQL translation of validated queries
pub mod translator;

mod error;

pub use base::{LineIndex, TextPosition};
pub use error::AdqlError;
pub use facade::{AdqlParser, ParserConfig};
pub use feature::{FeatureSet, FeatureType, FunctionDef, LanguageFeature};
pub use parser::{AdqlVersion, ErrorCode, ParseError, Token, TokenKind};
pub use semantic::{DbChecker, DbColumn, DbMetadata, DbTable, QueryChecker, UnresolvedIdentifiersError};
pub use stc::{CoordSys, Flavor, Frame, RefPos, Region, RegionType};
pub use syntax::Query;
pub use translator::{PgSphereTranslator, PostgreSqlTranslator, SqlTranslator, TranslationError};
