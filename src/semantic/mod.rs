//! # Semantic checks
//!
//! Passes run on a syntactically valid tree. Each one returns every error
//! it finds instead of stopping at the first, so that the caller can merge
//! them into one [`UnresolvedIdentifiersError`]:
//!
//! - [`check_features`]: optional language features not supported
//! - [`check_coord_systems`]: literal coordinate systems, syntax and policy
//! - [`check_regions`]: `REGION(...)` arguments and the shapes they hold
//!
//! [`QueryChecker`] is the hook for checks needing outside knowledge, run
//! after the built-in passes succeeded. [`DbChecker`] is the one resolving
//! tables and columns against database metadata.

mod checker;
mod coord_systems;
mod db;
mod error;
mod features;
mod regions;

pub use checker::QueryChecker;
pub use coord_systems::check_coord_systems;
pub use db::{DbChecker, DbColumn, DbMetadata, DbTable};
pub use error::UnresolvedIdentifiersError;
pub use features::check_features;
pub use regions::check_regions;
