//! Parser error handling module
//!
//! This module provides the error type shared by every stage of the ADQL
//! pipeline (lexer, grammar, coordinate systems, regions, semantic passes):
//! - Categorized error codes for filtering and stable assertions
//! - Line/column positions
//! - Hints for common mistakes (reserved words, non-ASCII characters)

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{ParseError, ParseErrorBuilder};
