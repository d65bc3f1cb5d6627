//! Foundation types for the ADQL toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextPosition`] - Line/column span of a construct in the query text
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`TextRange`], [`TextSize`] - Byte offsets (re-exported from `text-size`)
//!
//! This module has NO dependencies on other crate modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::TextPosition;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
