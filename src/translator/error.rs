use thiserror::Error;

use crate::parser::ParseError;

/// Failure to render a query in a SQL dialect
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A construct the dialect has no equivalent for
    #[error("Impossible to translate {what} into SQL!")]
    Unsupported { what: String },
    /// The argument of `REGION(...)` could not be read
    #[error("Impossible to translate a region: {0}")]
    Region(#[from] ParseError),
}

impl TranslationError {
    pub fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported { what: what.into() }
    }
}
