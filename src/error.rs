use thiserror::Error;

use crate::parser::ParseError;
use crate::semantic::UnresolvedIdentifiersError;

/// Failure of an [`AdqlParser`](crate::AdqlParser) entry point
///
/// Either the first syntax error met, or every error found by the
/// validation passes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdqlError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Unresolved(#[from] UnresolvedIdentifiersError),
}

impl AdqlError {
    /// Every individual error, in document order
    pub fn errors(&self) -> Vec<&ParseError> {
        match self {
            Self::Parse(err) => vec![err],
            Self::Unresolved(err) => err.iter().collect(),
        }
    }
}
