use super::UnresolvedIdentifiersError;
use crate::syntax::Query;

/// Extra check run on a query once every built-in pass succeeded
///
/// Typically used to resolve tables and columns against the metadata of
/// a database (see [`DbChecker`](super::DbChecker)).
pub trait QueryChecker: Send + Sync {
    fn check(&self, query: &Query) -> Result<(), UnresolvedIdentifiersError>;
}

impl<F> QueryChecker for F
where
    F: Fn(&Query) -> Result<(), UnresolvedIdentifiersError> + Send + Sync,
{
    fn check(&self, query: &Query) -> Result<(), UnresolvedIdentifiersError> {
        self(query)
    }
}
