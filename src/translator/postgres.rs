use super::SqlTranslator;

/// PostgreSQL without any spatial extension
///
/// Geometry functions and `IN_UNIT` are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSqlTranslator;

impl PostgreSqlTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl SqlTranslator for PostgreSqlTranslator {}
