//! Aggregate of the errors found by the semantic passes

use std::fmt;

use crate::parser::ParseError;

/// All the semantic errors of one query, in document order
///
/// Each sub-error is self-contained and can be rendered on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnresolvedIdentifiersError {
    errors: Vec<ParseError>,
}

impl UnresolvedIdentifiersError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.errors.iter()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// `Ok(())` when no error was collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for UnresolvedIdentifiersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unresolved identifiers!", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl From<ParseError> for UnresolvedIdentifiersError {
    fn from(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ParseError> for UnresolvedIdentifiersError {
    fn from_iter<I: IntoIterator<Item = ParseError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl Extend<ParseError> for UnresolvedIdentifiersError {
    fn extend<I: IntoIterator<Item = ParseError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for UnresolvedIdentifiersError {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a UnresolvedIdentifiersError {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorCode;

    #[test]
    fn test_display_lists_every_error() {
        let errors: UnresolvedIdentifiersError = [
            ParseError::new("Unknown table \"foo\"!", ErrorCode::E0701),
            ParseError::new("Unknown column \"bar\"!", ErrorCode::E0702),
        ]
        .into_iter()
        .collect();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "2 unresolved identifiers!\n  - Unknown table \"foo\"!\n  - Unknown column \"bar\"!"
        );
    }

    #[test]
    fn test_into_result() {
        assert!(UnresolvedIdentifiersError::new().into_result().is_ok());
        let single = UnresolvedIdentifiersError::from(ParseError::new("x", ErrorCode::E0999));
        assert_eq!(single.into_result().unwrap_err().len(), 1);
    }
}
