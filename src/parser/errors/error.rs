//! The ADQL diagnostic type
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - Line/column span of the offending construct
//! - Hints/suggestions for fixes

use super::codes::ErrorCode;
use crate::base::TextPosition;

/// An error detected while tokenizing, parsing or checking a query
///
/// The `Display` form is the message followed by the hint, if any, so
/// that each error can be rendered standalone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", hint_suffix(.hint))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location, when the error relates to a part of the query
    pub position: Option<TextPosition>,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(" {hint}"),
        None => String::new(),
    }
}

impl ParseError {
    /// Create a new error without position
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            position: None,
            code,
            hint: None,
        }
    }

    /// Create a new error at a given position
    pub fn at(message: impl Into<String>, position: Option<TextPosition>, code: ErrorCode) -> Self {
        Self {
            position,
            ..Self::new(message, code)
        }
    }

    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> ParseErrorBuilder {
        ParseErrorBuilder::new(code)
    }

    pub fn with_position(mut self, position: TextPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the position only if none is known yet
    pub fn or_position(mut self, position: Option<TextPosition>) -> Self {
        if self.position.is_none() {
            self.position = position;
        }
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// Line of the beginning of the error (1-based)
    pub fn line(&self) -> Option<u32> {
        self.position.map(|p| p.begin_line)
    }

    /// Column of the beginning of the error (1-based)
    pub fn column(&self) -> Option<u32> {
        self.position.map(|p| p.begin_column)
    }

    /// Format the error with its code and position, for logs
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}", self.code, self.message);
        if let Some(position) = self.position {
            result.push_str(&format!(" {position}"));
        }
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {hint}"));
        }
        result
    }
}

/// Builder for creating parse errors
pub struct ParseErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    position: Option<TextPosition>,
    hint: Option<String>,
}

impl ParseErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            position: None,
            hint: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn position(mut self, position: Option<TextPosition>) -> Self {
        self.position = position;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the error, falling back on the code's default message
    pub fn build(self) -> ParseError {
        ParseError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            position: self.position,
            code: self.code,
            hint: self.hint,
        }
    }
}
