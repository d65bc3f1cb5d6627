//! Error code definitions for ADQL diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Syntax errors (unexpected token, reserved words)
//! - E03xx: Optional language feature errors
//! - E04xx: Coordinate system errors
//! - E05xx: Region errors (STC-S, DALI, geometry arguments)
//! - E06xx: Type mismatches
//! - E07xx: Identifier resolution errors
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for ADQL diagnostics
///
/// Each error code represents a specific category of error, enabling
/// filtering and stable assertions independent of the message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or non-ASCII character outside a string or comment
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated delimited identifier
    E0103,
    /// Invalid numeric literal (e.g. TOP value overflow)
    E0104,

    // =========================================================================
    // E02xx: Syntax errors
    // =========================================================================
    /// Unexpected token
    E0201,
    /// Unexpected end of query
    E0202,
    /// Wrong number of function parameters
    E0203,
    /// Invalid function definition
    E0204,

    // =========================================================================
    // E03xx: Optional language feature errors
    // =========================================================================
    /// Unsupported optional language feature
    E0301,

    // =========================================================================
    // E04xx: Coordinate system errors
    // =========================================================================
    /// Incorrect coordinate system syntax
    E0401,
    /// Cartesian flavor with a frame or reference position
    E0402,
    /// Coordinate system not allowed by the configured policy
    E0403,
    /// Coordinate system argument is not a string literal
    E0404,
    /// Invalid allowed-coordinate-system pattern
    E0405,

    // =========================================================================
    // E05xx: Region errors
    // =========================================================================
    /// Incorrect STC-S syntax
    E0501,
    /// Incorrect DALI syntax
    E0502,
    /// Unsupported region type
    E0503,
    /// Non-numeric region argument
    E0504,
    /// Non-string region argument
    E0505,
    /// Unsupported region serialization
    E0506,
    /// Unknown region type (not a shape function)
    E0507,
    /// Invalid region construction (e.g. too few polygon vertices)
    E0508,

    // =========================================================================
    // E06xx: Type mismatches
    // =========================================================================
    /// Numeric value expected
    E0601,
    /// String value expected
    E0602,
    /// Geometry value expected
    E0603,
    /// Incompatible operand types
    E0604,

    // =========================================================================
    // E07xx: Identifier resolution errors
    // =========================================================================
    /// Unknown table
    E0701,
    /// Unknown column
    E0702,
    /// Ambiguous column
    E0703,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Error raised by a custom query checker
    E0901,
    /// Internal error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexical
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            // Syntax
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            // Feature
            Self::E0301 => "E0301",
            // Coordinate system
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0405 => "E0405",
            // Region
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::E0504 => "E0504",
            Self::E0505 => "E0505",
            Self::E0506 => "E0506",
            Self::E0507 => "E0507",
            Self::E0508 => "E0508",
            // Types
            Self::E0601 => "E0601",
            Self::E0602 => "E0602",
            Self::E0603 => "E0603",
            Self::E0604 => "E0604",
            // Identifiers
            Self::E0701 => "E0701",
            Self::E0702 => "E0702",
            Self::E0703 => "E0703",
            // Generic
            Self::E0901 => "E0901",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 => "syntax error",
            Self::E0301 => "unsupported feature",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 | Self::E0405 => {
                "coordinate system error"
            }
            Self::E0501
            | Self::E0502
            | Self::E0503
            | Self::E0504
            | Self::E0505
            | Self::E0506
            | Self::E0507
            | Self::E0508 => "region error",
            Self::E0601 | Self::E0602 | Self::E0603 | Self::E0604 => "type mismatch",
            Self::E0701 | Self::E0702 | Self::E0703 => "unresolved identifier",
            Self::E0901 | Self::E0999 => "error",
        }
    }

    /// Get the default message for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0103 => "unterminated delimited identifier",
            Self::E0104 => "invalid numeric literal",
            Self::E0201 => "unexpected token",
            Self::E0202 => "unexpected end of query",
            Self::E0203 => "wrong number of parameters",
            Self::E0204 => "invalid function definition",
            Self::E0301 => "unsupported ADQL feature",
            Self::E0401 => "incorrect coordinate system",
            Self::E0402 => "cartesian coordinate system with a frame or reference position",
            Self::E0403 => "coordinate system not allowed",
            Self::E0404 => "coordinate system is not a string literal",
            Self::E0405 => "invalid coordinate system pattern",
            Self::E0501 => "incorrect STC-S region",
            Self::E0502 => "incorrect DALI region",
            Self::E0503 => "unsupported region type",
            Self::E0504 => "non numeric region argument",
            Self::E0505 => "non string region argument",
            Self::E0506 => "unsupported region serialization",
            Self::E0507 => "unknown region type",
            Self::E0508 => "invalid region",
            Self::E0601 => "numeric value expected",
            Self::E0602 => "string value expected",
            Self::E0603 => "geometry value expected",
            Self::E0604 => "incompatible types",
            Self::E0701 => "unknown table",
            Self::E0702 => "unknown column",
            Self::E0703 => "ambiguous column",
            Self::E0901 => "query check failed",
            Self::E0999 => "internal error",
        }
    }

    /// Errors raised while tokenizing or parsing (always fatal and single)
    pub fn is_syntactic(&self) -> bool {
        matches!(
            self,
            Self::E0101
                | Self::E0102
                | Self::E0103
                | Self::E0104
                | Self::E0201
                | Self::E0202
                | Self::E0203
                | Self::E0601
                | Self::E0602
                | Self::E0603
                | Self::E0604
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
