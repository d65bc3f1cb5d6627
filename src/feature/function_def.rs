//! User defined function declarations and the database types they use

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use crate::parser::{ErrorCode, ParseError};

/// Column, parameter and return types known to ADQL services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DbType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Binary(Option<u32>),
    VarBinary(Option<u32>),
    Char(Option<u32>),
    VarChar(Option<u32>),
    Blob,
    Clob,
    Timestamp,
    Point,
    Circle,
    Polygon,
    Region,
    Unknown,
}

impl DbType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SmallInt
                | Self::Integer
                | Self::BigInt
                | Self::Real
                | Self::Double
                | Self::Binary(_)
                | Self::VarBinary(_)
                | Self::Blob
                | Self::Unknown
        )
    }

    pub fn is_string(self) -> bool {
        matches!(
            self,
            Self::Char(_) | Self::VarChar(_) | Self::Clob | Self::Timestamp | Self::Unknown
        )
    }

    pub fn is_geometry(self) -> bool {
        matches!(
            self,
            Self::Point | Self::Circle | Self::Polygon | Self::Region | Self::Unknown
        )
    }
}

static TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([a-z][a-z ]*?)\s*(?:\(\s*([0-9]+)\s*\))?\s*$").expect("valid regex")
});

impl FromStr for DbType {
    type Err = ParseError;

    /// Parse a type name such as `DOUBLE`, `varchar(32)` or `INT`
    ///
    /// Unrecognised names give [`DbType::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = TYPE_PATTERN
            .captures(s)
            .ok_or_else(|| {
                ParseError::new(format!("Wrong type declaration: \"{s}\"!"), ErrorCode::E0204)
            })?;
        let name = captures[1].split_whitespace().collect::<Vec<_>>().join(" ");
        let length = captures.get(2).and_then(|m| m.as_str().parse::<u32>().ok());
        Ok(match name.to_ascii_uppercase().as_str() {
            "SMALLINT" => Self::SmallInt,
            "INTEGER" | "INT" => Self::Integer,
            "BIGINT" => Self::BigInt,
            "REAL" | "FLOAT" => Self::Real,
            "DOUBLE" | "DOUBLE PRECISION" => Self::Double,
            "BINARY" => Self::Binary(length),
            "VARBINARY" => Self::VarBinary(length),
            "CHAR" | "CHARACTER" => Self::Char(length),
            "VARCHAR" | "CHARACTER VARYING" | "STRING" => Self::VarChar(length),
            "BLOB" => Self::Blob,
            "CLOB" => Self::Clob,
            "TIMESTAMP" => Self::Timestamp,
            "POINT" => Self::Point,
            "CIRCLE" => Self::Circle,
            "POLYGON" => Self::Polygon,
            "REGION" => Self::Region,
            _ => Self::Unknown,
        })
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, length) = match self {
            Self::SmallInt => ("SMALLINT", None),
            Self::Integer => ("INTEGER", None),
            Self::BigInt => ("BIGINT", None),
            Self::Real => ("REAL", None),
            Self::Double => ("DOUBLE", None),
            Self::Binary(n) => ("BINARY", *n),
            Self::VarBinary(n) => ("VARBINARY", *n),
            Self::Char(n) => ("CHAR", *n),
            Self::VarChar(n) => ("VARCHAR", *n),
            Self::Blob => ("BLOB", None),
            Self::Clob => ("CLOB", None),
            Self::Timestamp => ("TIMESTAMP", None),
            Self::Point => ("POINT", None),
            Self::Circle => ("CIRCLE", None),
            Self::Polygon => ("POLYGON", None),
            Self::Region => ("REGION", None),
            Self::Unknown => ("UNKNOWN", None),
        };
        f.write_str(name)?;
        if let Some(length) = length {
            write!(f, "({length})")?;
        }
        Ok(())
    }
}

/// One parameter of a [`FunctionDef`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionParam {
    pub name: SmolStr,
    /// `None` when only the call site is known
    pub param_type: Option<DbType>,
}

/// Declaration of a user defined function
///
/// Written as `name(param TYPE, ...) -> RETURN_TYPE`, the return type
/// being optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDef {
    pub name: SmolStr,
    pub params: Vec<FunctionParam>,
    pub return_type: Option<DbType>,
    pub description: Option<String>,
}

const DEFINITION_SYNTAX: &str = "\"<regular_identifier>(<parameters>?) (-> <return_type>)?\", where <parameters>=\"(<regular_identifier> <type_name> (, <regular_identifier> <type_name>)*)\"";

static DEFINITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([a-zA-Z][a-zA-Z0-9_]*)\s*\((.*?)\)\s*(?:->\s*(\S.*?))?\s*$")
        .expect("valid regex")
});

static PARAM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*([a-zA-Z][a-zA-Z0-9_]*)\s+(\S.*?)\s*$").expect("valid regex")
});

impl FunctionDef {
    pub fn new(name: impl Into<SmolStr>, params: Vec<FunctionParam>) -> Self {
        Self {
            name: name.into(),
            params,
            return_type: None,
            description: None,
        }
    }

    pub fn with_return_type(mut self, return_type: DbType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Untyped definition matching a call of `name` with `nb_params` arguments
    pub fn from_call(name: &str, nb_params: usize) -> Self {
        let params = (1..=nb_params)
            .map(|i| FunctionParam {
                name: SmolStr::new(format!("param{i}")),
                param_type: None,
            })
            .collect();
        Self::new(name, params)
    }

    /// Parse a declaration like `gavo_match(pattern VARCHAR, str VARCHAR) -> INTEGER`
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let wrong_syntax = || {
            ParseError::new(
                format!(
                    "Wrong function definition syntax: \"{text}\"! Expected syntax: {DEFINITION_SYNTAX}."
                ),
                ErrorCode::E0204,
            )
        };

        let captures = DEFINITION_PATTERN
            .captures(text)
            .ok_or_else(wrong_syntax)?;

        let mut params = Vec::new();
        let params_text = captures[2].trim();
        if !params_text.is_empty() {
            for param in params_text.split(',') {
                let param_captures = PARAM_PATTERN
                    .captures(param)
                    .ok_or_else(|| {
                        ParseError::new(
                            format!(
                                "Wrong parameter definition syntax: \"{}\"! Expected syntax: \"<regular_identifier> <type_name>\".",
                                param.trim()
                            ),
                            ErrorCode::E0204,
                        )
                    })?;
                params.push(FunctionParam {
                    name: SmolStr::new(&param_captures[1]),
                    param_type: Some(param_captures[2].parse()?),
                });
            }
        }

        let mut definition = Self::new(&captures[1], params);
        if let Some(return_type) = captures.get(3) {
            definition.return_type = Some(return_type.as_str().parse()?);
        }
        Ok(definition)
    }

    pub fn nb_params(&self) -> usize {
        self.params.len()
    }

    /// Whether a call `name(...)` with `nb_args` arguments refers to this function
    pub fn matches_call(&self, name: &str, nb_args: usize) -> bool {
        self.name.eq_ignore_ascii_case(name) && self.params.len() == nb_args
    }

    pub fn is_numeric(&self) -> bool {
        self.return_type.is_none_or(DbType::is_numeric)
    }

    pub fn is_string(&self) -> bool {
        self.return_type.is_none_or(DbType::is_string)
    }

    pub fn is_geometry(&self) -> bool {
        self.return_type.is_none_or(DbType::is_geometry)
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&param.name)?;
            if let Some(param_type) = param.param_type {
                write!(f, " {param_type}")?;
            }
        }
        f.write_str(")")?;
        if let Some(return_type) = self.return_type {
            write!(f, " -> {return_type}")?;
        }
        Ok(())
    }
}
