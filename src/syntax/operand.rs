//! Value expressions (operands)

use std::fmt;

use smol_str::SmolStr;

use super::{ColumnRef, Function, GeometryFunction};
use crate::base::TextPosition;
use crate::feature::LanguageFeature;

/// A value expression with its position in the query
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Operand {
    pub kind: OperandKind,
    pub position: Option<TextPosition>,
}

/// All kinds of value expressions
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandKind {
    /// Unsigned numeric literal, as written (`42`, `.5`, `1e-3`)
    Numeric(SmolStr),
    /// String literal value (quotes removed, `''` unescaped)
    String(SmolStr),
    Column(ColumnRef),
    Negative(Box<Operand>),
    Operation {
        left: Box<Operand>,
        op: ArithOp,
        right: Box<Operand>,
    },
    /// `a || b || c`
    Concatenation(Vec<Operand>),
    /// Parenthesised expression
    Wrapped(Box<Operand>),
    Function(Box<Function>),
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl Operand {
    pub fn new(kind: OperandKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<TextPosition>) -> Self {
        self.position = position;
        self
    }

    pub fn numeric(text: impl Into<SmolStr>) -> Self {
        Self::new(OperandKind::Numeric(text.into()))
    }

    pub fn string(value: impl Into<SmolStr>) -> Self {
        Self::new(OperandKind::String(value.into()))
    }

    pub fn column(column: ColumnRef) -> Self {
        Self::new(OperandKind::Column(column))
    }

    pub fn function(function: Function) -> Self {
        Self::new(OperandKind::Function(Box::new(function)))
    }

    pub fn is_numeric(&self) -> bool {
        match &self.kind {
            OperandKind::Numeric(_)
            | OperandKind::Negative(_)
            | OperandKind::Operation { .. }
            | OperandKind::Column(_) => true,
            OperandKind::String(_) | OperandKind::Concatenation(_) => false,
            OperandKind::Wrapped(inner) => inner.is_numeric(),
            OperandKind::Function(function) => function.is_numeric(),
        }
    }

    pub fn is_string(&self) -> bool {
        match &self.kind {
            OperandKind::String(_) | OperandKind::Concatenation(_) | OperandKind::Column(_) => {
                true
            }
            OperandKind::Numeric(_) | OperandKind::Negative(_) | OperandKind::Operation { .. } => {
                false
            }
            OperandKind::Wrapped(inner) => inner.is_string(),
            OperandKind::Function(function) => function.is_string(),
        }
    }

    pub fn is_geometry(&self) -> bool {
        match &self.kind {
            OperandKind::Column(_) => true,
            OperandKind::Wrapped(inner) => inner.is_geometry(),
            OperandKind::Function(function) => function.is_geometry(),
            _ => false,
        }
    }

    /// Value of a string literal
    pub fn as_string_literal(&self) -> Option<&str> {
        match &self.kind {
            OperandKind::String(value) => Some(value),
            _ => None,
        }
    }

    /// Value of a numeric literal, possibly negated
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            OperandKind::Numeric(text) => text.parse().ok(),
            OperandKind::Negative(inner) => inner.as_number().map(|n| -n),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnRef> {
        match &self.kind {
            OperandKind::Column(column) => Some(column),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match &self.kind {
            OperandKind::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_geometry(&self) -> Option<&GeometryFunction> {
        match self.as_function()? {
            Function::Geometry(geometry) => Some(geometry),
            _ => None,
        }
    }

    /// The optional language feature this operand requires, if any
    ///
    /// Only the operand itself is considered, not its children.
    pub fn feature(&self) -> Option<LanguageFeature> {
        self.as_function().and_then(Function::feature)
    }

    /// Direct children, in source order
    pub fn children(&self) -> Vec<&Operand> {
        match &self.kind {
            OperandKind::Numeric(_) | OperandKind::String(_) | OperandKind::Column(_) => vec![],
            OperandKind::Negative(inner) | OperandKind::Wrapped(inner) => vec![&**inner],
            OperandKind::Operation { left, right, .. } => vec![&**left, &**right],
            OperandKind::Concatenation(parts) => parts.iter().collect(),
            OperandKind::Function(function) => function.args(),
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut Operand> {
        match &mut self.kind {
            OperandKind::Numeric(_) | OperandKind::String(_) | OperandKind::Column(_) => vec![],
            OperandKind::Negative(inner) | OperandKind::Wrapped(inner) => vec![&mut **inner],
            OperandKind::Operation { left, right, .. } => vec![&mut **left, &mut **right],
            OperandKind::Concatenation(parts) => parts.iter_mut().collect(),
            OperandKind::Function(function) => function.args_mut(),
        }
    }
}

/// Quote a string value as an ADQL literal
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OperandKind::Numeric(text) => f.write_str(text),
            OperandKind::String(value) => f.write_str(&quote_string(value)),
            OperandKind::Column(column) => write!(f, "{column}"),
            OperandKind::Negative(inner) => {
                // `--` would start a comment
                let inner = inner.to_string();
                if inner.starts_with('-') {
                    write!(f, "- {inner}")
                } else {
                    write!(f, "-{inner}")
                }
            }
            OperandKind::Operation { left, op, right } => {
                write!(f, "{left} {} {right}", op.symbol())
            }
            OperandKind::Concatenation(parts) => {
                let parts: Vec<String> = parts.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(" || "))
            }
            OperandKind::Wrapped(inner) => write!(f, "({inner})"),
            OperandKind::Function(function) => write!(f, "{function}"),
        }
    }
}
