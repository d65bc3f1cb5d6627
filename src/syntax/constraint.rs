//! Search conditions (WHERE, HAVING, JOIN ... ON)

use std::fmt;

use super::{Operand, Query};
use crate::base::TextPosition;
use crate::feature::{FeatureType, LanguageFeature};

/// A search condition with its position in the query
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstraintKind {
    Comparison {
        left: Operand,
        op: ComparisonOp,
        right: Operand,
    },
    Between {
        value: Operand,
        low: Operand,
        high: Operand,
        negated: bool,
    },
    In {
        value: Operand,
        list: InList,
        negated: bool,
    },
    IsNull {
        value: Operand,
        negated: bool,
    },
    Exists(Box<Query>),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
    /// Parenthesised condition
    Group(Box<Constraint>),
}

/// Right side of an `IN` predicate
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InList {
    Values(Vec<Operand>),
    Subquery(Box<Query>),
}

/// Comparison operators, including pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    ILike,
    NotILike,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
        }
    }

    pub fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::NotLike | Self::ILike | Self::NotILike)
    }

    pub fn is_case_insensitive(self) -> bool {
        matches!(self, Self::ILike | Self::NotILike)
    }
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<TextPosition>) -> Self {
        self.position = position;
        self
    }

    pub fn comparison(left: Operand, op: ComparisonOp, right: Operand) -> Self {
        Self::new(ConstraintKind::Comparison { left, op, right })
    }

    /// The optional language feature this condition itself requires
    pub fn feature(&self) -> Option<LanguageFeature> {
        match &self.kind {
            ConstraintKind::Comparison { op, .. } if op.is_case_insensitive() => {
                Some(LanguageFeature::standard(FeatureType::AdqlString, "ILIKE"))
            }
            _ => None,
        }
    }

    /// Operands appearing directly in this condition (not in sub-conditions
    /// or subqueries), in source order
    pub fn operands(&self) -> Vec<&Operand> {
        match &self.kind {
            ConstraintKind::Comparison { left, right, .. } => vec![left, right],
            ConstraintKind::Between {
                value, low, high, ..
            } => vec![value, low, high],
            ConstraintKind::In { value, list, .. } => {
                let mut operands = vec![value];
                if let InList::Values(values) = list {
                    operands.extend(values);
                }
                operands
            }
            ConstraintKind::IsNull { value, .. } => vec![value],
            _ => vec![],
        }
    }

    pub fn operands_mut(&mut self) -> Vec<&mut Operand> {
        match &mut self.kind {
            ConstraintKind::Comparison { left, right, .. } => vec![left, right],
            ConstraintKind::Between {
                value, low, high, ..
            } => vec![value, low, high],
            ConstraintKind::In { value, list, .. } => {
                let mut operands = vec![value];
                if let InList::Values(values) = list {
                    operands.extend(values.iter_mut());
                }
                operands
            }
            ConstraintKind::IsNull { value, .. } => vec![value],
            _ => vec![],
        }
    }

    /// Direct sub-conditions
    pub fn children(&self) -> Vec<&Constraint> {
        match &self.kind {
            ConstraintKind::Not(inner) | ConstraintKind::Group(inner) => vec![&**inner],
            ConstraintKind::And(left, right) | ConstraintKind::Or(left, right) => {
                vec![&**left, &**right]
            }
            _ => vec![],
        }
    }

    /// Subqueries used directly by this condition
    pub fn subqueries(&self) -> Vec<&Query> {
        match &self.kind {
            ConstraintKind::Exists(query) => vec![&**query],
            ConstraintKind::In {
                list: InList::Subquery(query),
                ..
            } => vec![&**query],
            _ => vec![],
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let not = |negated: &bool| if *negated { "NOT " } else { "" };
        match &self.kind {
            ConstraintKind::Comparison { left, op, right } => {
                write!(f, "{left} {} {right}", op.symbol())
            }
            ConstraintKind::Between {
                value,
                low,
                high,
                negated,
            } => write!(f, "{value} {}BETWEEN {low} AND {high}", not(negated)),
            ConstraintKind::In {
                value,
                list,
                negated,
            } => match list {
                InList::Values(values) => {
                    write!(f, "{value} {}IN ({})", not(negated), super::function::join(values))
                }
                InList::Subquery(query) => write!(f, "{value} {}IN ({query})", not(negated)),
            },
            ConstraintKind::IsNull { value, negated } => {
                write!(f, "{value} IS {}NULL", not(negated))
            }
            ConstraintKind::Exists(query) => write!(f, "EXISTS({query})"),
            ConstraintKind::Not(inner) => write!(f, "NOT {inner}"),
            ConstraintKind::And(left, right) => write!(f, "{left} AND {right}"),
            ConstraintKind::Or(left, right) => write!(f, "{left} OR {right}"),
            ConstraintKind::Group(inner) => write!(f, "({inner})"),
        }
    }
}
