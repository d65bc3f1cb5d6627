//! FROM clause content: tables, subqueries and joins

use std::fmt;

use super::{Constraint, Identifier, Query, TableName};
use crate::base::TextPosition;

/// One item of the FROM clause
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FromItem {
    Table {
        name: TableName,
        alias: Option<Identifier>,
        position: Option<TextPosition>,
    },
    Subquery {
        query: Box<Query>,
        alias: Identifier,
        position: Option<TextPosition>,
    },
    Join(Box<Join>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Join {
    pub left: FromItem,
    pub kind: JoinKind,
    pub natural: bool,
    pub right: FromItem,
    pub condition: Option<JoinCondition>,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::LeftOuter => "LEFT OUTER JOIN",
            Self::RightOuter => "RIGHT OUTER JOIN",
            Self::FullOuter => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JoinCondition {
    On(Constraint),
    Using(Vec<Identifier>),
}

impl FromItem {
    pub fn table(name: TableName, alias: Option<Identifier>) -> Self {
        Self::Table {
            name,
            alias,
            position: None,
        }
    }

    pub fn position(&self) -> Option<TextPosition> {
        match self {
            Self::Table { position, .. } | Self::Subquery { position, .. } => *position,
            Self::Join(join) => join.position,
        }
    }

    /// Name this item is referred to by in column qualifiers
    pub fn exposed_name(&self) -> Option<TableName> {
        match self {
            Self::Table { name, alias, .. } => Some(match alias {
                Some(alias) => TableName::new(alias.clone()),
                None => name.clone(),
            }),
            Self::Subquery { alias, .. } => Some(TableName::new(alias.clone())),
            Self::Join(_) => None,
        }
    }

    /// Tables and subqueries of this item, joins flattened, left first
    pub fn leaves(&self) -> Vec<&FromItem> {
        match self {
            Self::Join(join) => {
                let mut leaves = join.left.leaves();
                leaves.extend(join.right.leaves());
                leaves
            }
            leaf => vec![leaf],
        }
    }
}

impl fmt::Display for FromItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table { name, alias, .. } => {
                write!(f, "{name}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
            Self::Subquery { query, alias, .. } => write!(f, "({query}) AS {alias}"),
            Self::Join(join) => write!(f, "{join}"),
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.left)?;
        if self.natural {
            f.write_str("NATURAL ")?;
        }
        write!(f, "{} {}", self.kind.keyword(), self.right)?;
        match &self.condition {
            Some(JoinCondition::On(constraint)) => write!(f, " ON {constraint}"),
            Some(JoinCondition::Using(columns)) => {
                write!(f, " USING ({})", super::function::join(columns))
            }
            None => Ok(()),
        }
    }
}
