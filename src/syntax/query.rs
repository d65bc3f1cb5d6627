//! Queries: SELECT, set operations and common table expressions

use std::fmt;

use super::function::join;
use super::{Constraint, FromItem, Identifier, Operand, TableName};
use crate::base::TextPosition;
use crate::feature::{FeatureType, LanguageFeature};

/// A complete query: optional common table expressions plus a body
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    pub with: Vec<WithItem>,
    pub body: QueryBody,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryBody {
    Select(Box<SelectQuery>),
    Set(Box<SetOperation>),
}

/// `name [(columns)] AS (query)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithItem {
    pub name: Identifier,
    pub columns: Vec<Identifier>,
    pub query: Box<Query>,
    pub position: Option<TextPosition>,
}

/// `SELECT ... FROM ... [WHERE] [GROUP BY] [HAVING] [ORDER BY] [OFFSET]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectQuery {
    pub select: SelectClause,
    pub from: Vec<FromItem>,
    pub where_clause: Option<Constraint>,
    pub group_by: Vec<Operand>,
    pub having: Option<Constraint>,
    pub order_by: Vec<OrderItem>,
    pub offset: Option<Offset>,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectClause {
    pub distinct: bool,
    pub top: Option<u64>,
    pub items: Vec<SelectItem>,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectItem {
    /// `*`
    All { position: Option<TextPosition> },
    /// `table.*`
    AllOf {
        table: TableName,
        position: Option<TextPosition>,
    },
    Expr {
        operand: Operand,
        alias: Option<Identifier>,
    },
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderItem {
    /// Column, select-list index (unsigned integer) or value expression
    pub expr: Operand,
    pub descending: bool,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub value: u64,
    pub position: Option<TextPosition>,
}

/// `left UNION|INTERSECT|EXCEPT [ALL] right`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOperation {
    pub left: QueryBody,
    pub op: SetOperator,
    pub all: bool,
    pub right: QueryBody,
    pub order_by: Vec<OrderItem>,
    pub offset: Option<Offset>,
    pub position: Option<TextPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
}

impl SetOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

impl Query {
    pub fn select(select: SelectQuery) -> Self {
        Self {
            with: Vec::new(),
            position: select.position,
            body: QueryBody::Select(Box::new(select)),
        }
    }

    /// The SELECT query, if this query is not a set operation
    pub fn as_select(&self) -> Option<&SelectQuery> {
        match &self.body {
            QueryBody::Select(select) => Some(select),
            QueryBody::Set(_) => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectQuery> {
        match &mut self.body {
            QueryBody::Select(select) => Some(select),
            QueryBody::Set(_) => None,
        }
    }

    pub fn as_set_operation(&self) -> Option<&SetOperation> {
        match &self.body {
            QueryBody::Set(set) => Some(set),
            QueryBody::Select(_) => None,
        }
    }

    /// Select clause of the first SELECT, which names the result columns
    pub fn result_select(&self) -> &SelectClause {
        &self.body.first_select().select
    }
}

impl QueryBody {
    /// Leftmost SELECT of the body
    pub fn first_select(&self) -> &SelectQuery {
        match self {
            Self::Select(select) => select,
            Self::Set(set) => set.left.first_select(),
        }
    }

    pub fn position(&self) -> Option<TextPosition> {
        match self {
            Self::Select(select) => select.position,
            Self::Set(set) => set.position,
        }
    }
}

impl WithItem {
    pub fn feature(&self) -> LanguageFeature {
        LanguageFeature::standard(FeatureType::AdqlCommonTable, "WITH")
    }
}

impl Offset {
    pub fn feature(&self) -> LanguageFeature {
        LanguageFeature::standard(FeatureType::AdqlOffset, "OFFSET")
    }
}

impl SetOperation {
    /// Whether duplicated rows are kept (`ALL`)
    pub fn is_with_duplicates(&self) -> bool {
        self.all
    }

    pub fn feature(&self) -> LanguageFeature {
        LanguageFeature::standard(FeatureType::AdqlSets, self.op.keyword())
    }
}

impl SelectItem {
    pub fn position(&self) -> Option<TextPosition> {
        match self {
            Self::All { position } | Self::AllOf { position, .. } => *position,
            Self::Expr { operand, .. } => operand.position,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.with.is_empty() {
            writeln!(f, "WITH {}", join(&self.with))?;
        }
        write!(f, "{}", self.body)
    }
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Set(set) => write!(f, "{set}"),
        }
    }
}

impl fmt::Display for WithItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, "({})", join(&self.columns))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

fn write_tail(
    f: &mut fmt::Formatter<'_>,
    order_by: &[OrderItem],
    offset: &Option<Offset>,
) -> fmt::Result {
    if !order_by.is_empty() {
        write!(f, "\nORDER BY {}", join(order_by))?;
    }
    if let Some(offset) = offset {
        write!(f, "\nOFFSET {}", offset.value)?;
    }
    Ok(())
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.select)?;
        write!(f, "\nFROM {}", join(&self.from))?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, "\nWHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, "\nGROUP BY {}", join(&self.group_by))?;
        }
        if let Some(having) = &self.having {
            write!(f, "\nHAVING {having}")?;
        }
        write_tail(f, &self.order_by, &self.offset)
    }
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if let Some(top) = self.top {
            write!(f, "TOP {top} ")?;
        }
        f.write_str(&join(&self.items))
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All { .. } => f.write_str("*"),
            Self::AllOf { table, .. } => write!(f, "{table}.*"),
            Self::Expr { operand, alias } => {
                write!(f, "{operand}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if self.descending {
            f.write_str(" DESC")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.left, self.op.keyword())?;
        if self.all {
            f.write_str(" ALL")?;
        }
        write!(f, "\n{}", self.right)?;
        write_tail(f, &self.order_by, &self.offset)
    }
}
