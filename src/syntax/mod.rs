//! Typed ADQL syntax tree
//!
//! Every syntactic category is a closed sum type (`OperandKind`,
//! `ConstraintKind`, `FromItem`, `Function`, `QueryBody`). Each node keeps
//! the position of its source text (when parsed) and prints itself back as
//! ADQL through `Display`.

mod constraint;
mod from;
mod function;
mod identifier;
mod operand;
mod query;
pub mod visitor;

pub use constraint::{ComparisonOp, Constraint, ConstraintKind, InList};
pub use from::{FromItem, Join, JoinCondition, JoinKind};
pub use function::{
    AggregateKind, CastType, Function, GeometryFunction, GeometryKind, MathKind,
};
pub use identifier::{ColumnRef, Identifier, TableName};
pub use operand::{ArithOp, Operand, OperandKind, quote_string};
pub use query::{
    Offset, OrderItem, Query, QueryBody, SelectClause, SelectItem, SelectQuery, SetOperation,
    SetOperator, WithItem,
};
pub use visitor::{
    Visitor, VisitorMut, Walk, replace_operands, search_constraints, search_operands,
};
