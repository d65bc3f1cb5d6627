//! Table and column resolution against database metadata
//!
//! Every SELECT opens a scope made of the relations of its FROM clause:
//! database tables, common table expressions and aliased subqueries.
//! Column references are searched in the innermost scope first, then in
//! the enclosing ones (correlated subqueries). `ORDER BY` and `GROUP BY`
//! may also name the columns of the select list.

use smol_str::SmolStr;

use super::{QueryChecker, UnresolvedIdentifiersError};
use crate::base::TextPosition;
use crate::feature::DbType;
use crate::parser::{ErrorCode, ParseError};
use crate::syntax::visitor::walk_operand;
use crate::syntax::{
    ColumnRef, FromItem, Identifier, JoinCondition, Operand, Query, QueryBody,
    SelectItem, SelectQuery, TableName, Visitor,
};

/// A column of a database table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DbColumn {
    pub name: SmolStr,
    pub datatype: Option<DbType>,
}

impl DbColumn {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            datatype: None,
        }
    }

    pub fn with_type(mut self, datatype: DbType) -> Self {
        self.datatype = Some(datatype);
        self
    }
}

/// A table of the database, as published by the service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DbTable {
    pub catalog: Option<SmolStr>,
    pub schema: Option<SmolStr>,
    pub name: SmolStr,
    pub columns: Vec<DbColumn>,
}

impl DbTable {
    pub fn new(schema: Option<&str>, name: impl Into<SmolStr>) -> Self {
        Self {
            catalog: None,
            schema: schema.map(SmolStr::new),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: impl Into<SmolStr>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_column(mut self, column: DbColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add untyped columns
    pub fn with_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.columns.extend(names.into_iter().map(DbColumn::new));
        self
    }

    /// Whether a table name written in a query designates this table
    ///
    /// Regular identifiers compare case-insensitively, delimited ones
    /// exactly. Parts left out of the written name are not compared.
    pub fn matches(&self, written: &TableName) -> bool {
        let part = |written: &Option<Identifier>, actual: &Option<SmolStr>| match (written, actual) {
            (None, _) => true,
            (Some(written), Some(actual)) => written.matches_name(actual, true),
            (Some(_), None) => false,
        };
        written.table.matches_name(&self.name, true)
            && part(&written.schema, &self.schema)
            && part(&written.catalog, &self.catalog)
    }

    pub fn column(&self, name: &Identifier) -> Option<&DbColumn> {
        self.columns.iter().find(|c| name.matches_name(&c.name, true))
    }

    fn table_name(&self) -> TableName {
        TableName {
            catalog: self.catalog.clone().map(Identifier::regular),
            schema: self.schema.clone().map(Identifier::regular),
            table: Identifier::regular(self.name.clone()),
        }
    }
}

/// Provider of the tables a query may use
pub trait DbMetadata {
    fn tables(&self) -> &[DbTable];

    /// Tables a name written in a query may designate
    fn find_tables(&self, name: &TableName) -> Vec<&DbTable> {
        self.tables().iter().filter(|t| t.matches(name)).collect()
    }
}

impl DbMetadata for Vec<DbTable> {
    fn tables(&self) -> &[DbTable] {
        self
    }
}

impl DbMetadata for [DbTable] {
    fn tables(&self) -> &[DbTable] {
        self
    }
}

/// [`QueryChecker`] resolving every table and column of a query
#[derive(Debug, Clone)]
pub struct DbChecker<M = Vec<DbTable>> {
    metadata: M,
}

impl<M: DbMetadata> DbChecker<M> {
    pub fn new(metadata: M) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// All the resolution errors of a query, in document order
    pub fn resolve(&self, query: &Query) -> Vec<ParseError> {
        let mut resolver = Resolver {
            metadata: &self.metadata,
            errors: Vec::new(),
        };
        resolver.query(query, &[], &[]);
        let mut errors = resolver.errors;
        errors.sort_by_key(|e| (e.position.is_none(), e.position));
        errors
    }
}

impl<M: DbMetadata + Send + Sync> QueryChecker for DbChecker<M> {
    fn check(&self, query: &Query) -> Result<(), UnresolvedIdentifiersError> {
        let errors = self.resolve(query);
        tracing::trace!(errors = errors.len(), "resolved tables and columns");
        errors.into_iter().collect::<UnresolvedIdentifiersError>().into_result()
    }
}

/// A table as seen from a query: its exposed name and its columns
#[derive(Debug, Clone)]
struct Relation {
    name: TableName,
    columns: Vec<Identifier>,
}

impl Relation {
    fn has_column(&self, column: &Identifier) -> bool {
        self.columns.iter().any(|c| c.matches(column))
    }
}

type Scope = Vec<Relation>;

struct Resolver<'m, M: ?Sized> {
    metadata: &'m M,
    errors: Vec<ParseError>,
}

impl<M: DbMetadata + ?Sized> Resolver<'_, M> {
    /// Resolve a query and return the names of its result columns
    fn query(&mut self, query: &Query, ctes: &[Relation], outer: &[&Scope]) -> Vec<Identifier> {
        let mut visible = ctes.to_vec();
        for item in &query.with {
            let columns = self.query(&item.query, &visible, outer);
            visible.push(Relation {
                name: TableName::new(item.name.clone()),
                columns: if item.columns.is_empty() {
                    columns
                } else {
                    item.columns.clone()
                },
            });
        }
        self.body(&query.body, &visible, outer)
    }

    fn body(&mut self, body: &QueryBody, ctes: &[Relation], outer: &[&Scope]) -> Vec<Identifier> {
        match body {
            QueryBody::Select(select) => self.select(select, ctes, outer),
            QueryBody::Set(set) => {
                let columns = self.body(&set.left, ctes, outer);
                self.body(&set.right, ctes, outer);
                let mut refs = References::default();
                for item in &set.order_by {
                    refs.visit_operand(&item.expr);
                }
                self.references(refs, ctes, &[], &columns);
                columns
            }
        }
    }

    fn select(&mut self, select: &SelectQuery, ctes: &[Relation], outer: &[&Scope]) -> Vec<Identifier> {
        let mut scope = Scope::new();
        for item in &select.from {
            self.from_item(item, ctes, outer, &mut scope);
        }

        let mut scopes = vec![&scope];
        scopes.extend_from_slice(outer);

        let mut refs = References::default();
        for item in &select.from {
            for condition in join_conditions(item) {
                match condition {
                    JoinCondition::On(constraint) => refs.visit_constraint(constraint),
                    JoinCondition::Using(columns) => {
                        for column in columns {
                            if !scope.iter().any(|r| r.has_column(column)) {
                                self.errors.push(unknown_column(&ColumnRef::new(column.clone()), None));
                            }
                        }
                    }
                }
            }
        }
        for item in &select.select.items {
            match item {
                SelectItem::Expr { operand, .. } => refs.visit_operand(operand),
                SelectItem::AllOf { table, position } => {
                    if !scope.iter().any(|r| r.name.matches(table)) {
                        self.errors.push(unknown_table(table, *position));
                    }
                }
                SelectItem::All { .. } => {}
            }
        }
        if let Some(constraint) = &select.where_clause {
            refs.visit_constraint(constraint);
        }
        if let Some(constraint) = &select.having {
            refs.visit_constraint(constraint);
        }
        self.references(refs, ctes, &scopes, &[]);

        let columns = output_columns(select, &scope);

        let mut refs = References::default();
        for operand in &select.group_by {
            refs.visit_operand(operand);
        }
        for item in &select.order_by {
            refs.visit_operand(&item.expr);
        }
        self.references(refs, ctes, &scopes, &columns);

        columns
    }

    fn from_item(&mut self, item: &FromItem, ctes: &[Relation], outer: &[&Scope], scope: &mut Scope) {
        match item {
            FromItem::Table {
                name,
                alias,
                position,
            } => {
                if let Some(mut relation) = self.table(name, ctes, *position) {
                    if let Some(alias) = alias {
                        relation.name = TableName::new(alias.clone());
                    }
                    scope.push(relation);
                }
            }
            FromItem::Subquery { query, alias, .. } => {
                let columns = self.query(query, ctes, outer);
                scope.push(Relation {
                    name: TableName::new(alias.clone()),
                    columns,
                });
            }
            FromItem::Join(join) => {
                self.from_item(&join.left, ctes, outer, scope);
                self.from_item(&join.right, ctes, outer, scope);
            }
        }
    }

    /// Common table expression or database table designated by `name`
    fn table(
        &mut self,
        name: &TableName,
        ctes: &[Relation],
        position: Option<TextPosition>,
    ) -> Option<Relation> {
        if name.schema.is_none() && name.catalog.is_none() {
            if let Some(cte) = ctes.iter().rev().find(|c| c.name.table.matches(&name.table)) {
                return Some(cte.clone());
            }
        }
        match self.metadata.find_tables(name).as_slice() {
            [] => {
                self.errors.push(unknown_table(name, position));
                None
            }
            [table] => Some(Relation {
                name: table.table_name(),
                columns: table
                    .columns
                    .iter()
                    .map(|c| Identifier::regular(c.name.clone()))
                    .collect(),
            }),
            _ => {
                self.errors.push(ParseError::at(
                    format!("Ambiguous table name \"{name}\"!"),
                    position,
                    ErrorCode::E0703,
                ));
                None
            }
        }
    }

    fn references(
        &mut self,
        refs: References<'_>,
        ctes: &[Relation],
        scopes: &[&Scope],
        aliases: &[Identifier],
    ) {
        for operand in refs.columns {
            if let Some(column) = operand.as_column() {
                self.column(operand, column, scopes, aliases);
            }
        }
        for query in refs.subqueries {
            self.query(query, ctes, scopes);
        }
    }

    fn column(&mut self, operand: &Operand, column: &ColumnRef, scopes: &[&Scope], aliases: &[Identifier]) {
        match &column.table {
            Some(table) => {
                let relation = scopes
                    .iter()
                    .find_map(|scope| scope.iter().find(|r| r.name.matches(table)));
                match relation {
                    None => self.errors.push(unknown_table(table, operand.position)),
                    Some(relation) if !relation.has_column(&column.column) => {
                        self.errors.push(unknown_column(column, operand.position));
                    }
                    Some(_) => {}
                }
            }
            None => {
                for scope in scopes {
                    match scope.iter().filter(|r| r.has_column(&column.column)).count() {
                        0 => continue,
                        1 => return,
                        _ => {
                            self.errors.push(ParseError::at(
                                format!("Ambiguous column name \"{column}\"!"),
                                operand.position,
                                ErrorCode::E0703,
                            ));
                            return;
                        }
                    }
                }
                if !aliases.iter().any(|a| a.matches(&column.column)) {
                    self.errors.push(unknown_column(column, operand.position));
                }
            }
        }
    }
}

/// Column references and subqueries of a clause, subqueries not entered
#[derive(Default)]
struct References<'ast> {
    columns: Vec<&'ast Operand>,
    subqueries: Vec<&'ast Query>,
}

impl<'ast> Visitor<'ast> for References<'ast> {
    fn visit_query(&mut self, query: &'ast Query) {
        self.subqueries.push(query);
    }

    fn visit_operand(&mut self, operand: &'ast Operand) {
        if operand.as_column().is_some() {
            self.columns.push(operand);
        }
        walk_operand(self, operand);
    }
}

fn join_conditions(item: &FromItem) -> Vec<&JoinCondition> {
    match item {
        FromItem::Join(join) => {
            let mut conditions = join_conditions(&join.left);
            conditions.extend(join_conditions(&join.right));
            conditions.extend(join.condition.as_ref());
            conditions
        }
        _ => Vec::new(),
    }
}

/// Names of the columns returned by a SELECT
///
/// Unnamed expressions have no name and are left out.
fn output_columns(select: &SelectQuery, scope: &Scope) -> Vec<Identifier> {
    let mut columns = Vec::new();
    for item in &select.select.items {
        match item {
            SelectItem::All { .. } => {
                columns.extend(scope.iter().flat_map(|r| r.columns.iter().cloned()));
            }
            SelectItem::AllOf { table, .. } => {
                columns.extend(
                    scope
                        .iter()
                        .filter(|r| r.name.matches(table))
                        .flat_map(|r| r.columns.iter().cloned()),
                );
            }
            SelectItem::Expr {
                alias: Some(alias), ..
            } => columns.push(alias.clone()),
            SelectItem::Expr { operand, .. } => {
                if let Some(column) = operand.as_column() {
                    columns.push(column.column.clone());
                }
            }
        }
    }
    columns
}

fn unknown_table(name: &TableName, position: Option<TextPosition>) -> ParseError {
    ParseError::at(format!("Unknown table \"{name}\"!"), position, ErrorCode::E0701)
}

fn unknown_column(column: &ColumnRef, position: Option<TextPosition>) -> ParseError {
    ParseError::at(format!("Unknown column \"{column}\"!"), position, ErrorCode::E0702)
}
