//! Visitor pattern for ADQL AST traversal.
//!
//! [`Visitor`] walks the tree by shared reference, [`VisitorMut`] by mutable
//! reference so that children can be replaced in place. Default method
//! implementations recurse into children through the `walk_*` functions;
//! override a method and call the matching `walk_*` to keep recursing.
//!
//! [`Walk`] lets the same visitors run on a whole query or on a single
//! clause (as returned by the clause-level parse entry points).

use super::{
    Constraint, FromItem, JoinCondition, Operand, Offset, OrderItem, Query, QueryBody,
    SelectClause, SelectItem, SelectQuery, SetOperation, WithItem,
};

/// Visitor trait for ADQL AST nodes (shared access)
pub trait Visitor<'ast> {
    fn visit_query(&mut self, query: &'ast Query) {
        walk_query(self, query);
    }

    fn visit_with_item(&mut self, item: &'ast WithItem) {
        self.visit_query(&item.query);
    }

    fn visit_set_operation(&mut self, set: &'ast SetOperation) {
        walk_set_operation(self, set);
    }

    fn visit_select(&mut self, select: &'ast SelectQuery) {
        walk_select(self, select);
    }

    fn visit_select_item(&mut self, item: &'ast SelectItem) {
        if let SelectItem::Expr { operand, .. } = item {
            self.visit_operand(operand);
        }
    }

    fn visit_from_item(&mut self, item: &'ast FromItem) {
        walk_from_item(self, item);
    }

    fn visit_constraint(&mut self, constraint: &'ast Constraint) {
        walk_constraint(self, constraint);
    }

    fn visit_order_item(&mut self, item: &'ast OrderItem) {
        self.visit_operand(&item.expr);
    }

    fn visit_offset(&mut self, _offset: &'ast Offset) {}

    fn visit_operand(&mut self, operand: &'ast Operand) {
        walk_operand(self, operand);
    }
}

pub fn walk_query<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, query: &'ast Query) {
    for item in &query.with {
        v.visit_with_item(item);
    }
    walk_body(v, &query.body);
}

pub fn walk_body<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, body: &'ast QueryBody) {
    match body {
        QueryBody::Select(select) => v.visit_select(select),
        QueryBody::Set(set) => v.visit_set_operation(set),
    }
}

pub fn walk_set_operation<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, set: &'ast SetOperation) {
    walk_body(v, &set.left);
    walk_body(v, &set.right);
    for item in &set.order_by {
        v.visit_order_item(item);
    }
    if let Some(offset) = &set.offset {
        v.visit_offset(offset);
    }
}

pub fn walk_select_clause<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, clause: &'ast SelectClause) {
    for item in &clause.items {
        v.visit_select_item(item);
    }
}

pub fn walk_select<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, select: &'ast SelectQuery) {
    walk_select_clause(v, &select.select);
    for item in &select.from {
        v.visit_from_item(item);
    }
    if let Some(constraint) = &select.where_clause {
        v.visit_constraint(constraint);
    }
    for operand in &select.group_by {
        v.visit_operand(operand);
    }
    if let Some(constraint) = &select.having {
        v.visit_constraint(constraint);
    }
    for item in &select.order_by {
        v.visit_order_item(item);
    }
    if let Some(offset) = &select.offset {
        v.visit_offset(offset);
    }
}

pub fn walk_from_item<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, item: &'ast FromItem) {
    match item {
        FromItem::Table { .. } => {}
        FromItem::Subquery { query, .. } => v.visit_query(query),
        FromItem::Join(join) => {
            v.visit_from_item(&join.left);
            v.visit_from_item(&join.right);
            if let Some(JoinCondition::On(constraint)) = &join.condition {
                v.visit_constraint(constraint);
            }
        }
    }
}

pub fn walk_constraint<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, constraint: &'ast Constraint) {
    for operand in constraint.operands() {
        v.visit_operand(operand);
    }
    for child in constraint.children() {
        v.visit_constraint(child);
    }
    for query in constraint.subqueries() {
        v.visit_query(query);
    }
}

pub fn walk_operand<'ast, V: Visitor<'ast> + ?Sized>(v: &mut V, operand: &'ast Operand) {
    for child in operand.children() {
        v.visit_operand(child);
    }
}

/// Visitor trait for ADQL AST nodes (mutable access)
pub trait VisitorMut {
    fn visit_query_mut(&mut self, query: &mut Query) {
        walk_query_mut(self, query);
    }

    fn visit_select_mut(&mut self, select: &mut SelectQuery) {
        walk_select_mut(self, select);
    }

    fn visit_from_item_mut(&mut self, item: &mut FromItem) {
        walk_from_item_mut(self, item);
    }

    fn visit_constraint_mut(&mut self, constraint: &mut Constraint) {
        walk_constraint_mut(self, constraint);
    }

    fn visit_operand_mut(&mut self, operand: &mut Operand) {
        walk_operand_mut(self, operand);
    }
}

pub fn walk_query_mut<V: VisitorMut + ?Sized>(v: &mut V, query: &mut Query) {
    for item in &mut query.with {
        v.visit_query_mut(&mut item.query);
    }
    walk_body_mut(v, &mut query.body);
}

pub fn walk_body_mut<V: VisitorMut + ?Sized>(v: &mut V, body: &mut QueryBody) {
    match body {
        QueryBody::Select(select) => v.visit_select_mut(select),
        QueryBody::Set(set) => {
            walk_body_mut(v, &mut set.left);
            walk_body_mut(v, &mut set.right);
            for item in &mut set.order_by {
                v.visit_operand_mut(&mut item.expr);
            }
        }
    }
}

pub fn walk_select_clause_mut<V: VisitorMut + ?Sized>(v: &mut V, clause: &mut SelectClause) {
    for item in &mut clause.items {
        if let SelectItem::Expr { operand, .. } = item {
            v.visit_operand_mut(operand);
        }
    }
}

pub fn walk_select_mut<V: VisitorMut + ?Sized>(v: &mut V, select: &mut SelectQuery) {
    walk_select_clause_mut(v, &mut select.select);
    for item in &mut select.from {
        v.visit_from_item_mut(item);
    }
    if let Some(constraint) = &mut select.where_clause {
        v.visit_constraint_mut(constraint);
    }
    for operand in &mut select.group_by {
        v.visit_operand_mut(operand);
    }
    if let Some(constraint) = &mut select.having {
        v.visit_constraint_mut(constraint);
    }
    for item in &mut select.order_by {
        v.visit_operand_mut(&mut item.expr);
    }
}

pub fn walk_from_item_mut<V: VisitorMut + ?Sized>(v: &mut V, item: &mut FromItem) {
    match item {
        FromItem::Table { .. } => {}
        FromItem::Subquery { query, .. } => v.visit_query_mut(query),
        FromItem::Join(join) => {
            v.visit_from_item_mut(&mut join.left);
            v.visit_from_item_mut(&mut join.right);
            if let Some(JoinCondition::On(constraint)) = &mut join.condition {
                v.visit_constraint_mut(constraint);
            }
        }
    }
}

pub fn walk_constraint_mut<V: VisitorMut + ?Sized>(v: &mut V, constraint: &mut Constraint) {
    use super::{ConstraintKind, InList};

    for operand in constraint.operands_mut() {
        v.visit_operand_mut(operand);
    }
    match &mut constraint.kind {
        ConstraintKind::Not(inner) | ConstraintKind::Group(inner) => v.visit_constraint_mut(inner),
        ConstraintKind::And(left, right) | ConstraintKind::Or(left, right) => {
            v.visit_constraint_mut(left);
            v.visit_constraint_mut(right);
        }
        ConstraintKind::Exists(query)
        | ConstraintKind::In {
            list: InList::Subquery(query),
            ..
        } => v.visit_query_mut(query),
        _ => {}
    }
}

pub fn walk_operand_mut<V: VisitorMut + ?Sized>(v: &mut V, operand: &mut Operand) {
    for child in operand.children_mut() {
        v.visit_operand_mut(child);
    }
}

/// A tree or clause that visitors can walk
pub trait Walk {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V);
    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V);
}

impl Walk for Query {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        v.visit_query(self);
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        v.visit_query_mut(self);
    }
}

impl Walk for SelectClause {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        walk_select_clause(v, self);
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        walk_select_clause_mut(v, self);
    }
}

impl Walk for Constraint {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        v.visit_constraint(self);
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        v.visit_constraint_mut(self);
    }
}

impl Walk for [FromItem] {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        for item in self {
            v.visit_from_item(item);
        }
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        for item in self {
            v.visit_from_item_mut(item);
        }
    }
}

impl Walk for [OrderItem] {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        for item in self {
            v.visit_order_item(item);
        }
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        for item in self {
            v.visit_operand_mut(&mut item.expr);
        }
    }
}

impl Walk for [Operand] {
    fn walk<'ast, V: Visitor<'ast> + ?Sized>(&'ast self, v: &mut V) {
        for operand in self {
            v.visit_operand(operand);
        }
    }

    fn walk_mut<V: VisitorMut + ?Sized>(&mut self, v: &mut V) {
        for operand in self {
            v.visit_operand_mut(operand);
        }
    }
}

/// Collect every operand (at any depth) matching `predicate`, in document order
pub fn search_operands<'ast, W, P>(root: &'ast W, predicate: P) -> Vec<&'ast Operand>
where
    W: Walk + ?Sized,
    P: FnMut(&Operand) -> bool,
{
    struct Search<'ast, P> {
        predicate: P,
        found: Vec<&'ast Operand>,
    }

    impl<'ast, P: FnMut(&Operand) -> bool> Visitor<'ast> for Search<'ast, P> {
        fn visit_operand(&mut self, operand: &'ast Operand) {
            if (self.predicate)(operand) {
                self.found.push(operand);
            }
            walk_operand(self, operand);
        }
    }

    let mut search = Search {
        predicate,
        found: Vec::new(),
    };
    root.walk(&mut search);
    search.found
}

/// Collect every condition (at any depth) matching `predicate`, in document order
pub fn search_constraints<'ast, W, P>(root: &'ast W, predicate: P) -> Vec<&'ast Constraint>
where
    W: Walk + ?Sized,
    P: FnMut(&Constraint) -> bool,
{
    struct Search<'ast, P> {
        predicate: P,
        found: Vec<&'ast Constraint>,
    }

    impl<'ast, P: FnMut(&Constraint) -> bool> Visitor<'ast> for Search<'ast, P> {
        fn visit_constraint(&mut self, constraint: &'ast Constraint) {
            if (self.predicate)(constraint) {
                self.found.push(constraint);
            }
            walk_constraint(self, constraint);
        }
    }

    let mut search = Search {
        predicate,
        found: Vec::new(),
    };
    root.walk(&mut search);
    search.found
}

/// Replace in place every operand for which `replace` returns a new one
///
/// Replaced operands are not searched further. Returns the number of
/// replacements.
pub fn replace_operands<W, F>(root: &mut W, replace: F) -> usize
where
    W: Walk + ?Sized,
    F: FnMut(&Operand) -> Option<Operand>,
{
    struct Replace<F> {
        replace: F,
        count: usize,
    }

    impl<F: FnMut(&Operand) -> Option<Operand>> VisitorMut for Replace<F> {
        fn visit_operand_mut(&mut self, operand: &mut Operand) {
            match (self.replace)(operand) {
                Some(replacement) => {
                    *operand = replacement;
                    self.count += 1;
                }
                None => walk_operand_mut(self, operand),
            }
        }
    }

    let mut replacer = Replace { replace, count: 0 };
    root.walk_mut(&mut replacer);
    replacer.count
}
