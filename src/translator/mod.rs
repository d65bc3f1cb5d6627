//! SQL translation
//!
//! A [`SqlTranslator`] renders a checked [`Query`] as SQL text. Every hook
//! has a default producing PostgreSQL; a dialect overrides the hooks it
//! renders differently. Constructs a dialect cannot express are reported
//! as [`TranslationError::Unsupported`], never skipped.
//!
//! - [`PostgreSqlTranslator`]: plain PostgreSQL, no geometry
//! - [`PgSphereTranslator`]: PostgreSQL with the pgSphere extension

mod error;
mod pgsphere;
mod postgres;

pub use error::TranslationError;
pub use pgsphere::PgSphereTranslator;
pub use postgres::PostgreSqlTranslator;

use crate::syntax::{
    ComparisonOp, Constraint, ConstraintKind, FromItem, Function, GeometryFunction, Identifier,
    InList, JoinCondition, MathKind, Operand, OperandKind, OrderItem, Query, QueryBody,
    SelectItem, SelectQuery, SetOperation, TableName, quote_string,
};

pub type TranslationResult = Result<String, TranslationError>;

pub trait SqlTranslator {
    /// Translate a full query
    fn translate(&self, query: &Query) -> TranslationResult {
        tracing::trace!("translating query");
        let mut sql = String::new();
        if !query.with.is_empty() {
            let items = query
                .with
                .iter()
                .map(|item| {
                    let mut sql = self.quote_identifier(&item.name);
                    if !item.columns.is_empty() {
                        sql.push_str(&format!("({})", self.identifiers(&item.columns)));
                    }
                    Ok(format!("{sql} AS ({})", self.translate(&item.query)?))
                })
                .collect::<Result<Vec<_>, TranslationError>>()?;
            sql.push_str(&format!("WITH {}\n", items.join(", ")));
        }
        sql.push_str(&self.translate_body(&query.body)?);
        Ok(sql)
    }

    fn translate_body(&self, body: &QueryBody) -> TranslationResult {
        match body {
            QueryBody::Select(select) => self.translate_select(select),
            QueryBody::Set(set) => self.translate_set_operation(set),
        }
    }

    fn translate_select(&self, select: &SelectQuery) -> TranslationResult {
        let mut sql = String::from("SELECT ");
        if select.select.distinct {
            sql.push_str("DISTINCT ");
        }
        let items = select
            .select
            .items
            .iter()
            .map(|item| self.translate_select_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(&items.join(", "));

        let from = select
            .from
            .iter()
            .map(|item| self.translate_from_item(item))
            .collect::<Result<Vec<_>, _>>()?;
        sql.push_str(&format!("\nFROM {}", from.join(", ")));

        if let Some(where_clause) = &select.where_clause {
            sql.push_str(&format!("\nWHERE {}", self.translate_constraint(where_clause)?));
        }
        if !select.group_by.is_empty() {
            sql.push_str(&format!("\nGROUP BY {}", self.operands(&select.group_by)?));
        }
        if let Some(having) = &select.having {
            sql.push_str(&format!("\nHAVING {}", self.translate_constraint(having)?));
        }
        sql.push_str(&self.order_by(&select.order_by)?);
        sql.push_str(&self.limit_offset(select.select.top, select.offset.map(|o| o.value)));
        Ok(sql)
    }

    fn translate_set_operation(&self, set: &SetOperation) -> TranslationResult {
        let mut sql = format!(
            "({})\n{}",
            self.translate_body(&set.left)?,
            set.op.keyword()
        );
        if set.all {
            sql.push_str(" ALL");
        }
        sql.push_str(&format!("\n({})", self.translate_body(&set.right)?));
        sql.push_str(&self.order_by(&set.order_by)?);
        sql.push_str(&self.limit_offset(None, set.offset.map(|o| o.value)));
        Ok(sql)
    }

    fn translate_select_item(&self, item: &SelectItem) -> TranslationResult {
        match item {
            SelectItem::All { .. } => Ok("*".to_string()),
            SelectItem::AllOf { table, .. } => Ok(format!("{}.*", self.table_name(table))),
            SelectItem::Expr { operand, alias } => {
                let sql = self.translate_operand(operand)?;
                Ok(match alias {
                    Some(alias) => format!("{sql} AS {}", self.quote_identifier(alias)),
                    None => sql,
                })
            }
        }
    }

    fn translate_from_item(&self, item: &FromItem) -> TranslationResult {
        match item {
            FromItem::Table { name, alias, .. } => {
                let sql = self.table_name(name);
                Ok(match alias {
                    Some(alias) => format!("{sql} AS {}", self.quote_identifier(alias)),
                    None => sql,
                })
            }
            FromItem::Subquery { query, alias, .. } => Ok(format!(
                "({}) AS {}",
                self.translate(query)?,
                self.quote_identifier(alias)
            )),
            FromItem::Join(join) => {
                let mut sql = format!("{} ", self.translate_from_item(&join.left)?);
                if join.natural {
                    sql.push_str("NATURAL ");
                }
                sql.push_str(&format!(
                    "{} {}",
                    join.kind.keyword(),
                    self.translate_from_item(&join.right)?
                ));
                match &join.condition {
                    Some(JoinCondition::On(constraint)) => {
                        sql.push_str(&format!(" ON {}", self.translate_constraint(constraint)?));
                    }
                    Some(JoinCondition::Using(columns)) => {
                        sql.push_str(&format!(" USING ({})", self.identifiers(columns)));
                    }
                    None => {}
                }
                Ok(sql)
            }
        }
    }

    fn translate_constraint(&self, constraint: &Constraint) -> TranslationResult {
        let not = |negated: bool| if negated { "NOT " } else { "" };
        match &constraint.kind {
            ConstraintKind::Comparison { left, op, right } => {
                self.translate_comparison(left, *op, right)
            }
            ConstraintKind::Between {
                value,
                low,
                high,
                negated,
            } => Ok(format!(
                "{} {}BETWEEN {} AND {}",
                self.translate_operand(value)?,
                not(*negated),
                self.translate_operand(low)?,
                self.translate_operand(high)?
            )),
            ConstraintKind::In {
                value,
                list,
                negated,
            } => {
                let list = match list {
                    InList::Values(values) => self.operands(values)?,
                    InList::Subquery(query) => self.translate(query)?,
                };
                Ok(format!(
                    "{} {}IN ({list})",
                    self.translate_operand(value)?,
                    not(*negated)
                ))
            }
            ConstraintKind::IsNull { value, negated } => Ok(format!(
                "{} IS {}NULL",
                self.translate_operand(value)?,
                not(*negated)
            )),
            ConstraintKind::Exists(query) => Ok(format!("EXISTS({})", self.translate(query)?)),
            ConstraintKind::Not(inner) => Ok(format!("NOT {}", self.translate_constraint(inner)?)),
            ConstraintKind::And(left, right) => Ok(format!(
                "{} AND {}",
                self.translate_constraint(left)?,
                self.translate_constraint(right)?
            )),
            ConstraintKind::Or(left, right) => Ok(format!(
                "{} OR {}",
                self.translate_constraint(left)?,
                self.translate_constraint(right)?
            )),
            ConstraintKind::Group(inner) => Ok(format!("({})", self.translate_constraint(inner)?)),
        }
    }

    fn translate_comparison(&self, left: &Operand, op: ComparisonOp, right: &Operand) -> TranslationResult {
        comparison(self, left, op, right)
    }

    fn translate_operand(&self, operand: &Operand) -> TranslationResult {
        match &operand.kind {
            OperandKind::Numeric(text) => Ok(text.to_string()),
            OperandKind::String(value) => Ok(quote_string(value)),
            OperandKind::Column(column) => Ok(match &column.table {
                Some(table) => format!(
                    "{}.{}",
                    self.table_name(table),
                    self.quote_identifier(&column.column)
                ),
                None => self.quote_identifier(&column.column),
            }),
            OperandKind::Negative(inner) => {
                let inner = self.translate_operand(inner)?;
                // `--` would start a comment
                Ok(if inner.starts_with('-') {
                    format!("-({inner})")
                } else {
                    format!("-{inner}")
                })
            }
            OperandKind::Operation { left, op, right } => Ok(format!(
                "{} {} {}",
                self.translate_operand(left)?,
                op.symbol(),
                self.translate_operand(right)?
            )),
            OperandKind::Concatenation(parts) => Ok(parts
                .iter()
                .map(|part| self.translate_operand(part))
                .collect::<Result<Vec<_>, _>>()?
                .join(" || ")),
            OperandKind::Wrapped(inner) => Ok(format!("({})", self.translate_operand(inner)?)),
            OperandKind::Function(function) => self.translate_function(function),
        }
    }

    fn translate_function(&self, function: &Function) -> TranslationResult {
        match function {
            Function::Math { kind, args } => self.translate_math(*kind, args),
            Function::Aggregate {
                kind,
                distinct,
                arg,
            } => {
                let arg = match arg {
                    Some(arg) => self.translate_operand(arg)?,
                    None => "*".to_string(),
                };
                let distinct = if *distinct { "DISTINCT " } else { "" };
                Ok(format!("{}({distinct}{arg})", kind.name()))
            }
            Function::Geometry(geometry) => self.translate_geometry(geometry),
            Function::Lower(value) => Ok(format!("LOWER({})", self.translate_operand(value)?)),
            Function::Upper(value) => Ok(format!("UPPER({})", self.translate_operand(value)?)),
            Function::Coalesce(args) => Ok(format!("COALESCE({})", self.operands(args)?)),
            Function::InUnit { .. } => Err(TranslationError::unsupported("IN_UNIT")),
            Function::Cast { value, target } => {
                Ok(format!("CAST({} AS {target})", self.translate_operand(value)?))
            }
            Function::UserDefined { name, args } => {
                Ok(format!("{}({})", self.quote_identifier(name), self.operands(args)?))
            }
        }
    }

    fn translate_math(&self, kind: MathKind, args: &[Operand]) -> TranslationResult {
        let args_sql = self.operands(args)?;
        let sql = match kind {
            MathKind::Log => format!("LN({args_sql})"),
            MathKind::Log10 => format!("LOG({args_sql})"),
            MathKind::Rand if args.is_empty() => "RANDOM()".to_string(),
            MathKind::Rand => return Err(TranslationError::unsupported("RAND with a seed")),
            // ROUND(x, n) and TRUNC(x, n) only exist for NUMERIC
            MathKind::Round | MathKind::Truncate => {
                let name = if kind == MathKind::Round { "ROUND" } else { "TRUNC" };
                match args {
                    [value, digits] => format!(
                        "{name}(CAST({} AS NUMERIC), {})",
                        self.translate_operand(value)?,
                        self.translate_operand(digits)?
                    ),
                    _ => format!("{name}({args_sql})"),
                }
            }
            other => format!("{}({args_sql})", other.name()),
        };
        Ok(sql)
    }

    /// Geometry functions; none by default
    fn translate_geometry(&self, geometry: &GeometryFunction) -> TranslationResult {
        Err(TranslationError::unsupported(format!(
            "the geometrical function \"{}\"",
            geometry.kind.name()
        )))
    }

    /// Identifier as the database must read it
    ///
    /// Regular identifiers are left to the case folding of the database,
    /// delimited ones keep their double quotes.
    fn quote_identifier(&self, identifier: &Identifier) -> String {
        identifier.to_string()
    }

    /// Row limit (`TOP`) and offset, with their leading line break
    fn limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        let mut sql = String::new();
        if let Some(limit) = limit {
            sql.push_str(&format!("\nLIMIT {limit}"));
        }
        if let Some(offset) = offset {
            sql.push_str(&format!("\nOFFSET {offset}"));
        }
        sql
    }

    fn table_name(&self, name: &TableName) -> String {
        [&name.catalog, &name.schema]
            .into_iter()
            .flatten()
            .chain(std::iter::once(&name.table))
            .map(|part| self.quote_identifier(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn identifiers(&self, identifiers: &[Identifier]) -> String {
        identifiers
            .iter()
            .map(|id| self.quote_identifier(id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn operands(&self, operands: &[Operand]) -> TranslationResult {
        Ok(operands
            .iter()
            .map(|operand| self.translate_operand(operand))
            .collect::<Result<Vec<_>, _>>()?
            .join(", "))
    }

    fn order_by(&self, items: &[OrderItem]) -> TranslationResult {
        if items.is_empty() {
            return Ok(String::new());
        }
        let items = items
            .iter()
            .map(|item| {
                let sql = self.translate_operand(&item.expr)?;
                Ok(if item.descending { format!("{sql} DESC") } else { sql })
            })
            .collect::<Result<Vec<_>, TranslationError>>()?;
        Ok(format!("\nORDER BY {}", items.join(", ")))
    }
}

/// Default rendering of `left op right`, for dialects overriding
/// [`SqlTranslator::translate_comparison`] in special cases only
pub fn comparison<T: SqlTranslator + ?Sized>(
    translator: &T,
    left: &Operand,
    op: ComparisonOp,
    right: &Operand,
) -> TranslationResult {
    Ok(format!(
        "{} {} {}",
        translator.translate_operand(left)?,
        op.symbol(),
        translator.translate_operand(right)?
    ))
}
