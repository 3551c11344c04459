//! `SELECT` statements, `VALUES` lists and compound selects.
//!
//! [`select`] starts a [`SelectCore`] (one `SELECT ... FROM ... WHERE ...`
//! arm). Compound operators, `ORDER BY`, `LIMIT` and `WITH` turn it into a
//! full [`Select`].
//!
//! # Example
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let query = select([col("id"), col("name")])
//!     .from(table("users"))
//!     .where_(col("active").eq(true))
//!     .order_by([col("name").asc()])
//!     .limit(10);
//! assert_eq!(
//!     query.to_sql()?,
//!     r#"SELECT "id", "name" FROM "users" WHERE "active" = TRUE ORDER BY "name" ASC LIMIT 10"#
//! );
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```

mod cte;

use std::sync::Arc;

pub use cte::{CommonTable, Materialization, With, cte, with, with_recursive};

use crate::column::ResultColumn;
use crate::error::{QbError, QbResult};
use crate::expr::Expr;
use crate::node::{SqlNode, append_list, snapshot_all};
use crate::quote::join_with;
use crate::slot::{SelectSlot, SlotValue};
use crate::stmt::{StatementKind, impl_statement};
use crate::table::TableExpr;

// ==================== SelectCore ====================

/// `DISTINCT` / `ALL` quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    Distinct,
    All,
}

/// A single `SELECT` arm.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectCore {
    quantifier: Option<Quantifier>,
    columns: Vec<ResultColumn>,
    from: Option<TableExpr>,
    where_: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
}

/// Start a `SELECT`. An empty column list renders as `*`.
pub fn select(columns: impl IntoIterator<Item = impl Into<ResultColumn>>) -> SelectCore {
    SelectCore {
        quantifier: None,
        columns: columns.into_iter().map(Into::into).collect(),
        from: None,
        where_: None,
        group_by: Vec::new(),
        having: None,
    }
}

impl SelectCore {
    pub fn distinct(mut self) -> Self {
        self.quantifier = Some(Quantifier::Distinct);
        self
    }

    pub fn all(mut self) -> Self {
        self.quantifier = Some(Quantifier::All);
        self
    }

    /// Append more result columns.
    pub fn column(mut self, column: impl Into<ResultColumn>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn from(mut self, source: impl Into<TableExpr>) -> Self {
        self.from = Some(source.into());
        self
    }

    /// Set the `WHERE` condition, replacing any previous one.
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        self.where_ = Some(condition.into());
        self
    }

    /// `AND` a condition onto the current `WHERE`.
    pub fn and_where(mut self, condition: impl Into<Expr>) -> Self {
        self.where_ = Some(match self.where_.take() {
            Some(existing) => existing.and(condition),
            None => condition.into(),
        });
        self
    }

    pub fn group_by(mut self, exprs: impl IntoIterator<Item = impl Into<Expr>>) -> Self {
        self.group_by = exprs.into_iter().map(Into::into).collect();
        self
    }

    pub fn having(mut self, condition: impl Into<Expr>) -> Self {
        self.having = Some(condition.into());
        self
    }

    pub fn union(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).union(rhs)
    }

    pub fn union_all(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).union_all(rhs)
    }

    pub fn intersect(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).intersect(rhs)
    }

    pub fn except(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).except(rhs)
    }

    pub fn order_by(self, terms: impl IntoIterator<Item = impl Into<OrderingTerm>>) -> Select {
        Select::from(self).order_by(terms)
    }

    pub fn limit(self, limit: impl Into<Expr>) -> Select {
        Select::from(self).limit(limit)
    }

    pub fn offset(self, offset: impl Into<Expr>) -> Select {
        Select::from(self).offset(offset)
    }
}

impl SqlNode for SelectCore {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("SELECT ");
        match self.quantifier {
            Some(Quantifier::Distinct) => out.push_str("DISTINCT "),
            Some(Quantifier::All) => out.push_str("ALL "),
            None => {}
        }
        if self.columns.is_empty() {
            out.push('*');
        } else {
            append_list(out, &self.columns)?;
        }
        if let Some(from) = &self.from {
            out.push_str(" FROM ");
            from.append_to(out)?;
        }
        if let Some(condition) = &self.where_ {
            out.push_str(" WHERE ");
            condition.append_to(out)?;
        }
        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            append_list(out, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            out.push_str(" HAVING ");
            having.append_to(out)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            quantifier: self.quantifier,
            columns: snapshot_all(&self.columns)?,
            from: self.from.snapshot()?,
            where_: self.where_.snapshot()?,
            group_by: snapshot_all(&self.group_by)?,
            having: self.having.snapshot()?,
        })
    }
}

// ==================== VALUES ====================

/// `VALUES (..), (..)`
#[derive(Debug, Clone)]
#[must_use]
pub struct Values {
    rows: Vec<Vec<Expr>>,
}

/// Build a `VALUES` list. Rows must be non-empty and of equal width.
pub fn values<R, E>(rows: impl IntoIterator<Item = R>) -> QbResult<Values>
where
    R: IntoIterator<Item = E>,
    E: Into<Expr>,
{
    let rows: Vec<Vec<Expr>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect();
    let width = match rows.first() {
        Some(first) if !first.is_empty() => first.len(),
        Some(_) => return Err(QbError::EmptyList("VALUES row")),
        None => return Err(QbError::EmptyList("VALUES list")),
    };
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(QbError::validation(format!(
            "VALUES row {i} has {} columns, expected {width}",
            row.len()
        )));
    }
    Ok(Values { rows })
}

impl Values {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn union(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).union(rhs)
    }

    pub fn union_all(self, rhs: impl Into<SelectArm>) -> Select {
        Select::from(self).union_all(rhs)
    }

    pub fn order_by(self, terms: impl IntoIterator<Item = impl Into<OrderingTerm>>) -> Select {
        Select::from(self).order_by(terms)
    }

    pub fn limit(self, limit: impl Into<Expr>) -> Select {
        Select::from(self).limit(limit)
    }
}

impl SqlNode for Values {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("VALUES ");
        join_with(out, &self.rows, ", ", |out, row| {
            out.push('(');
            append_list(out, row)?;
            out.push(')');
            Ok(())
        })
    }

    fn snapshot(&self) -> QbResult<Self> {
        let rows = self
            .rows
            .iter()
            .map(|row| snapshot_all(row))
            .collect::<QbResult<_>>()?;
        Ok(Self { rows })
    }
}

// ==================== Select ====================

/// One operand of a compound select.
#[derive(Debug, Clone)]
pub enum SelectArm {
    Core(SelectCore),
    Values(Values),
}

impl SqlNode for SelectArm {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            SelectArm::Core(core) => core.append_to(out),
            SelectArm::Values(values) => values.append_to(out),
        }
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            SelectArm::Core(core) => SelectArm::Core(core.snapshot()?),
            SelectArm::Values(values) => SelectArm::Values(values.snapshot()?),
        })
    }
}

impl From<SelectCore> for SelectArm {
    fn from(core: SelectCore) -> Self {
        SelectArm::Core(core)
    }
}

impl From<Values> for SelectArm {
    fn from(values: Values) -> Self {
        SelectArm::Values(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl CompoundOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompoundOp::Union => "UNION",
            CompoundOp::UnionAll => "UNION ALL",
            CompoundOp::Intersect => "INTERSECT",
            CompoundOp::Except => "EXCEPT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// `expr [ASC|DESC] [NULLS FIRST|LAST]`
#[derive(Debug, Clone)]
#[must_use]
pub struct OrderingTerm {
    expr: Expr,
    direction: Option<SortDirection>,
    nulls: Option<NullsOrder>,
}

impl OrderingTerm {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(mut self) -> Self {
        self.direction = Some(SortDirection::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.direction = Some(SortDirection::Desc);
        self
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }
}

impl SqlNode for OrderingTerm {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.expr.append_to(out)?;
        match self.direction {
            Some(SortDirection::Asc) => out.push_str(" ASC"),
            Some(SortDirection::Desc) => out.push_str(" DESC"),
            None => {}
        }
        match self.nulls {
            Some(NullsOrder::First) => out.push_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => out.push_str(" NULLS LAST"),
            None => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            expr: self.expr.snapshot()?,
            direction: self.direction,
            nulls: self.nulls,
        })
    }
}

impl From<Expr> for OrderingTerm {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

/// A complete select statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct Select {
    with: Option<With>,
    first: SelectArm,
    compounds: Vec<(CompoundOp, SelectArm)>,
    order_by: Vec<OrderingTerm>,
    limit: Option<Expr>,
    offset: Option<Expr>,
}

impl Select {
    fn compound(mut self, op: CompoundOp, rhs: impl Into<SelectArm>) -> Self {
        self.compounds.push((op, rhs.into()));
        self
    }

    pub fn union(self, rhs: impl Into<SelectArm>) -> Self {
        self.compound(CompoundOp::Union, rhs)
    }

    pub fn union_all(self, rhs: impl Into<SelectArm>) -> Self {
        self.compound(CompoundOp::UnionAll, rhs)
    }

    pub fn intersect(self, rhs: impl Into<SelectArm>) -> Self {
        self.compound(CompoundOp::Intersect, rhs)
    }

    pub fn except(self, rhs: impl Into<SelectArm>) -> Self {
        self.compound(CompoundOp::Except, rhs)
    }

    /// Append `ORDER BY` terms.
    pub fn order_by(mut self, terms: impl IntoIterator<Item = impl Into<OrderingTerm>>) -> Self {
        self.order_by.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, limit: impl Into<Expr>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// `OFFSET` without a limit renders as `LIMIT -1 OFFSET n`.
    pub fn offset(mut self, offset: impl Into<Expr>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub(crate) fn set_with(mut self, with: With) -> Self {
        self.with = Some(match self.with.take() {
            Some(existing) => with.merge(existing),
            None => with,
        });
        self
    }

    /// Whether the statement has compound arms.
    pub fn is_compound(&self) -> bool {
        !self.compounds.is_empty()
    }
}

impl SqlNode for Select {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        if let Some(with) = &self.with {
            with.append_to(out)?;
            out.push(' ');
        }
        self.first.append_to(out)?;
        for (op, arm) in &self.compounds {
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            arm.append_to(out)?;
        }
        if !self.order_by.is_empty() {
            out.push_str(" ORDER BY ");
            append_list(out, &self.order_by)?;
        }
        match (&self.limit, &self.offset) {
            (Some(limit), offset) => {
                out.push_str(" LIMIT ");
                limit.append_to(out)?;
                if let Some(offset) = offset {
                    out.push_str(" OFFSET ");
                    offset.append_to(out)?;
                }
            }
            (None, Some(offset)) => {
                out.push_str(" LIMIT -1 OFFSET ");
                offset.append_to(out)?;
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            with: self.with.snapshot()?,
            first: self.first.snapshot()?,
            compounds: self
                .compounds
                .iter()
                .map(|(op, arm)| -> QbResult<_> { Ok((*op, arm.snapshot()?)) })
                .collect::<QbResult<_>>()?,
            order_by: snapshot_all(&self.order_by)?,
            limit: self.limit.snapshot()?,
            offset: self.offset.snapshot()?,
        })
    }
}

impl SlotValue for Select {
    const KIND: &'static str = "select statement";

    fn snapshot_value(&self) -> QbResult<Self> {
        self.snapshot()
    }
}

impl From<SelectArm> for Select {
    fn from(first: SelectArm) -> Self {
        Self {
            with: None,
            first,
            compounds: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl From<SelectCore> for Select {
    fn from(core: SelectCore) -> Self {
        SelectArm::Core(core).into()
    }
}

impl From<Values> for Select {
    fn from(values: Values) -> Self {
        SelectArm::Values(values).into()
    }
}

impl_statement!(Select, StatementKind::Select);
impl_statement!(SelectCore, StatementKind::Select);
impl_statement!(Values, StatementKind::Select);

// ==================== SelectSource ====================

/// A select embedded in another node: fixed, or read from a [`SelectSlot`].
#[derive(Debug, Clone)]
pub enum SelectSource {
    Fixed(Arc<Select>),
    Slot(SelectSlot),
}

impl SqlNode for SelectSource {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            SelectSource::Fixed(select) => select.append_to(out),
            SelectSource::Slot(slot) => slot.append_to(out),
        }
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            SelectSource::Fixed(select) => SelectSource::Fixed(Arc::new(select.snapshot()?)),
            SelectSource::Slot(slot) => SelectSource::Fixed(Arc::new(slot.snapshot()?)),
        })
    }
}

impl From<Select> for SelectSource {
    fn from(select: Select) -> Self {
        SelectSource::Fixed(Arc::new(select))
    }
}

impl From<SelectCore> for SelectSource {
    fn from(core: SelectCore) -> Self {
        Select::from(core).into()
    }
}

impl From<Values> for SelectSource {
    fn from(values: Values) -> Self {
        Select::from(values).into()
    }
}

impl From<SelectSlot> for SelectSource {
    fn from(slot: SelectSlot) -> Self {
        SelectSource::Slot(slot)
    }
}

impl From<SelectCore> for Expr {
    fn from(core: SelectCore) -> Self {
        Expr::Subquery(core.into())
    }
}

#[cfg(test)]
mod tests;
