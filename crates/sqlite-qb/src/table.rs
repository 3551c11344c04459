//! Table expressions: the row sources of `FROM`, `UPDATE ... FROM` and joins.
//!
//! # Example
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let source = table("users")
//!     .alias("u")
//!     .left_join(table("orders").alias("o"))
//!     .on(table_col("u", "id").eq(table_col("o", "user_id")));
//! assert_eq!(
//!     TableExpr::from(source).to_sql()?,
//!     r#""users" AS "u" LEFT JOIN "orders" AS "o" ON "u"."id" = "o"."user_id""#
//! );
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```

use std::sync::Arc;

use crate::error::QbResult;
use crate::expr::Expr;
use crate::node::{SqlNode, append_list, snapshot_all};
use crate::quote::{identifier_list, join_qualified_name, parenthesize_if, quote_identifier};
use crate::select::SelectSource;
use crate::slot::{SlotValue, TableSlot};

/// A possibly schema-qualified object name, always rendered quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName {
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    pub fn append_to(&self, out: &mut String) -> QbResult<()> {
        join_qualified_name(out, &[self.schema.as_deref(), Some(self.name.as_str())])
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<(&str, &str)> for TableName {
    fn from((schema, name): (&str, &str)) -> Self {
        Self::qualified(schema, name)
    }
}

/// `INDEXED BY` / `NOT INDEXED` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexHint {
    IndexedBy(String),
    NotIndexed,
}

/// Plain table reference.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableRef {
    pub name: TableName,
    pub alias: Option<String>,
    pub index: Option<IndexHint>,
}

impl TableRef {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn indexed_by(mut self, index: impl Into<String>) -> Self {
        self.index = Some(IndexHint::IndexedBy(index.into()));
        self
    }

    pub fn not_indexed(mut self) -> Self {
        self.index = Some(IndexHint::NotIndexed);
        self
    }

    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.name.append_to(out)?;
        append_alias(out, self.alias.as_deref());
        match &self.index {
            Some(IndexHint::IndexedBy(index)) => {
                out.push_str(" INDEXED BY ");
                quote_identifier(out, index);
            }
            Some(IndexHint::NotIndexed) => out.push_str(" NOT INDEXED"),
            None => {}
        }
        Ok(())
    }
}

/// Table-valued function reference: `"json_each"("doc")`.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableFunctionRef {
    pub name: TableName,
    pub args: Vec<Expr>,
    pub alias: Option<String>,
}

impl TableFunctionRef {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.name.append_to(out)?;
        out.push('(');
        append_list(out, &self.args)?;
        out.push(')');
        append_alias(out, self.alias.as_deref());
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            name: self.name.clone(),
            args: snapshot_all(&self.args)?,
            alias: self.alias.clone(),
        })
    }
}

/// Sub-select used as a row source.
#[derive(Debug, Clone)]
#[must_use]
pub struct SubqueryRef {
    pub select: SelectSource,
    pub alias: Option<String>,
}

impl SubqueryRef {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push('(');
        self.select.append_to(out)?;
        out.push(')');
        append_alias(out, self.alias.as_deref());
        Ok(())
    }
}

fn append_alias(out: &mut String, alias: Option<&str>) {
    if let Some(alias) = alias {
        out.push_str(" AS ");
        quote_identifier(out, alias);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Bare `JOIN`
    Plain,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinKind::Plain => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

#[derive(Debug, Clone)]
pub enum JoinConstraint {
    On(Expr),
    /// Omitted from the output when empty.
    Using(Vec<String>),
}

/// Join of two table expressions.
#[derive(Debug, Clone)]
#[must_use]
pub struct Join {
    pub left: TableExpr,
    pub kind: JoinKind,
    pub natural: bool,
    pub right: TableExpr,
    pub constraint: Option<JoinConstraint>,
}

impl Join {
    /// Prefix the join operator with `NATURAL`.
    pub fn natural(mut self) -> Self {
        self.natural = true;
        self
    }

    /// `ON condition`
    pub fn on(mut self, condition: impl Into<Expr>) -> Self {
        self.constraint = Some(JoinConstraint::On(condition.into()));
        self
    }

    /// `USING ("a", "b")`
    pub fn using<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.constraint = Some(JoinConstraint::Using(columns));
        self
    }

    fn append_to(&self, out: &mut String) -> QbResult<()> {
        parenthesize_if(out, self.left.is_join(), |out| self.left.append_to(out))?;
        out.push(' ');
        if self.natural {
            out.push_str("NATURAL ");
        }
        out.push_str(self.kind.as_str());
        out.push(' ');
        parenthesize_if(out, self.right.is_join(), |out| self.right.append_to(out))?;
        match &self.constraint {
            Some(JoinConstraint::On(condition)) => {
                out.push_str(" ON ");
                condition.append_to(out)?;
            }
            Some(JoinConstraint::Using(columns)) if !columns.is_empty() => {
                out.push_str(" USING ");
                identifier_list(out, columns);
            }
            _ => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            left: self.left.snapshot()?,
            kind: self.kind,
            natural: self.natural,
            right: self.right.snapshot()?,
            constraint: match &self.constraint {
                Some(JoinConstraint::On(condition)) => {
                    Some(JoinConstraint::On(condition.snapshot()?))
                }
                other => other.clone(),
            },
        })
    }
}

/// Table expression node.
#[derive(Debug, Clone)]
pub enum TableExpr {
    Table(Arc<TableRef>),
    Function(Arc<TableFunctionRef>),
    Join(Arc<Join>),
    Subquery(Arc<SubqueryRef>),
    Slot(TableSlot),
}

impl TableExpr {
    /// Whether this node renders as a join (and so needs grouping as a join
    /// operand).
    pub fn is_join(&self) -> bool {
        match self {
            TableExpr::Join(_) => true,
            TableExpr::Slot(slot) => slot.with_value(|t| Ok(t.is_join())).unwrap_or(false),
            _ => false,
        }
    }
}

impl SqlNode for TableExpr {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            TableExpr::Table(t) => t.append_to(out),
            TableExpr::Function(f) => f.append_to(out),
            TableExpr::Join(j) => j.append_to(out),
            TableExpr::Subquery(s) => s.append_to(out),
            TableExpr::Slot(slot) => slot.append_to(out),
        }
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            TableExpr::Table(_) => self.clone(),
            TableExpr::Function(f) => TableExpr::Function(Arc::new(f.snapshot()?)),
            TableExpr::Join(j) => TableExpr::Join(Arc::new(j.snapshot()?)),
            TableExpr::Subquery(s) => TableExpr::Subquery(Arc::new(SubqueryRef {
                select: s.select.snapshot()?,
                alias: s.alias.clone(),
            })),
            TableExpr::Slot(slot) => slot.snapshot()?,
        })
    }
}

impl SlotValue for TableExpr {
    const KIND: &'static str = "table expression";

    fn snapshot_value(&self) -> QbResult<Self> {
        self.snapshot()
    }
}

impl From<TableRef> for TableExpr {
    fn from(t: TableRef) -> Self {
        TableExpr::Table(Arc::new(t))
    }
}

impl From<TableFunctionRef> for TableExpr {
    fn from(f: TableFunctionRef) -> Self {
        TableExpr::Function(Arc::new(f))
    }
}

impl From<Join> for TableExpr {
    fn from(j: Join) -> Self {
        TableExpr::Join(Arc::new(j))
    }
}

impl From<SubqueryRef> for TableExpr {
    fn from(s: SubqueryRef) -> Self {
        TableExpr::Subquery(Arc::new(s))
    }
}

impl From<TableSlot> for TableExpr {
    fn from(slot: TableSlot) -> Self {
        TableExpr::Slot(slot)
    }
}

impl From<&str> for TableExpr {
    fn from(name: &str) -> Self {
        table(name).into()
    }
}

/// Reference a table by name.
pub fn table(name: impl Into<TableName>) -> TableRef {
    TableRef {
        name: name.into(),
        alias: None,
        index: None,
    }
}

/// Reference a table-valued function such as `json_each(...)`.
pub fn table_function(
    name: impl Into<TableName>,
    args: impl IntoIterator<Item = impl Into<Expr>>,
) -> TableFunctionRef {
    TableFunctionRef {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
        alias: None,
    }
}

/// Use a sub-select as a row source.
pub fn from_select(select: impl Into<SelectSource>) -> SubqueryRef {
    SubqueryRef {
        select: select.into(),
        alias: None,
    }
}

/// Join operators available on every table expression.
pub trait Joinable: Into<TableExpr> + Sized {
    fn join_with(self, kind: JoinKind, right: impl Into<TableExpr>) -> Join {
        Join {
            left: self.into(),
            kind,
            natural: false,
            right: right.into(),
            constraint: None,
        }
    }

    /// `self JOIN right`
    fn join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Plain, right)
    }

    fn inner_join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Inner, right)
    }

    fn left_join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Left, right)
    }

    fn right_join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Right, right)
    }

    fn full_join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Full, right)
    }

    fn cross_join(self, right: impl Into<TableExpr>) -> Join {
        self.join_with(JoinKind::Cross, right)
    }
}

impl Joinable for TableExpr {}
impl Joinable for TableRef {}
impl Joinable for TableFunctionRef {}
impl Joinable for SubqueryRef {}
impl Joinable for Join {}
impl Joinable for TableSlot {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, table_col};

    fn sql(t: impl Into<TableExpr>) -> String {
        t.into().to_sql().unwrap()
    }

    #[test]
    fn plain_and_aliased_tables() {
        assert_eq!(sql(table("users")), r#""users""#);
        assert_eq!(sql(table(("main", "users")).alias("u")), r#""main"."users" AS "u""#);
        assert_eq!(
            sql(table("users").alias("u").indexed_by("by_name")),
            r#""users" AS "u" INDEXED BY "by_name""#
        );
        assert_eq!(sql(table("users").not_indexed()), r#""users" NOT INDEXED"#);
    }

    #[test]
    fn table_function_reference() {
        assert_eq!(
            sql(table_function("json_each", [col("doc")]).alias("j")),
            r#""json_each"("doc") AS "j""#
        );
        assert_eq!(
            sql(table_function("generate_series", Vec::<Expr>::new())),
            r#""generate_series"()"#
        );
    }

    #[test]
    fn join_constraints() {
        assert_eq!(
            sql(table("a").inner_join(table("b")).on(table_col("a", "id").eq(table_col("b", "id")))),
            r#""a" INNER JOIN "b" ON "a"."id" = "b"."id""#
        );
        assert_eq!(
            sql(table("a").left_join(table("b")).using(["id", "kind"])),
            r#""a" LEFT JOIN "b" USING ("id", "kind")"#
        );
        assert_eq!(
            sql(table("a").join(table("b")).using(Vec::<String>::new())),
            r#""a" JOIN "b""#
        );
        assert_eq!(
            sql(table("a").join(table("b")).natural()),
            r#""a" NATURAL JOIN "b""#
        );
        assert_eq!(sql(table("a").cross_join(table("b"))), r#""a" CROSS JOIN "b""#);
    }

    #[test]
    fn nested_joins_are_grouped() {
        let left_nested = table("a").join(table("b")).join(table("c"));
        assert_eq!(sql(left_nested), r#"("a" JOIN "b") JOIN "c""#);

        let right_nested = table("a").join(table("b").join(table("c")));
        assert_eq!(sql(right_nested), r#""a" JOIN ("b" JOIN "c")"#);
    }

    #[test]
    fn slot_holding_a_join_is_grouped() {
        let slot = TableSlot::with(TableExpr::from(table("b").join(table("c"))));
        assert!(TableExpr::from(slot.clone()).is_join());
        assert_eq!(sql(table("a").join(slot.clone())), r#""a" JOIN ("b" JOIN "c")"#);

        slot.set(table("b"));
        assert_eq!(sql(table("a").join(slot)), r#""a" JOIN "b""#);
    }

    #[test]
    fn unset_table_slot_fails() {
        let err = TableExpr::from(TableSlot::new()).to_sql().unwrap_err();
        assert!(err.is_unset_placeholder());
    }
}
