//! `UPDATE [OR action] table SET ... [FROM ...] [WHERE ...] [RETURNING ...]`

use super::insert::ConflictAction;
use super::{StatementKind, append_returning, impl_statement};
use crate::column::ResultColumn;
use crate::error::{QbError, QbResult};
use crate::expr::Expr;
use crate::node::{SqlNode, snapshot_all};
use crate::quote::{join_with, quote_identifier};
use crate::table::{TableExpr, TableName};

/// `"column" = value` pairs of a `SET` list.
pub(crate) type Assignments = Vec<(String, Expr)>;

/// Collect a `SET` list. The list must not be empty.
pub(crate) fn assignments<C, E>(set: impl IntoIterator<Item = (C, E)>) -> QbResult<Assignments>
where
    C: Into<String>,
    E: Into<Expr>,
{
    let set: Assignments = set
        .into_iter()
        .map(|(column, value)| (column.into(), value.into()))
        .collect();
    if set.is_empty() {
        return Err(QbError::EmptyList("SET list"));
    }
    Ok(set)
}

pub(crate) fn append_assignments(out: &mut String, set: &[(String, Expr)]) -> QbResult<()> {
    out.push_str("SET ");
    join_with(out, set, ", ", |out, (column, value)| {
        quote_identifier(out, column);
        out.push_str(" = ");
        value.append_to(out)
    })
}

pub(crate) fn snapshot_assignments(set: &[(String, Expr)]) -> QbResult<Assignments> {
    set.iter()
        .map(|(column, value)| -> QbResult<_> { Ok((column.clone(), value.snapshot()?)) })
        .collect()
}

#[derive(Debug, Clone)]
#[must_use]
pub struct UpdateStub {
    or: Option<ConflictAction>,
    table: TableName,
    alias: Option<String>,
}

pub fn update(table: impl Into<TableName>) -> UpdateStub {
    UpdateStub {
        or: None,
        table: table.into(),
        alias: None,
    }
}

impl UpdateStub {
    /// `UPDATE OR <action>`
    pub fn or(mut self, action: ConflictAction) -> Self {
        self.or = Some(action);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Provide the `SET` list. It must not be empty.
    pub fn set<C, E>(self, set: impl IntoIterator<Item = (C, E)>) -> QbResult<Update>
    where
        C: Into<String>,
        E: Into<Expr>,
    {
        Ok(Update {
            stub: self,
            set: assignments(set)?,
            from: None,
            where_: None,
            returning: Vec::new(),
        })
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct Update {
    stub: UpdateStub,
    set: Assignments,
    from: Option<TableExpr>,
    where_: Option<Expr>,
    returning: Vec<ResultColumn>,
}

impl Update {
    pub fn from(mut self, source: impl Into<TableExpr>) -> Self {
        self.from = Some(source.into());
        self
    }

    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        self.where_ = Some(condition.into());
        self
    }

    pub fn returning(mut self, columns: impl IntoIterator<Item = impl Into<ResultColumn>>) -> Self {
        self.returning = columns.into_iter().map(Into::into).collect();
        self
    }
}

impl SqlNode for Update {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("UPDATE ");
        if let Some(action) = self.stub.or {
            out.push_str("OR ");
            out.push_str(action.as_str());
            out.push(' ');
        }
        self.stub.table.append_to(out)?;
        if let Some(alias) = &self.stub.alias {
            out.push_str(" AS ");
            quote_identifier(out, alias);
        }
        out.push(' ');
        append_assignments(out, &self.set)?;
        if let Some(from) = &self.from {
            out.push_str(" FROM ");
            from.append_to(out)?;
        }
        if let Some(condition) = &self.where_ {
            out.push_str(" WHERE ");
            condition.append_to(out)?;
        }
        append_returning(out, &self.returning)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            stub: self.stub.clone(),
            set: snapshot_assignments(&self.set)?,
            from: self.from.snapshot()?,
            where_: self.where_.snapshot()?,
            returning: snapshot_all(&self.returning)?,
        })
    }
}

impl_statement!(Update, StatementKind::Update);
