//! `DELETE FROM table [WHERE ...] [RETURNING ...]`

use super::{StatementKind, append_returning, impl_statement};
use crate::column::ResultColumn;
use crate::error::QbResult;
use crate::expr::Expr;
use crate::node::{SqlNode, snapshot_all};
use crate::quote::quote_identifier;
use crate::table::TableName;

#[derive(Debug, Clone)]
#[must_use]
pub struct Delete {
    table: TableName,
    alias: Option<String>,
    where_: Option<Expr>,
    returning: Vec<ResultColumn>,
}

/// Delete every row of `table` unless a `WHERE` is added.
pub fn delete_from(table: impl Into<TableName>) -> Delete {
    Delete {
        table: table.into(),
        alias: None,
        where_: None,
        returning: Vec::new(),
    }
}

impl Delete {
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
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

impl SqlNode for Delete {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("DELETE FROM ");
        self.table.append_to(out)?;
        if let Some(alias) = &self.alias {
            out.push_str(" AS ");
            quote_identifier(out, alias);
        }
        if let Some(condition) = &self.where_ {
            out.push_str(" WHERE ");
            condition.append_to(out)?;
        }
        append_returning(out, &self.returning)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            table: self.table.clone(),
            alias: self.alias.clone(),
            where_: self.where_.snapshot()?,
            returning: snapshot_all(&self.returning)?,
        })
    }
}

impl_statement!(Delete, StatementKind::Delete);
