//! `CREATE [UNIQUE] INDEX`

use super::{StatementKind, impl_statement};
use crate::error::{QbError, QbResult};
use crate::expr::{Expr, Precedence, col};
use crate::node::{SqlNode, append_list, snapshot_all};
use crate::quote::{quote_identifier, quote_identifier_if_needed};
use crate::select::SortDirection;
use crate::table::TableName;

#[derive(Debug, Clone)]
#[must_use]
pub struct CreateIndexStub {
    unique: bool,
    if_not_exists: bool,
    name: TableName,
}

pub fn create_index(name: impl Into<TableName>) -> CreateIndexStub {
    CreateIndexStub {
        unique: false,
        if_not_exists: false,
        name: name.into(),
    }
}

pub fn create_unique_index(name: impl Into<TableName>) -> CreateIndexStub {
    create_index(name).unique()
}

impl CreateIndexStub {
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Index `columns` of `table`. The column list must not be empty.
    pub fn on(
        self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<IndexedColumn>>,
    ) -> QbResult<CreateIndex> {
        let columns: Vec<IndexedColumn> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(QbError::EmptyList("index column list"));
        }
        Ok(CreateIndex {
            stub: self,
            table: table.into(),
            columns,
            where_: None,
        })
    }
}

/// One indexed column or expression.
#[derive(Debug, Clone)]
#[must_use]
pub struct IndexedColumn {
    expr: Expr,
    collation: Option<String>,
    direction: Option<SortDirection>,
}

impl IndexedColumn {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            collation: None,
            direction: None,
        }
    }

    pub fn collate(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    pub fn asc(mut self) -> Self {
        self.direction = Some(SortDirection::Asc);
        self
    }

    pub fn desc(mut self) -> Self {
        self.direction = Some(SortDirection::Desc);
        self
    }
}

impl SqlNode for IndexedColumn {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match &self.collation {
            Some(collation) => {
                self.expr.append_left(out, Precedence::COLLATE)?;
                out.push_str(" COLLATE ");
                quote_identifier_if_needed(out, collation);
            }
            None => self.expr.append_to(out)?,
        }
        match self.direction {
            Some(SortDirection::Asc) => out.push_str(" ASC"),
            Some(SortDirection::Desc) => out.push_str(" DESC"),
            None => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            expr: self.expr.snapshot()?,
            collation: self.collation.clone(),
            direction: self.direction,
        })
    }
}

impl From<Expr> for IndexedColumn {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

/// A column name.
impl From<&str> for IndexedColumn {
    fn from(name: &str) -> Self {
        Self::new(col(name))
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct CreateIndex {
    stub: CreateIndexStub,
    table: String,
    columns: Vec<IndexedColumn>,
    where_: Option<Expr>,
}

impl CreateIndex {
    /// Make this a partial index.
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        self.where_ = Some(condition.into());
        self
    }
}

impl SqlNode for CreateIndex {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("CREATE ");
        if self.stub.unique {
            out.push_str("UNIQUE ");
        }
        out.push_str("INDEX ");
        if self.stub.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.stub.name.append_to(out)?;
        out.push_str(" ON ");
        quote_identifier(out, &self.table);
        out.push_str(" (");
        append_list(out, &self.columns)?;
        out.push(')');
        if let Some(condition) = &self.where_ {
            out.push_str(" WHERE ");
            condition.append_to(out)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            stub: self.stub.clone(),
            table: self.table.clone(),
            columns: snapshot_all(&self.columns)?,
            where_: self.where_.snapshot()?,
        })
    }
}

impl_statement!(CreateIndex, StatementKind::CreateIndex);
