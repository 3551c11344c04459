//! `CREATE [TEMP] VIEW`

use super::{StatementKind, impl_statement};
use crate::error::{QbError, QbResult};
use crate::node::SqlNode;
use crate::quote::identifier_list;
use crate::select::SelectSource;
use crate::table::TableName;

/// First stage: name and flags.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateViewStub {
    temp: bool,
    if_not_exists: bool,
    name: TableName,
}

pub fn create_view(name: impl Into<TableName>) -> CreateViewStub {
    CreateViewStub {
        temp: false,
        if_not_exists: false,
        name: name.into(),
    }
}

pub fn create_temp_view(name: impl Into<TableName>) -> CreateViewStub {
    create_view(name).temp()
}

impl CreateViewStub {
    pub fn temp(mut self) -> Self {
        self.temp = true;
        self
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Name the view's columns. The list must not be empty.
    pub fn columns<I, S>(self, columns: I) -> QbResult<CreateViewColumns>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(QbError::EmptyList("view column list"));
        }
        Ok(CreateViewColumns {
            stub: self,
            columns,
        })
    }

    pub fn as_select(self, select: impl Into<SelectSource>) -> CreateView {
        CreateView {
            stub: self,
            columns: None,
            select: select.into(),
        }
    }
}

/// Second, optional stage: explicit column names.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateViewColumns {
    stub: CreateViewStub,
    columns: Vec<String>,
}

impl CreateViewColumns {
    pub fn as_select(self, select: impl Into<SelectSource>) -> CreateView {
        CreateView {
            stub: self.stub,
            columns: Some(self.columns),
            select: select.into(),
        }
    }
}

/// Complete `CREATE VIEW` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateView {
    stub: CreateViewStub,
    columns: Option<Vec<String>>,
    select: SelectSource,
}

impl SqlNode for CreateView {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("CREATE ");
        if self.stub.temp {
            out.push_str("TEMP ");
        }
        out.push_str("VIEW ");
        if self.stub.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.stub.name.append_to(out)?;
        if let Some(columns) = &self.columns {
            out.push(' ');
            identifier_list(out, columns);
        }
        out.push_str(" AS ");
        self.select.append_to(out)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            stub: self.stub.clone(),
            columns: self.columns.clone(),
            select: self.select.snapshot()?,
        })
    }
}

impl_statement!(CreateView, StatementKind::CreateView);
