//! `CREATE VIRTUAL TABLE`

use super::{StatementKind, impl_statement};
use crate::error::{QbError, QbResult};
use crate::node::SqlNode;
use crate::quote::quote_identifier_if_needed;
use crate::table::TableName;

#[derive(Debug, Clone)]
#[must_use]
pub struct VirtualTableStub {
    if_not_exists: bool,
    name: TableName,
}

pub fn create_virtual_table(name: impl Into<TableName>) -> VirtualTableStub {
    VirtualTableStub {
        if_not_exists: false,
        name: name.into(),
    }
}

impl VirtualTableStub {
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Name the implementing module, e.g. `fts5`.
    pub fn using(self, module: impl Into<String>) -> CreateVirtualTable {
        CreateVirtualTable {
            stub: self,
            module: module.into(),
        }
    }
}

/// `CREATE VIRTUAL TABLE ... USING module` without arguments.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateVirtualTable {
    stub: VirtualTableStub,
    module: String,
}

impl CreateVirtualTable {
    /// Pass module arguments verbatim. The list must not be empty.
    pub fn args<I, S>(self, args: I) -> QbResult<CreateVirtualTableArgs>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(QbError::EmptyList("module argument list"));
        }
        Ok(CreateVirtualTableArgs { base: self, args })
    }

    fn append_head(&self, out: &mut String) -> QbResult<()> {
        out.push_str("CREATE VIRTUAL TABLE ");
        if self.stub.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        self.stub.name.append_to(out)?;
        out.push_str(" USING ");
        quote_identifier_if_needed(out, &self.module);
        Ok(())
    }
}

impl SqlNode for CreateVirtualTable {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.append_head(out)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

/// `CREATE VIRTUAL TABLE ... USING module(args)`
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateVirtualTableArgs {
    base: CreateVirtualTable,
    args: Vec<String>,
}

impl SqlNode for CreateVirtualTableArgs {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.base.append_head(out)?;
        out.push('(');
        out.push_str(&self.args.join(", "));
        out.push(')');
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

impl_statement!(CreateVirtualTable, StatementKind::CreateVirtualTable);
impl_statement!(CreateVirtualTableArgs, StatementKind::CreateVirtualTable);
