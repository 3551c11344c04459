//! Single-stage maintenance statements: `ANALYZE`, `VACUUM`, `REINDEX`,
//! `ATTACH`, `DETACH` and `PRAGMA`.

use super::{StatementKind, impl_statement};
use crate::error::QbResult;
use crate::expr::Expr;
use crate::node::SqlNode;
use crate::quote::{quote_identifier, quote_identifier_if_needed};
use crate::table::TableName;

fn append_optional_target(out: &mut String, target: Option<&TableName>) -> QbResult<()> {
    if let Some(target) = target {
        out.push(' ');
        target.append_to(out)?;
    }
    Ok(())
}

// ==================== ANALYZE / REINDEX ====================

/// `ANALYZE ["schema".]["table"]`
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Analyze {
    target: Option<TableName>,
}

pub fn analyze() -> Analyze {
    Analyze::default()
}

impl Analyze {
    /// Schema, table or index to analyze. A bare name may be either a schema
    /// or a table; SQLite decides.
    pub fn target(mut self, target: impl Into<TableName>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl SqlNode for Analyze {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("ANALYZE");
        append_optional_target(out, self.target.as_ref())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

/// `REINDEX ["schema".]["name"]`
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Reindex {
    target: Option<TableName>,
}

pub fn reindex() -> Reindex {
    Reindex::default()
}

impl Reindex {
    /// Collation, table or index to rebuild.
    pub fn target(mut self, target: impl Into<TableName>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl SqlNode for Reindex {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("REINDEX");
        append_optional_target(out, self.target.as_ref())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

// ==================== VACUUM ====================

/// `VACUUM ["schema"] [INTO file]`
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Vacuum {
    schema: Option<String>,
    into: Option<Expr>,
}

pub fn vacuum() -> Vacuum {
    Vacuum::default()
}

impl Vacuum {
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Write the vacuumed database to `file` instead of in place.
    pub fn into_file(mut self, file: impl Into<Expr>) -> Self {
        self.into = Some(file.into());
        self
    }
}

impl SqlNode for Vacuum {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("VACUUM");
        if let Some(schema) = &self.schema {
            out.push(' ');
            quote_identifier(out, schema);
        }
        if let Some(file) = &self.into {
            out.push_str(" INTO ");
            file.append_to(out)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            schema: self.schema.clone(),
            into: self.into.snapshot()?,
        })
    }
}

// ==================== ATTACH / DETACH ====================

/// `ATTACH DATABASE file AS "schema"`
#[derive(Debug, Clone)]
#[must_use]
pub struct Attach {
    file: Expr,
    schema: String,
}

pub fn attach(file: impl Into<Expr>, schema: impl Into<String>) -> Attach {
    Attach {
        file: file.into(),
        schema: schema.into(),
    }
}

impl SqlNode for Attach {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("ATTACH DATABASE ");
        self.file.append_to(out)?;
        out.push_str(" AS ");
        quote_identifier(out, &self.schema);
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            file: self.file.snapshot()?,
            schema: self.schema.clone(),
        })
    }
}

/// `DETACH DATABASE "schema"`
#[derive(Debug, Clone)]
#[must_use]
pub struct Detach {
    schema: String,
}

pub fn detach(schema: impl Into<String>) -> Detach {
    Detach {
        schema: schema.into(),
    }
}

impl SqlNode for Detach {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("DETACH DATABASE ");
        quote_identifier(out, &self.schema);
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

// ==================== PRAGMA ====================

#[derive(Debug, Clone)]
pub enum PragmaValue {
    /// `PRAGMA name = value`
    Assign(Expr),
    /// `PRAGMA name(value)`
    Call(Expr),
}

/// `PRAGMA ["schema".]name [= value | (value)]`
#[derive(Debug, Clone)]
#[must_use]
pub struct Pragma {
    schema: Option<String>,
    name: String,
    value: Option<PragmaValue>,
}

pub fn pragma(name: impl Into<String>) -> Pragma {
    Pragma {
        schema: None,
        name: name.into(),
        value: None,
    }
}

impl Pragma {
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn set(mut self, value: impl Into<Expr>) -> Self {
        self.value = Some(PragmaValue::Assign(value.into()));
        self
    }

    pub fn call(mut self, arg: impl Into<Expr>) -> Self {
        self.value = Some(PragmaValue::Call(arg.into()));
        self
    }
}

impl SqlNode for Pragma {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("PRAGMA ");
        if let Some(schema) = &self.schema {
            quote_identifier(out, schema);
            out.push('.');
        }
        quote_identifier_if_needed(out, &self.name);
        match &self.value {
            Some(PragmaValue::Assign(value)) => {
                out.push_str(" = ");
                value.append_to(out)?;
            }
            Some(PragmaValue::Call(arg)) => {
                out.push('(');
                arg.append_to(out)?;
                out.push(')');
            }
            None => {}
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        let value = match &self.value {
            Some(PragmaValue::Assign(value)) => Some(PragmaValue::Assign(value.snapshot()?)),
            Some(PragmaValue::Call(arg)) => Some(PragmaValue::Call(arg.snapshot()?)),
            None => None,
        };
        Ok(Self {
            schema: self.schema.clone(),
            name: self.name.clone(),
            value,
        })
    }
}

impl_statement!(Analyze, StatementKind::Analyze);
impl_statement!(Reindex, StatementKind::Reindex);
impl_statement!(Vacuum, StatementKind::Vacuum);
impl_statement!(Attach, StatementKind::Attach);
impl_statement!(Detach, StatementKind::Detach);
impl_statement!(Pragma, StatementKind::Pragma);
