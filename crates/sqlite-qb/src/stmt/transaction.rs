//! Transaction control text. Nothing here talks to a database.

use super::{StatementKind, impl_statement};
use crate::error::QbResult;
use crate::node::SqlNode;
use crate::quote::quote_identifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionMode {
    Deferred,
    Immediate,
    Exclusive,
}

impl TransactionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionMode::Deferred => "DEFERRED",
            TransactionMode::Immediate => "IMMEDIATE",
            TransactionMode::Exclusive => "EXCLUSIVE",
        }
    }
}

/// `BEGIN [mode] TRANSACTION`
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct Begin {
    mode: Option<TransactionMode>,
}

pub fn begin() -> Begin {
    Begin::default()
}

impl Begin {
    pub fn mode(mut self, mode: TransactionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn deferred(self) -> Self {
        self.mode(TransactionMode::Deferred)
    }

    pub fn immediate(self) -> Self {
        self.mode(TransactionMode::Immediate)
    }

    pub fn exclusive(self) -> Self {
        self.mode(TransactionMode::Exclusive)
    }
}

impl SqlNode for Begin {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("BEGIN ");
        if let Some(mode) = self.mode {
            out.push_str(mode.as_str());
            out.push(' ');
        }
        out.push_str("TRANSACTION");
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(*self)
    }
}

/// `COMMIT TRANSACTION`
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct Commit;

pub fn commit() -> Commit {
    Commit
}

impl SqlNode for Commit {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("COMMIT TRANSACTION");
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Commit)
    }
}

/// `ROLLBACK TRANSACTION [TO SAVEPOINT "name"]`
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Rollback {
    savepoint: Option<String>,
}

pub fn rollback() -> Rollback {
    Rollback::default()
}

impl Rollback {
    pub fn to_savepoint(mut self, name: impl Into<String>) -> Self {
        self.savepoint = Some(name.into());
        self
    }
}

impl SqlNode for Rollback {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("ROLLBACK TRANSACTION");
        if let Some(name) = &self.savepoint {
            out.push_str(" TO SAVEPOINT ");
            quote_identifier(out, name);
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

/// `SAVEPOINT "name"`
#[derive(Debug, Clone)]
#[must_use]
pub struct Savepoint {
    name: String,
}

pub fn savepoint(name: impl Into<String>) -> Savepoint {
    Savepoint { name: name.into() }
}

impl SqlNode for Savepoint {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("SAVEPOINT ");
        quote_identifier(out, &self.name);
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

/// `RELEASE SAVEPOINT "name"`
#[derive(Debug, Clone)]
#[must_use]
pub struct Release {
    name: String,
}

pub fn release(name: impl Into<String>) -> Release {
    Release { name: name.into() }
}

impl SqlNode for Release {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("RELEASE SAVEPOINT ");
        quote_identifier(out, &self.name);
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

impl_statement!(Begin, StatementKind::Begin);
impl_statement!(Commit, StatementKind::Commit);
impl_statement!(Rollback, StatementKind::Rollback);
impl_statement!(Savepoint, StatementKind::Savepoint);
impl_statement!(Release, StatementKind::Release);
