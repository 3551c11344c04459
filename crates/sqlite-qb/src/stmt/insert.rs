//! `INSERT` / `REPLACE`, with upsert clauses and `RETURNING`.
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let stmt = insert_into("users")
//!     .columns(["email", "name"])
//!     .values(values([[text("a@b.c"), text("Ann")]])?)
//!     .on_conflict(ConflictTarget::new(["email"])?.do_update([("name", excluded("name"))])?)
//!     .returning([col("id")]);
//! assert_eq!(
//!     stmt.build()?,
//!     r#"INSERT INTO "users" ("email", "name") VALUES ('a@b.c', 'Ann') ON CONFLICT ("email") DO UPDATE SET "name" = "excluded"."name" RETURNING "id""#
//! );
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```
//!
//! SQLite cannot parse an upsert directly after `INSERT ... SELECT` unless
//! the select has a `WHERE` clause; add `WHERE true` in that case.

use super::index::IndexedColumn;
use super::update::{append_assignments, assignments, snapshot_assignments};
use super::{StatementKind, append_returning};
use crate::column::ResultColumn;
use crate::error::{QbError, QbResult};
use crate::expr::{Expr, table_col};
use crate::node::{SqlNode, append_list, snapshot_all};
use crate::quote::{identifier_list, quote_identifier};
use crate::select::{SelectSource, Values};
use crate::table::TableName;

/// Conflict resolution of `INSERT OR ...` / `UPDATE OR ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictAction {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

impl ConflictAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictAction::Rollback => "ROLLBACK",
            ConflictAction::Abort => "ABORT",
            ConflictAction::Fail => "FAIL",
            ConflictAction::Ignore => "IGNORE",
            ConflictAction::Replace => "REPLACE",
        }
    }
}

/// `"excluded"."column"`, the proposed row inside `DO UPDATE`.
pub fn excluded(column: impl Into<String>) -> Expr {
    table_col("excluded", column)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Insert,
    Replace,
}

#[derive(Debug, Clone)]
#[must_use]
pub struct InsertStub {
    verb: Verb,
    or: Option<ConflictAction>,
    table: TableName,
    alias: Option<String>,
    columns: Vec<String>,
}

pub fn insert_into(table: impl Into<TableName>) -> InsertStub {
    InsertStub {
        verb: Verb::Insert,
        or: None,
        table: table.into(),
        alias: None,
        columns: Vec::new(),
    }
}

/// `REPLACE INTO`. The verb already names the conflict action, so this stub
/// has no `or`.
pub fn replace_into(table: impl Into<TableName>) -> ReplaceStub {
    ReplaceStub(InsertStub {
        verb: Verb::Replace,
        ..insert_into(table)
    })
}

impl InsertStub {
    /// `INSERT OR <action>`
    pub fn or(mut self, action: ConflictAction) -> Self {
        self.or = Some(action);
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Target column list. Empty means all columns in table order.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn values(self, rows: Values) -> Insert {
        self.with_source(InsertSource::Values(rows))
    }

    pub fn select(self, select: impl Into<SelectSource>) -> Insert {
        self.with_source(InsertSource::Select(select.into()))
    }

    pub fn default_values(self) -> Insert {
        self.with_source(InsertSource::DefaultValues)
    }

    fn with_source(self, source: InsertSource) -> Insert {
        Insert {
            stub: self,
            source,
            upserts: Vec::new(),
            returning: Vec::new(),
        }
    }
}

/// First stage of `REPLACE INTO`.
///
/// ```compile_fail
/// use sqlite_qb::prelude::*;
///
/// let _ = replace_into("t").or(ConflictAction::Ignore);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct ReplaceStub(InsertStub);

impl ReplaceStub {
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self(self.0.alias(alias))
    }

    /// Target column list. Empty means all columns in table order.
    pub fn columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(self.0.columns(columns))
    }

    pub fn values(self, rows: Values) -> Insert {
        self.0.values(rows)
    }

    pub fn select(self, select: impl Into<SelectSource>) -> Insert {
        self.0.select(select)
    }

    pub fn default_values(self) -> Insert {
        self.0.default_values()
    }
}

/// Row source of an insert.
#[derive(Debug, Clone)]
pub enum InsertSource {
    Values(Values),
    Select(SelectSource),
    DefaultValues,
}

impl SqlNode for InsertSource {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            InsertSource::Values(rows) => rows.append_to(out),
            InsertSource::Select(select) => select.append_to(out),
            InsertSource::DefaultValues => {
                out.push_str("DEFAULT VALUES");
                Ok(())
            }
        }
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            InsertSource::Values(rows) => InsertSource::Values(rows.snapshot()?),
            InsertSource::Select(select) => InsertSource::Select(select.snapshot()?),
            InsertSource::DefaultValues => InsertSource::DefaultValues,
        })
    }
}

/// `(columns) [WHERE ...]` part of `ON CONFLICT`.
#[derive(Debug, Clone)]
#[must_use]
pub struct ConflictTarget {
    columns: Vec<IndexedColumn>,
    where_: Option<Expr>,
}

impl ConflictTarget {
    /// The column list must not be empty.
    pub fn new(columns: impl IntoIterator<Item = impl Into<IndexedColumn>>) -> QbResult<Self> {
        let columns: Vec<IndexedColumn> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(QbError::EmptyList("conflict target"));
        }
        Ok(Self {
            columns,
            where_: None,
        })
    }

    /// Restrict the target to a partial index.
    pub fn where_(mut self, condition: impl Into<Expr>) -> Self {
        self.where_ = Some(condition.into());
        self
    }

    pub fn do_nothing(self) -> OnConflict {
        OnConflict {
            target: Some(self),
            action: Upsert::Nothing,
        }
    }

    pub fn do_update<C, E>(self, set: impl IntoIterator<Item = (C, E)>) -> QbResult<OnConflict>
    where
        C: Into<String>,
        E: Into<Expr>,
    {
        Ok(OnConflict {
            target: Some(self),
            action: Upsert::Update {
                set: assignments(set)?,
                where_: None,
            },
        })
    }
}

/// `DO NOTHING` / `DO UPDATE SET ... [WHERE ...]`
#[derive(Debug, Clone)]
pub enum Upsert {
    Nothing,
    Update {
        set: Vec<(String, Expr)>,
        where_: Option<Expr>,
    },
}

/// One `ON CONFLICT` clause.
#[derive(Debug, Clone)]
#[must_use]
pub struct OnConflict {
    target: Option<ConflictTarget>,
    action: Upsert,
}

impl OnConflict {
    /// Untargeted `ON CONFLICT DO NOTHING`.
    pub fn do_nothing() -> Self {
        Self {
            target: None,
            action: Upsert::Nothing,
        }
    }

    /// Untargeted `ON CONFLICT DO UPDATE`. Only valid as the last clause.
    pub fn do_update<C, E>(set: impl IntoIterator<Item = (C, E)>) -> QbResult<Self>
    where
        C: Into<String>,
        E: Into<Expr>,
    {
        Ok(Self {
            target: None,
            action: Upsert::Update {
                set: assignments(set)?,
                where_: None,
            },
        })
    }

    /// `WHERE` of a `DO UPDATE` action. Fails on `DO NOTHING`.
    pub fn where_(mut self, condition: impl Into<Expr>) -> QbResult<Self> {
        match &mut self.action {
            Upsert::Update { where_, .. } => {
                *where_ = Some(condition.into());
                Ok(self)
            }
            Upsert::Nothing => Err(QbError::validation("DO NOTHING takes no WHERE clause")),
        }
    }
}

impl SqlNode for OnConflict {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("ON CONFLICT ");
        if let Some(target) = &self.target {
            out.push('(');
            append_list(out, &target.columns)?;
            out.push_str(") ");
            if let Some(condition) = &target.where_ {
                out.push_str("WHERE ");
                condition.append_to(out)?;
                out.push(' ');
            }
        }
        match &self.action {
            Upsert::Nothing => out.push_str("DO NOTHING"),
            Upsert::Update { set, where_ } => {
                out.push_str("DO UPDATE ");
                append_assignments(out, set)?;
                if let Some(condition) = where_ {
                    out.push_str(" WHERE ");
                    condition.append_to(out)?;
                }
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        let target = match &self.target {
            Some(target) => Some(ConflictTarget {
                columns: snapshot_all(&target.columns)?,
                where_: target.where_.snapshot()?,
            }),
            None => None,
        };
        let action = match &self.action {
            Upsert::Nothing => Upsert::Nothing,
            Upsert::Update { set, where_ } => Upsert::Update {
                set: snapshot_assignments(set)?,
                where_: where_.snapshot()?,
            },
        };
        Ok(Self { target, action })
    }
}

#[derive(Debug, Clone)]
#[must_use]
pub struct Insert {
    stub: InsertStub,
    source: InsertSource,
    upserts: Vec<OnConflict>,
    returning: Vec<ResultColumn>,
}

impl Insert {
    /// Append an `ON CONFLICT` clause.
    pub fn on_conflict(mut self, clause: OnConflict) -> Self {
        self.upserts.push(clause);
        self
    }

    pub fn returning(mut self, columns: impl IntoIterator<Item = impl Into<ResultColumn>>) -> Self {
        self.returning = columns.into_iter().map(Into::into).collect();
        self
    }
}

impl SqlNode for Insert {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        let stub = &self.stub;
        out.push_str(match stub.verb {
            Verb::Insert => "INSERT ",
            Verb::Replace => "REPLACE ",
        });
        if let Some(action) = stub.or {
            out.push_str("OR ");
            out.push_str(action.as_str());
            out.push(' ');
        }
        out.push_str("INTO ");
        stub.table.append_to(out)?;
        if let Some(alias) = &stub.alias {
            out.push_str(" AS ");
            quote_identifier(out, alias);
        }
        if !stub.columns.is_empty() {
            out.push(' ');
            identifier_list(out, &stub.columns);
        }
        out.push(' ');
        self.source.append_to(out)?;
        for clause in &self.upserts {
            out.push(' ');
            clause.append_to(out)?;
        }
        append_returning(out, &self.returning)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            stub: self.stub.clone(),
            source: self.source.snapshot()?,
            upserts: snapshot_all(&self.upserts)?,
            returning: snapshot_all(&self.returning)?,
        })
    }
}

impl super::Statement for Insert {
    fn kind(&self) -> StatementKind {
        match self.stub.verb {
            Verb::Insert => StatementKind::Insert,
            Verb::Replace => StatementKind::Replace,
        }
    }
}

impl super::Explicable for Insert {}
