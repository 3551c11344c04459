//! Complete statements and their staged builders.
//!
//! Each statement family starts from a stub (`create_view("v")`,
//! `insert_into("t")`, ...) and moves through consuming stage methods. Only
//! stages that form a valid statement implement [`Statement`].
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let stmt = create_view(("main", "active_users"))
//!     .if_not_exists()
//!     .as_select(select([col("id")]).from(table("users")).where_(col("active")));
//! assert_eq!(
//!     stmt.build()?,
//!     r#"CREATE VIEW IF NOT EXISTS "main"."active_users" AS SELECT "id" FROM "users" WHERE "active""#
//! );
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```

mod delete;
mod drop;
mod index;
mod insert;
mod transaction;
mod update;
mod utility;
mod view;
mod vtab;

/// Implement [`Statement`] and [`Explicable`] for a complete stage.
macro_rules! impl_statement {
    ($ty:ty, $kind:expr) => {
        impl $crate::stmt::Statement for $ty {
            fn kind(&self) -> $crate::stmt::StatementKind {
                $kind
            }
        }

        impl $crate::stmt::Explicable for $ty {}
    };
}
pub(crate) use impl_statement;

pub use delete::{Delete, delete_from};
pub use drop::{
    DropIndex, DropObject, DropTable, DropTrigger, DropView, IndexObject, ObjectKind, TableObject,
    TriggerObject, ViewObject, drop_index, drop_table, drop_trigger, drop_view,
};
pub use index::{CreateIndex, CreateIndexStub, IndexedColumn, create_index, create_unique_index};
pub use insert::{
    ConflictAction, ConflictTarget, Insert, InsertSource, InsertStub, OnConflict, ReplaceStub,
    Upsert, excluded, insert_into, replace_into,
};
pub use transaction::{
    Begin, Commit, Release, Rollback, Savepoint, TransactionMode, begin, commit, release,
    rollback, savepoint,
};
pub use update::{Update, UpdateStub, update};
pub use utility::{
    Analyze, Attach, Detach, Pragma, PragmaValue, Reindex, Vacuum, analyze, attach, detach,
    pragma, reindex, vacuum,
};
pub use view::{CreateView, CreateViewColumns, CreateViewStub, create_temp_view, create_view};
pub use vtab::{CreateVirtualTable, CreateVirtualTableArgs, VirtualTableStub, create_virtual_table};

use crate::column::ResultColumn;
use crate::config::BuildConfig;
use crate::error::QbResult;
use crate::node::{SqlNode, append_list};
use crate::trace;

/// Statement family, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    CreateView,
    CreateVirtualTable,
    CreateIndex,
    DropIndex,
    DropTable,
    DropTrigger,
    DropView,
    Insert,
    Replace,
    Update,
    Delete,
    Analyze,
    Vacuum,
    Reindex,
    Attach,
    Detach,
    Pragma,
    Begin,
    Commit,
    Rollback,
    Savepoint,
    Release,
    Explain,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::CreateView => "CREATE VIEW",
            StatementKind::CreateVirtualTable => "CREATE VIRTUAL TABLE",
            StatementKind::CreateIndex => "CREATE INDEX",
            StatementKind::DropIndex => "DROP INDEX",
            StatementKind::DropTable => "DROP TABLE",
            StatementKind::DropTrigger => "DROP TRIGGER",
            StatementKind::DropView => "DROP VIEW",
            StatementKind::Insert => "INSERT",
            StatementKind::Replace => "REPLACE",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Analyze => "ANALYZE",
            StatementKind::Vacuum => "VACUUM",
            StatementKind::Reindex => "REINDEX",
            StatementKind::Attach => "ATTACH",
            StatementKind::Detach => "DETACH",
            StatementKind::Pragma => "PRAGMA",
            StatementKind::Begin => "BEGIN",
            StatementKind::Commit => "COMMIT",
            StatementKind::Rollback => "ROLLBACK",
            StatementKind::Savepoint => "SAVEPOINT",
            StatementKind::Release => "RELEASE",
            StatementKind::Explain => "EXPLAIN",
        }
    }
}

/// A complete, renderable SQL statement.
pub trait Statement: SqlNode {
    fn kind(&self) -> StatementKind;

    /// Render with [`BuildConfig::default`].
    fn build(&self) -> QbResult<String> {
        self.build_with(&BuildConfig::default())
    }

    /// Render into a fresh buffer and emit a `sqlite_qb.sql` event.
    fn build_with(&self, config: &BuildConfig) -> QbResult<String> {
        let mut out = String::with_capacity(config.initial_capacity);
        match self.append_to(&mut out) {
            Ok(()) => {
                trace::built(config, self.kind(), &out);
                Ok(out)
            }
            Err(error) => {
                trace::failed(config, self.kind(), &error);
                Err(error)
            }
        }
    }
}

/// Statements that `EXPLAIN` may wrap.
pub trait Explicable: Statement {}

/// `EXPLAIN [QUERY PLAN] <statement>`
#[derive(Debug, Clone)]
#[must_use]
pub struct Explain<S> {
    query_plan: bool,
    statement: S,
}

pub fn explain<S: Explicable>(statement: S) -> Explain<S> {
    Explain {
        query_plan: false,
        statement,
    }
}

pub fn explain_query_plan<S: Explicable>(statement: S) -> Explain<S> {
    Explain {
        query_plan: true,
        statement,
    }
}

impl<S> Explain<S> {
    pub fn inner(&self) -> &S {
        &self.statement
    }
}

impl<S: Explicable> SqlNode for Explain<S> {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str(if self.query_plan {
            "EXPLAIN QUERY PLAN "
        } else {
            "EXPLAIN "
        });
        self.statement.append_to(out)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            query_plan: self.query_plan,
            statement: self.statement.snapshot()?,
        })
    }
}

impl<S: Explicable> Statement for Explain<S> {
    fn kind(&self) -> StatementKind {
        StatementKind::Explain
    }
}

/// Write ` RETURNING ...` when `columns` is non-empty.
pub(crate) fn append_returning(out: &mut String, columns: &[ResultColumn]) -> QbResult<()> {
    if !columns.is_empty() {
        out.push_str(" RETURNING ");
        append_list(out, columns)?;
    }
    Ok(())
}
