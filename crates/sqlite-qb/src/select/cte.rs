//! Common table expressions (`WITH` clause).
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let recent = select([col("id")])
//!     .from(table("orders"))
//!     .where_(col("placed_at").gt(Expr::current_date()));
//! let query = with(cte("recent", recent).materialized())
//!     .select(select([count_star()]).from(table("recent")));
//! assert_eq!(
//!     query.to_sql()?,
//!     r#"WITH "recent" AS MATERIALIZED (SELECT "id" FROM "orders" WHERE "placed_at" > CURRENT_DATE) SELECT count(*) FROM "recent""#
//! );
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```

use super::{Select, SelectSource};
use crate::error::{QbError, QbResult};
use crate::node::{SqlNode, append_list};
use crate::quote::{identifier_list, quote_identifier};

/// `MATERIALIZED` hint of a common table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    Materialized,
    NotMaterialized,
}

/// One `name [(columns)] AS [[NOT] MATERIALIZED] (select)` definition.
#[derive(Debug, Clone)]
#[must_use]
pub struct CommonTable {
    name: String,
    columns: Option<Vec<String>>,
    materialization: Option<Materialization>,
    query: SelectSource,
}

/// Define a common table.
pub fn cte(name: impl Into<String>, query: impl Into<SelectSource>) -> CommonTable {
    CommonTable {
        name: name.into(),
        columns: None,
        materialization: None,
        query: query.into(),
    }
}

impl CommonTable {
    /// Give the table explicit column names. The list must not be empty.
    pub fn columns<I, S>(mut self, columns: I) -> QbResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(QbError::EmptyList("common table column list"));
        }
        self.columns = Some(columns);
        Ok(self)
    }

    pub fn materialized(mut self) -> Self {
        self.materialization = Some(Materialization::Materialized);
        self
    }

    pub fn not_materialized(mut self) -> Self {
        self.materialization = Some(Materialization::NotMaterialized);
        self
    }
}

impl SqlNode for CommonTable {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        quote_identifier(out, &self.name);
        if let Some(columns) = &self.columns {
            out.push(' ');
            identifier_list(out, columns);
        }
        out.push_str(" AS ");
        match self.materialization {
            Some(Materialization::Materialized) => out.push_str("MATERIALIZED "),
            Some(Materialization::NotMaterialized) => out.push_str("NOT MATERIALIZED "),
            None => {}
        }
        out.push('(');
        self.query.append_to(out)?;
        out.push(')');
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            name: self.name.clone(),
            columns: self.columns.clone(),
            materialization: self.materialization,
            query: self.query.snapshot()?,
        })
    }
}

/// A `WITH [RECURSIVE]` prefix under construction.
#[derive(Debug, Clone)]
#[must_use]
pub struct With {
    recursive: bool,
    tables: Vec<CommonTable>,
}

/// Start a `WITH` clause.
pub fn with(table: CommonTable) -> With {
    With {
        recursive: false,
        tables: vec![table],
    }
}

/// Start a `WITH RECURSIVE` clause.
pub fn with_recursive(table: CommonTable) -> With {
    With {
        recursive: true,
        tables: vec![table],
    }
}

impl With {
    /// Add another common table.
    pub fn and(mut self, table: CommonTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Mark the whole clause `RECURSIVE`.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Attach the clause to the main query.
    pub fn select(self, query: impl Into<Select>) -> Select {
        query.into().set_with(self)
    }

    /// Prepend `self` to an existing clause.
    pub(super) fn merge(mut self, other: With) -> Self {
        self.recursive |= other.recursive;
        self.tables.extend(other.tables);
        self
    }
}

impl SqlNode for With {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("WITH ");
        if self.recursive {
            out.push_str("RECURSIVE ");
        }
        append_list(out, &self.tables)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            recursive: self.recursive,
            tables: crate::node::snapshot_all(&self.tables)?,
        })
    }
}
