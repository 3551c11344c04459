//! # sqlite-qb
//!
//! A fluent, type-safe builder for SQLite statement text.
//!
//! ## Features
//!
//! - **Typed nodes**: expressions, table expressions, result columns and
//!   statements are distinct Rust types
//! - **Correct grouping**: parentheses are added from operator precedence, so
//!   `(a + b) * c` renders as `("a" + "b") * "c"`
//! - **Templates**: [`Slot`] placeholders are read at render time;
//!   [`SqlNode::snapshot`] freezes a graph for sharing across threads
//! - **Safe quoting**: identifiers, string and blob literals and type names
//!   are always escaped
//! - **Staged builders**: only complete statements expose
//!   [`Statement::build`]
//!
//! No parsing, execution or connection handling: the output is text for your
//! SQLite driver of choice.
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let stmt = update("users")
//!     .set([("visits", col("visits") + 1)])?
//!     .where_(col("id").eq(param("?1")?));
//! assert_eq!(stmt.build()?, r#"UPDATE "users" SET "visits" = "visits" + 1 WHERE "id" = ?1"#);
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```
//!
//! Enable the `tracing` feature to log every built statement on target
//! `sqlite_qb.sql`.

pub mod column;
pub mod config;
pub mod error;
pub mod expr;
pub mod node;
pub mod param;
pub mod prelude;
pub mod quote;
pub mod select;
pub mod slot;
pub mod stmt;
pub mod table;
mod trace;

pub use column::{ResultColumn, all, all_of};
pub use config::BuildConfig;
pub use error::{QbError, QbResult};
pub use expr::{
    Expr, blob, case, col, count_star, exists, func, func_distinct, func_star, lit, null, param,
    raw, row, schema_col, subquery, table_col, text,
};
pub use node::SqlNode;
pub use param::{BindParam, NamePrefix, ParamKind};
pub use select::{OrderingTerm, Select, SelectCore, Values, cte, select, values, with, with_recursive};
pub use slot::{ColumnSlot, ExprSlot, SelectSlot, Slot, TableSlot, Text, TextSlot};
pub use stmt::{Explain, Explicable, Statement, StatementKind, explain, explain_query_plan};
pub use table::{Joinable, TableExpr, TableName, from_select, table, table_function};
