//! Convenient imports for typical `sqlite-qb` usage.
//!
//! ```
//! use sqlite_qb::prelude::*;
//! ```

pub use crate::{
    BindParam, BuildConfig, ColumnSlot, Explicable, Expr, ExprSlot, Joinable, OrderingTerm, QbError,
    QbResult, ResultColumn, Select, SelectCore, SelectSlot, SqlNode, Statement, TableExpr,
    TableName, TableSlot, TextSlot, Values,
};
pub use crate::{
    all, all_of, blob, case, col, count_star, cte, exists, explain, explain_query_plan,
    from_select, func, func_distinct, func_star, lit, null, param, raw, row, schema_col, select,
    subquery, table, table_col, table_function, text, values, with, with_recursive,
};
pub use crate::stmt::{
    ConflictAction, ConflictTarget, IndexedColumn, OnConflict, TransactionMode, analyze, attach,
    begin, commit, create_index, create_temp_view, create_unique_index, create_view,
    create_virtual_table, delete_from, detach, drop_index, drop_table, drop_trigger, drop_view,
    excluded, insert_into, pragma, reindex, release, replace_into, rollback, savepoint, update,
    vacuum,
};
