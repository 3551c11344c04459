//! Result columns of `SELECT` and `RETURNING`.

use crate::error::QbResult;
use crate::expr::Expr;
use crate::node::SqlNode;
use crate::quote::quote_identifier;
use crate::slot::{ColumnSlot, SlotValue};
use crate::table::TableName;

/// One item of a result column list.
#[derive(Debug, Clone)]
pub enum ResultColumn {
    Expr(Expr),
    /// `expr AS "alias"`
    Aliased { expr: Expr, alias: String },
    /// `*`
    All,
    /// `"t".*`
    AllOf(TableName),
    Slot(ColumnSlot),
}

/// `*`
pub fn all() -> ResultColumn {
    ResultColumn::All
}

/// `"table".*`
pub fn all_of(table: impl Into<TableName>) -> ResultColumn {
    ResultColumn::AllOf(table.into())
}

impl SqlNode for ResultColumn {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            ResultColumn::Expr(expr) => expr.append_to(out)?,
            ResultColumn::Aliased { expr, alias } => {
                expr.append_to(out)?;
                out.push_str(" AS ");
                quote_identifier(out, alias);
            }
            ResultColumn::All => out.push('*'),
            ResultColumn::AllOf(table) => {
                table.append_to(out)?;
                out.push_str(".*");
            }
            ResultColumn::Slot(slot) => slot.append_to(out)?,
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            ResultColumn::Expr(expr) => ResultColumn::Expr(expr.snapshot()?),
            ResultColumn::Aliased { expr, alias } => ResultColumn::Aliased {
                expr: expr.snapshot()?,
                alias: alias.clone(),
            },
            ResultColumn::All | ResultColumn::AllOf(_) => self.clone(),
            ResultColumn::Slot(slot) => slot.snapshot()?,
        })
    }
}

impl SlotValue for ResultColumn {
    const KIND: &'static str = "result column";

    fn snapshot_value(&self) -> QbResult<Self> {
        self.snapshot()
    }
}

impl From<Expr> for ResultColumn {
    fn from(expr: Expr) -> Self {
        ResultColumn::Expr(expr)
    }
}

impl From<ColumnSlot> for ResultColumn {
    fn from(slot: ColumnSlot) -> Self {
        ResultColumn::Slot(slot)
    }
}
