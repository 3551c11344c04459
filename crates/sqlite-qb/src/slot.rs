//! Settable placeholders for statement templates.
//!
//! A [`Slot`] is a shared cell holding at most one node. Cloning a slot
//! aliases the same cell, so a statement built around a slot renders whatever
//! the slot holds at render time:
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let filter = ExprSlot::with(col("id").eq(1));
//! let query = select([col("name")]).from(table("users")).where_(filter.clone());
//! assert_eq!(query.to_sql()?, r#"SELECT "name" FROM "users" WHERE "id" = 1"#);
//!
//! let frozen = query.snapshot()?;
//! filter.set(col("id").eq(2));
//! assert_eq!(query.to_sql()?, r#"SELECT "name" FROM "users" WHERE "id" = 2"#);
//! assert_eq!(frozen.to_sql()?, r#"SELECT "name" FROM "users" WHERE "id" = 1"#);
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```
//!
//! Slots are not meant to be mutated while another thread renders the graph
//! that contains them. Take a [`SqlNode::snapshot`] and share that instead.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{QbError, QbResult};
use crate::node::SqlNode;

/// A value that can live inside a [`Slot`].
pub trait SlotValue: Clone {
    /// Node kind named in [`QbError::UnsetPlaceholder`].
    const KIND: &'static str;

    /// Snapshot of the value (see [`SqlNode::snapshot`]).
    fn snapshot_value(&self) -> QbResult<Self>;
}

impl SlotValue for String {
    const KIND: &'static str = "text";

    fn snapshot_value(&self) -> QbResult<Self> {
        Ok(self.clone())
    }
}

/// Shared, settable placeholder cell.
pub struct Slot<T> {
    inner: Arc<RwLock<Option<T>>>,
}

/// Placeholder for an expression.
pub type ExprSlot = Slot<crate::expr::Expr>;
/// Placeholder for a table expression.
pub type TableSlot = Slot<crate::table::TableExpr>;
/// Placeholder for a result column.
pub type ColumnSlot = Slot<crate::column::ResultColumn>;
/// Placeholder for a SELECT statement.
pub type SelectSlot = Slot<crate::select::Select>;
/// Placeholder for raw character content.
pub type TextSlot = Slot<String>;

impl<T: SlotValue> Slot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a slot holding `value`.
    pub fn with(value: impl Into<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(value.into()))),
        }
    }

    /// Replace the current value.
    pub fn set(&self, value: impl Into<T>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(value.into());
    }

    /// Remove the current value.
    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Whether a value is currently set.
    pub fn is_set(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Clone of the current value, if any.
    pub fn get(&self) -> Option<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if both handles point at the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` against the current value.
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> QbResult<R>) -> QbResult<R> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(value) => f(value),
            None => Err(QbError::UnsetPlaceholder(T::KIND)),
        }
    }

    /// Snapshot of the current value. The slot itself is not part of the
    /// result.
    pub fn snapshot(&self) -> QbResult<T> {
        self.with_value(T::snapshot_value)
    }
}

impl<T: SlotValue + SqlNode> Slot<T> {
    /// Render the current value.
    pub fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.with_value(|value| value.append_to(out))
    }
}

impl<T: SlotValue> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_tuple("Slot").field(&*guard).finish()
    }
}

/// Character content that is either fixed or read from a [`TextSlot`].
#[derive(Debug, Clone)]
pub enum Text {
    Fixed(Arc<str>),
    Slot(TextSlot),
}

impl Text {
    /// Run `f` against the current characters.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> QbResult<R>) -> QbResult<R> {
        match self {
            Text::Fixed(s) => f(s),
            Text::Slot(slot) => slot.with_value(|s| f(s)),
        }
    }

    /// Fixed copy of the current characters.
    pub fn snapshot(&self) -> QbResult<Self> {
        match self {
            Text::Fixed(_) => Ok(self.clone()),
            Text::Slot(slot) => slot.with_value(|s| Ok(Text::Fixed(Arc::from(s.as_str())))),
        }
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text::Fixed(Arc::from(s))
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text::Fixed(Arc::from(s))
    }
}

impl From<TextSlot> for Text {
    fn from(slot: TextSlot) -> Self {
        Text::Slot(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_reads_slot_at_render_time() {
        let slot = TextSlot::with("one");
        let text = Text::from(slot.clone());
        let frozen = text.snapshot().unwrap();
        slot.set("two");
        assert_eq!(text.with_str(|s| Ok(s.to_string())).unwrap(), "two");
        assert_eq!(frozen.with_str(|s| Ok(s.to_string())).unwrap(), "one");
    }

    #[test]
    fn empty_slot_fails() {
        let slot = TextSlot::new();
        assert!(!slot.is_set());
        assert_eq!(slot.snapshot(), Err(QbError::UnsetPlaceholder("text")));
    }

    #[test]
    fn clones_alias_the_same_cell() {
        let a = TextSlot::with("x".to_string());
        let b = a.clone();
        b.set("y".to_string());
        assert!(a.ptr_eq(&b));
        assert_eq!(a.get().as_deref(), Some("y"));
        a.clear();
        assert!(!b.is_set());
    }

    #[test]
    fn snapshot_is_detached() {
        let slot = TextSlot::with("before".to_string());
        let snap = slot.snapshot().unwrap();
        slot.set("after".to_string());
        assert_eq!(snap, "before");
    }
}
