//! The render/snapshot protocol shared by every node kind.

use crate::error::QbResult;

/// Base trait for all SQL nodes.
///
/// A node renders itself into a caller-supplied buffer and can produce an
/// immutable snapshot of itself. Snapshots contain no placeholder slots, so
/// they render the same text forever and can be handed to other threads.
pub trait SqlNode: Sized {
    /// Append the SQL text of this node to `out`.
    ///
    /// On error `out` may hold partial output and should be discarded.
    fn append_to(&self, out: &mut String) -> QbResult<()>;

    /// Deep-copy this node, replacing every placeholder by a snapshot of its
    /// current value.
    fn snapshot(&self) -> QbResult<Self>;

    /// Render this node into a fresh string.
    fn to_sql(&self) -> QbResult<String> {
        let mut out = String::new();
        self.append_to(&mut out)?;
        Ok(out)
    }
}

impl<T: SqlNode> SqlNode for Option<T> {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            Some(node) => node.append_to(out),
            None => Ok(()),
        }
    }

    fn snapshot(&self) -> QbResult<Self> {
        self.as_ref().map(T::snapshot).transpose()
    }
}

pub(crate) fn snapshot_all<T: SqlNode>(items: &[T]) -> QbResult<Vec<T>> {
    items.iter().map(T::snapshot).collect()
}

pub(crate) fn append_list<T: SqlNode>(out: &mut String, items: &[T]) -> QbResult<()> {
    crate::quote::join_with(out, items, ", ", |out, item| item.append_to(out))
}
