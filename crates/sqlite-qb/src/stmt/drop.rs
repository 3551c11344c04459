//! `DROP INDEX | TABLE | TRIGGER | VIEW`
//!
//! All four share [`DropObject`]; the object kind is a type parameter, so a
//! snapshot of a [`DropView`] is always a `DropView`.

use std::marker::PhantomData;

use super::{Explicable, Statement, StatementKind};
use crate::error::QbResult;
use crate::node::SqlNode;
use crate::table::TableName;

/// Schema object family a [`DropObject`] removes.
pub trait ObjectKind {
    const KEYWORD: &'static str;
    const STATEMENT: StatementKind;
}

macro_rules! object_kind {
    ($name:ident, $keyword:literal, $statement:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl ObjectKind for $name {
            const KEYWORD: &'static str = $keyword;
            const STATEMENT: StatementKind = StatementKind::$statement;
        }
    };
}

object_kind!(IndexObject, "INDEX", DropIndex);
object_kind!(TableObject, "TABLE", DropTable);
object_kind!(TriggerObject, "TRIGGER", DropTrigger);
object_kind!(ViewObject, "VIEW", DropView);

/// `DROP <kind> [IF EXISTS] name`
#[derive(Debug, Clone)]
#[must_use]
pub struct DropObject<K> {
    if_exists: bool,
    name: TableName,
    kind: PhantomData<K>,
}

pub type DropIndex = DropObject<IndexObject>;
pub type DropTable = DropObject<TableObject>;
pub type DropTrigger = DropObject<TriggerObject>;
pub type DropView = DropObject<ViewObject>;

impl<K: ObjectKind> DropObject<K> {
    pub fn new(name: impl Into<TableName>) -> Self {
        Self {
            if_exists: false,
            name: name.into(),
            kind: PhantomData,
        }
    }

    pub fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }
}

pub fn drop_index(name: impl Into<TableName>) -> DropIndex {
    DropObject::new(name)
}

pub fn drop_table(name: impl Into<TableName>) -> DropTable {
    DropObject::new(name)
}

pub fn drop_trigger(name: impl Into<TableName>) -> DropTrigger {
    DropObject::new(name)
}

pub fn drop_view(name: impl Into<TableName>) -> DropView {
    DropObject::new(name)
}

impl<K: ObjectKind> SqlNode for DropObject<K> {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("DROP ");
        out.push_str(K::KEYWORD);
        out.push(' ');
        if self.if_exists {
            out.push_str("IF EXISTS ");
        }
        self.name.append_to(out)
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(Self {
            if_exists: self.if_exists,
            name: self.name.clone(),
            kind: PhantomData,
        })
    }
}

impl<K: ObjectKind> Statement for DropObject<K> {
    fn kind(&self) -> StatementKind {
        K::STATEMENT
    }
}

impl<K: ObjectKind> Explicable for DropObject<K> {}
