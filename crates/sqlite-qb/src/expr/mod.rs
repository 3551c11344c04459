//! Expression nodes.
//!
//! [`Expr`] covers every scalar or row value SQLite accepts: literals, column
//! references, parameters, operators, calls, `CAST`, `COLLATE`, `BETWEEN`,
//! `IN`, pattern matching, rows, `RAISE`, `CASE`, sub-selects and settable
//! placeholders.
//!
//! Operators are composed through `std::ops` where Rust has one, and through
//! named methods otherwise. Parentheses are inserted at render time based on
//! [`Precedence`], so the tree you build is the query you get:
//!
//! ```
//! use sqlite_qb::prelude::*;
//!
//! let grouped = (col("a") + col("b")) * col("c");
//! assert_eq!(grouped.to_sql()?, r#"("a" + "b") * "c""#);
//!
//! let natural = col("a") + col("b") * col("c");
//! assert_eq!(natural.to_sql()?, r#""a" + "b" * "c""#);
//! # Ok::<(), sqlite_qb::QbError>(())
//! ```

mod op;
mod render;

use std::sync::Arc;

pub use op::{BinaryOp, MatchOp, PostfixOp, Precedence, UnaryOp};

use crate::error::{QbError, QbResult};
use crate::param::BindParam;
use crate::select::SelectSource;
use crate::slot::{ExprSlot, Text};
use crate::table::TableName;

/// Literal values that need no escaping beyond number formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Blob(Arc<[u8]>),
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
}

/// A possibly qualified column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub schema: Option<String>,
    pub table: Option<String>,
    pub name: String,
}

/// Arguments of a function call.
#[derive(Debug, Clone)]
pub enum FunctionArgs {
    /// `f(a, b)` or `f()`
    List(Vec<Expr>),
    /// `f(DISTINCT a)`
    Distinct(Expr),
    /// `f(*)`
    Star,
}

#[derive(Debug, Clone)]
pub struct FunctionCall {
    pub name: String,
    pub args: FunctionArgs,
}

#[derive(Debug, Clone)]
pub struct Between {
    pub negated: bool,
    pub expr: Expr,
    pub low: Expr,
    pub high: Expr,
}

/// Right-hand side of `IN`.
#[derive(Debug, Clone)]
pub enum InTarget {
    /// `(a, b, c)`; may be empty.
    Row(Vec<Expr>),
    /// `(SELECT ...)`
    Select(SelectSource),
    /// `"schema"."table"`
    Table(TableName),
    /// `"schema"."func"(args)`
    TableFunction { name: TableName, args: Vec<Expr> },
}

#[derive(Debug, Clone)]
pub struct InExpr {
    pub negated: bool,
    pub expr: Expr,
    pub target: InTarget,
}

#[derive(Debug, Clone)]
pub struct MatchExpr {
    pub op: MatchOp,
    pub negated: bool,
    pub left: Expr,
    pub pattern: Expr,
    pub escape: Option<Expr>,
}

/// `RAISE(...)` inside trigger programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raise {
    Ignore,
    Rollback(String),
    Abort(String),
    Fail(String),
}

#[derive(Debug, Clone)]
pub struct CaseExpr {
    pub base: Option<Expr>,
    pub branches: Vec<(Expr, Expr)>,
    pub otherwise: Option<Expr>,
}

/// Expression node.
///
/// Cloning is cheap: children are shared through `Arc`.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    /// `'...'` string literal.
    Text(Text),
    /// Raw SQL fragment, emitted verbatim.
    Raw(Text),
    Column(Arc<ColumnRef>),
    Param(BindParam),
    Unary {
        op: UnaryOp,
        operand: Arc<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Arc<Expr>,
        right: Arc<Expr>,
    },
    Postfix {
        op: PostfixOp,
        operand: Arc<Expr>,
    },
    Function(Arc<FunctionCall>),
    Cast {
        expr: Arc<Expr>,
        type_name: Arc<str>,
    },
    Collate {
        expr: Arc<Expr>,
        collation: Arc<str>,
    },
    Between(Arc<Between>),
    In(Arc<InExpr>),
    Match(Arc<MatchExpr>),
    /// `(a, b)`; never empty.
    Row(Arc<[Expr]>),
    Raise(Raise),
    Case(Arc<CaseExpr>),
    Exists(SelectSource),
    Subquery(SelectSource),
    Slot(ExprSlot),
}

// ==================== Constructors ====================

/// Column reference: `"name"`.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column(Arc::new(ColumnRef {
        schema: None,
        table: None,
        name: name.into(),
    }))
}

/// Table-qualified column reference: `"table"."name"`.
pub fn table_col(table: impl Into<String>, name: impl Into<String>) -> Expr {
    Expr::Column(Arc::new(ColumnRef {
        schema: None,
        table: Some(table.into()),
        name: name.into(),
    }))
}

/// Fully qualified column reference: `"schema"."table"."name"`.
pub fn schema_col(
    schema: impl Into<String>,
    table: impl Into<String>,
    name: impl Into<String>,
) -> Expr {
    Expr::Column(Arc::new(ColumnRef {
        schema: Some(schema.into()),
        table: Some(table.into()),
        name: name.into(),
    }))
}

/// Literal from any convertible value: `lit(5)`, `lit(2.5)`, `lit(true)`.
pub fn lit(value: impl Into<Expr>) -> Expr {
    value.into()
}

/// String literal; accepts a [`TextSlot`](crate::TextSlot) for late binding.
pub fn text(value: impl Into<Text>) -> Expr {
    Expr::Text(value.into())
}

/// Raw SQL fragment; always parenthesized when used as an operand.
pub fn raw(sql: impl Into<Text>) -> Expr {
    Expr::Raw(sql.into())
}

pub fn null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// Blob literal: `X'..'`.
pub fn blob(bytes: impl AsRef<[u8]>) -> Expr {
    Expr::Literal(Literal::Blob(Arc::from(bytes.as_ref())))
}

/// Validated binding parameter.
pub fn param(marker: &str) -> QbResult<Expr> {
    BindParam::new(marker).map(Expr::Param)
}

/// Function call: `name(args...)`.
pub fn func(name: impl Into<String>, args: impl IntoIterator<Item = impl Into<Expr>>) -> Expr {
    Expr::Function(Arc::new(FunctionCall {
        name: name.into(),
        args: FunctionArgs::List(args.into_iter().map(Into::into).collect()),
    }))
}

/// Aggregate over distinct values: `name(DISTINCT arg)`.
///
/// Fails unless exactly one argument is given.
pub fn func_distinct(
    name: impl Into<String>,
    args: impl IntoIterator<Item = impl Into<Expr>>,
) -> QbResult<Expr> {
    let mut args: Vec<Expr> = args.into_iter().map(Into::into).collect();
    if args.len() != 1 {
        return Err(QbError::DistinctArity(args.len()));
    }
    let arg = args.remove(0);
    Ok(Expr::Function(Arc::new(FunctionCall {
        name: name.into(),
        args: FunctionArgs::Distinct(arg),
    })))
}

/// Star call such as `count(*)`.
pub fn func_star(name: impl Into<String>) -> Expr {
    Expr::Function(Arc::new(FunctionCall {
        name: name.into(),
        args: FunctionArgs::Star,
    }))
}

/// `count(*)`
pub fn count_star() -> Expr {
    func_star("count")
}

/// Row value `(a, b, ...)`; fails on zero elements.
pub fn row(items: impl IntoIterator<Item = impl Into<Expr>>) -> QbResult<Expr> {
    let items: Vec<Expr> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(QbError::EmptyList("row expression"));
    }
    Ok(Expr::Row(items.into()))
}

/// `EXISTS (select)`
pub fn exists(select: impl Into<SelectSource>) -> Expr {
    Expr::Exists(select.into())
}

/// Scalar sub-select: `(select)`.
pub fn subquery(select: impl Into<SelectSource>) -> Expr {
    Expr::Subquery(select.into())
}

/// Start a `CASE` expression. Pass `Some(base)` for the `CASE base WHEN ..` form.
pub fn case(base: Option<Expr>) -> CaseBuilder {
    CaseBuilder {
        base,
        branches: Vec::new(),
        otherwise: None,
    }
}

/// Builder for `CASE` expressions.
#[derive(Debug, Clone)]
#[must_use]
pub struct CaseBuilder {
    base: Option<Expr>,
    branches: Vec<(Expr, Expr)>,
    otherwise: Option<Expr>,
}

impl CaseBuilder {
    /// Add a `WHEN condition THEN result` branch.
    pub fn when(mut self, condition: impl Into<Expr>, result: impl Into<Expr>) -> Self {
        self.branches.push((condition.into(), result.into()));
        self
    }

    /// Set the `ELSE` result.
    pub fn otherwise(mut self, result: impl Into<Expr>) -> Self {
        self.otherwise = Some(result.into());
        self
    }

    /// Finish the expression; fails without any `WHEN` branch.
    pub fn end(self) -> QbResult<Expr> {
        if self.branches.is_empty() {
            return Err(QbError::EmptyList("CASE branch list"));
        }
        Ok(Expr::Case(Arc::new(CaseExpr {
            base: self.base,
            branches: self.branches,
            otherwise: self.otherwise,
        })))
    }
}

impl Expr {
    pub fn current_time() -> Self {
        Expr::Literal(Literal::CurrentTime)
    }

    pub fn current_date() -> Self {
        Expr::Literal(Literal::CurrentDate)
    }

    pub fn current_timestamp() -> Self {
        Expr::Literal(Literal::CurrentTimestamp)
    }

    pub fn raise_ignore() -> Self {
        Expr::Raise(Raise::Ignore)
    }

    pub fn raise_rollback(message: impl Into<String>) -> Self {
        Expr::Raise(Raise::Rollback(message.into()))
    }

    pub fn raise_abort(message: impl Into<String>) -> Self {
        Expr::Raise(Raise::Abort(message.into()))
    }

    pub fn raise_fail(message: impl Into<String>) -> Self {
        Expr::Raise(Raise::Fail(message.into()))
    }

    // ==================== Operators ====================

    /// Build `self <op> rhs`.
    pub fn binary(self, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::Binary {
            op,
            left: Arc::new(self),
            right: Arc::new(rhs.into()),
        }
    }

    /// Build `<op> self`.
    pub fn unary(self, op: UnaryOp) -> Expr {
        Expr::Unary {
            op,
            operand: Arc::new(self),
        }
    }

    fn postfix(self, op: PostfixOp) -> Expr {
        Expr::Postfix {
            op,
            operand: Arc::new(self),
        }
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Eq, rhs)
    }

    pub fn ne(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Ne, rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Lt, rhs)
    }

    pub fn le(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Le, rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Gt, rhs)
    }

    pub fn ge(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Ge, rhs)
    }

    pub fn is(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Is, rhs)
    }

    pub fn is_not(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::IsNot, rhs)
    }

    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::And, rhs)
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Or, rhs)
    }

    /// `self || rhs`
    pub fn concat(self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Concat, rhs)
    }

    /// JSON `self -> path`
    pub fn extract(self, path: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Extract, path)
    }

    /// JSON `self ->> path`
    pub fn extract_text(self, path: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::ExtractText, path)
    }

    /// `~self`
    pub fn bit_not(self) -> Expr {
        self.unary(UnaryOp::BitNot)
    }

    /// `+self`
    pub fn unary_plus(self) -> Expr {
        self.unary(UnaryOp::Plus)
    }

    /// `self ISNULL`
    pub fn is_null(self) -> Expr {
        self.postfix(PostfixOp::IsNull)
    }

    /// `self NOTNULL`
    pub fn not_null(self) -> Expr {
        self.postfix(PostfixOp::NotNull)
    }

    /// `self NOT NULL`
    pub fn not_space_null(self) -> Expr {
        self.postfix(PostfixOp::NotSpaceNull)
    }

    fn between_impl(self, negated: bool, low: Expr, high: Expr) -> Expr {
        Expr::Between(Arc::new(Between {
            negated,
            expr: self,
            low,
            high,
        }))
    }

    /// `self BETWEEN low AND high`
    pub fn between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        self.between_impl(false, low.into(), high.into())
    }

    /// `self NOT BETWEEN low AND high`
    pub fn not_between(self, low: impl Into<Expr>, high: impl Into<Expr>) -> Expr {
        self.between_impl(true, low.into(), high.into())
    }

    fn in_impl(self, negated: bool, target: InTarget) -> Expr {
        Expr::In(Arc::new(InExpr {
            negated,
            expr: self,
            target,
        }))
    }

    /// `self IN (a, b, ...)`; an empty list renders `IN ()`.
    pub fn in_list(self, items: impl IntoIterator<Item = impl Into<Expr>>) -> Expr {
        let items = items.into_iter().map(Into::into).collect();
        self.in_impl(false, InTarget::Row(items))
    }

    /// `self NOT IN (a, b, ...)`
    pub fn not_in_list(self, items: impl IntoIterator<Item = impl Into<Expr>>) -> Expr {
        let items = items.into_iter().map(Into::into).collect();
        self.in_impl(true, InTarget::Row(items))
    }

    /// `self IN (SELECT ...)`
    pub fn in_select(self, select: impl Into<SelectSource>) -> Expr {
        self.in_impl(false, InTarget::Select(select.into()))
    }

    /// `self NOT IN (SELECT ...)`
    pub fn not_in_select(self, select: impl Into<SelectSource>) -> Expr {
        self.in_impl(true, InTarget::Select(select.into()))
    }

    /// `self IN "table"`
    pub fn in_table(self, table: impl Into<TableName>) -> Expr {
        self.in_impl(false, InTarget::Table(table.into()))
    }

    /// `self NOT IN "table"`
    pub fn not_in_table(self, table: impl Into<TableName>) -> Expr {
        self.in_impl(true, InTarget::Table(table.into()))
    }

    /// `self IN "func"(args)`
    pub fn in_table_function(
        self,
        name: impl Into<TableName>,
        args: impl IntoIterator<Item = impl Into<Expr>>,
    ) -> Expr {
        let args = args.into_iter().map(Into::into).collect();
        self.in_impl(
            false,
            InTarget::TableFunction {
                name: name.into(),
                args,
            },
        )
    }

    /// `self NOT IN "func"(args)`
    pub fn not_in_table_function(
        self,
        name: impl Into<TableName>,
        args: impl IntoIterator<Item = impl Into<Expr>>,
    ) -> Expr {
        let args = args.into_iter().map(Into::into).collect();
        self.in_impl(
            true,
            InTarget::TableFunction {
                name: name.into(),
                args,
            },
        )
    }

    fn match_impl(self, op: MatchOp, negated: bool, pattern: Expr) -> Expr {
        Expr::Match(Arc::new(MatchExpr {
            op,
            negated,
            left: self,
            pattern,
            escape: None,
        }))
    }

    pub fn like(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Like, false, pattern.into())
    }

    pub fn not_like(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Like, true, pattern.into())
    }

    pub fn glob(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Glob, false, pattern.into())
    }

    pub fn not_glob(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Glob, true, pattern.into())
    }

    pub fn regexp(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Regexp, false, pattern.into())
    }

    pub fn not_regexp(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Regexp, true, pattern.into())
    }

    /// `self MATCH pattern`
    pub fn matches(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Match, false, pattern.into())
    }

    pub fn not_matches(self, pattern: impl Into<Expr>) -> Expr {
        self.match_impl(MatchOp::Match, true, pattern.into())
    }

    /// Attach an `ESCAPE` clause to a pattern-matching expression.
    ///
    /// Fails if `self` is not a `LIKE`/`GLOB`/`REGEXP`/`MATCH` expression.
    pub fn escape(self, escape: impl Into<Expr>) -> QbResult<Expr> {
        match self {
            Expr::Match(m) => {
                let mut m = Arc::unwrap_or_clone(m);
                m.escape = Some(escape.into());
                Ok(Expr::Match(Arc::new(m)))
            }
            _ => Err(QbError::validation(
                "ESCAPE only applies to LIKE, GLOB, REGEXP or MATCH",
            )),
        }
    }

    /// `CAST (self AS type_name)`
    pub fn cast(self, type_name: &str) -> Expr {
        Expr::Cast {
            expr: Arc::new(self),
            type_name: Arc::from(type_name),
        }
    }

    /// `self COLLATE collation`
    pub fn collate(self, collation: &str) -> Expr {
        Expr::Collate {
            expr: Arc::new(self),
            collation: Arc::from(collation),
        }
    }

    /// Use this expression as a result column with an alias.
    pub fn alias(self, alias: impl Into<String>) -> crate::column::ResultColumn {
        crate::column::ResultColumn::Aliased {
            expr: self,
            alias: alias.into(),
        }
    }

    /// Order by this expression ascending.
    pub fn asc(self) -> crate::select::OrderingTerm {
        crate::select::OrderingTerm::new(self).asc()
    }

    /// Order by this expression descending.
    pub fn desc(self) -> crate::select::OrderingTerm {
        crate::select::OrderingTerm::new(self).desc()
    }
}

// ==================== std::ops ====================

macro_rules! impl_binary_ops {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<R: Into<Expr>> std::ops::$trait<R> for Expr {
                type Output = Expr;

                fn $method(self, rhs: R) -> Expr {
                    self.binary(BinaryOp::$op, rhs)
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Rem,
    Shl::shl => Shl,
    Shr::shr => Shr,
    BitAnd::bitand => BitAnd,
    BitOr::bitor => BitOr,
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self.unary(UnaryOp::Minus)
    }
}

/// `!expr` builds SQL `NOT expr`.
impl std::ops::Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.unary(UnaryOp::Not)
    }
}

// ==================== Conversions ====================

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Literal(Literal::Integer(n))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Literal(Literal::Integer(n.into()))
    }
}

impl From<u32> for Expr {
    fn from(n: u32) -> Self {
        Expr::Literal(Literal::Integer(n.into()))
    }
}

impl From<f64> for Expr {
    fn from(x: f64) -> Self {
        Expr::Literal(Literal::Real(x))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }
}

/// String slices become string literals, not column names.
impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        text(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        text(s)
    }
}

impl From<Vec<u8>> for Expr {
    fn from(bytes: Vec<u8>) -> Self {
        Expr::Literal(Literal::Blob(bytes.into()))
    }
}

impl From<BindParam> for Expr {
    fn from(param: BindParam) -> Self {
        Expr::Param(param)
    }
}

impl From<ExprSlot> for Expr {
    fn from(slot: ExprSlot) -> Self {
        Expr::Slot(slot)
    }
}

impl From<crate::select::Select> for Expr {
    fn from(select: crate::select::Select) -> Self {
        subquery(select)
    }
}

impl<T: Into<Expr>> From<Option<T>> for Expr {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(null, Into::into)
    }
}

#[cfg(test)]
mod tests;
