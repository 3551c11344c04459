//! Rendering and snapshotting of expressions.

use std::sync::Arc;

use super::{
    Between, CaseExpr, ColumnRef, Expr, FunctionArgs, FunctionCall, InExpr, InTarget, Literal,
    MatchExpr, Precedence, Raise,
};
use crate::error::QbResult;
use crate::node::{SqlNode, append_list, snapshot_all};
use crate::quote::{
    blob_literal, join_qualified_name, parenthesize_if, quote_identifier_if_needed,
    quote_type_name, string_literal,
};
use crate::slot::SlotValue;

impl Literal {
    fn precedence(&self) -> Precedence {
        match self {
            Literal::Integer(n) if *n < 0 => Precedence::UNARY,
            Literal::Real(x) if x.is_sign_negative() && !x.is_nan() => Precedence::UNARY,
            _ => Precedence::UNBREAKABLE,
        }
    }

    fn append_to(&self, out: &mut String) {
        match self {
            Literal::Null => out.push_str("NULL"),
            Literal::Bool(true) => out.push_str("TRUE"),
            Literal::Bool(false) => out.push_str("FALSE"),
            Literal::Integer(n) => out.push_str(&n.to_string()),
            Literal::Real(x) => append_real(out, *x),
            Literal::Blob(bytes) => blob_literal(out, bytes),
            Literal::CurrentTime => out.push_str("CURRENT_TIME"),
            Literal::CurrentDate => out.push_str("CURRENT_DATE"),
            Literal::CurrentTimestamp => out.push_str("CURRENT_TIMESTAMP"),
        }
    }
}

/// Reals always carry a `.` or an exponent so SQLite reads them back as REAL.
fn append_real(out: &mut String, x: f64) {
    if x.is_nan() {
        out.push_str("NULL");
    } else if x.is_infinite() {
        out.push_str(if x > 0.0 { "9e999" } else { "-9e999" });
    } else {
        // `{:?}` keeps a trailing `.0` for integral values and uses exponents
        // for very large or small magnitudes.
        out.push_str(&format!("{x:?}"));
    }
}

impl ColumnRef {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        join_qualified_name(
            out,
            &[
                self.schema.as_deref(),
                self.table.as_deref(),
                Some(self.name.as_str()),
            ],
        )
    }
}

impl Expr {
    /// Binding strength of this node; see [`Precedence`].
    ///
    /// A placeholder reports the precedence of its current value, or
    /// [`Precedence::UNBREAKABLE`] while unset (rendering it fails anyway).
    pub fn precedence(&self) -> Precedence {
        match self {
            Expr::Literal(lit) => lit.precedence(),
            Expr::Raw(_) => Precedence::RAW,
            Expr::Unary { op, .. } => op.precedence(),
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Postfix { .. } => Precedence::NOT,
            Expr::Collate { .. } => Precedence::COLLATE,
            Expr::Between(_) | Expr::In(_) | Expr::Match(_) => Precedence::EQUALITY,
            Expr::Slot(slot) => slot
                .with_value(|expr| Ok(expr.precedence()))
                .unwrap_or(Precedence::UNBREAKABLE),
            Expr::Text(_)
            | Expr::Column(_)
            | Expr::Param(_)
            | Expr::Function(_)
            | Expr::Cast { .. }
            | Expr::Row(_)
            | Expr::Raise(_)
            | Expr::Case(_)
            | Expr::Exists(_)
            | Expr::Subquery(_) => Precedence::UNBREAKABLE,
        }
    }

    /// Render as the left operand of an operator of precedence `op`.
    pub(crate) fn append_left(&self, out: &mut String, op: Precedence) -> QbResult<()> {
        parenthesize_if(out, self.precedence() < op, |out| self.append_to(out))
    }

    /// Render as the right (or only) operand of an operator of precedence `op`.
    ///
    /// Equal precedence is parenthesized as well, so same-level chains never
    /// rely on associativity.
    pub(crate) fn append_right(&self, out: &mut String, op: Precedence) -> QbResult<()> {
        parenthesize_if(out, self.precedence() <= op, |out| self.append_to(out))
    }
}

impl SqlNode for Expr {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        match self {
            Expr::Literal(lit) => lit.append_to(out),
            Expr::Text(text) => text.with_str(|s| {
                string_literal(out, s);
                Ok(())
            })?,
            Expr::Raw(text) => text.with_str(|s| {
                out.push_str(s);
                Ok(())
            })?,
            Expr::Column(column) => column.append_to(out)?,
            Expr::Param(param) => out.push_str(param.as_str()),
            Expr::Unary { op, operand } => {
                out.push_str(op.as_str());
                operand.append_right(out, op.precedence())?;
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                left.append_left(out, prec)?;
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                right.append_right(out, prec)?;
            }
            Expr::Postfix { op, operand } => {
                operand.append_right(out, Precedence::NOT)?;
                out.push(' ');
                out.push_str(op.as_str());
            }
            Expr::Function(call) => call.append_to(out)?,
            Expr::Cast { expr, type_name } => {
                out.push_str("CAST (");
                expr.append_to(out)?;
                out.push_str(" AS ");
                quote_type_name(out, type_name);
                out.push(')');
            }
            Expr::Collate { expr, collation } => {
                expr.append_left(out, Precedence::COLLATE)?;
                out.push_str(" COLLATE ");
                quote_identifier_if_needed(out, collation);
            }
            Expr::Between(between) => between.append_to(out)?,
            Expr::In(in_expr) => in_expr.append_to(out)?,
            Expr::Match(m) => m.append_to(out)?,
            Expr::Row(items) => {
                out.push('(');
                append_list(out, items)?;
                out.push(')');
            }
            Expr::Raise(raise) => raise.append_to(out),
            Expr::Case(case) => case.append_to(out)?,
            Expr::Exists(select) => {
                out.push_str("EXISTS (");
                select.append_to(out)?;
                out.push(')');
            }
            Expr::Subquery(select) => {
                out.push('(');
                select.append_to(out)?;
                out.push(')');
            }
            Expr::Slot(slot) => slot.append_to(out)?,
        }
        Ok(())
    }

    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            Expr::Literal(_) | Expr::Column(_) | Expr::Param(_) | Expr::Raise(_) => self.clone(),
            Expr::Text(text) => Expr::Text(text.snapshot()?),
            Expr::Raw(text) => Expr::Raw(text.snapshot()?),
            Expr::Unary { op, operand } => Expr::Unary {
                op: *op,
                operand: Arc::new(operand.snapshot()?),
            },
            Expr::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: Arc::new(left.snapshot()?),
                right: Arc::new(right.snapshot()?),
            },
            Expr::Postfix { op, operand } => Expr::Postfix {
                op: *op,
                operand: Arc::new(operand.snapshot()?),
            },
            Expr::Function(call) => Expr::Function(Arc::new(FunctionCall {
                name: call.name.clone(),
                args: match &call.args {
                    FunctionArgs::List(args) => FunctionArgs::List(snapshot_all(args)?),
                    FunctionArgs::Distinct(arg) => FunctionArgs::Distinct(arg.snapshot()?),
                    FunctionArgs::Star => FunctionArgs::Star,
                },
            })),
            Expr::Cast { expr, type_name } => Expr::Cast {
                expr: Arc::new(expr.snapshot()?),
                type_name: Arc::clone(type_name),
            },
            Expr::Collate { expr, collation } => Expr::Collate {
                expr: Arc::new(expr.snapshot()?),
                collation: Arc::clone(collation),
            },
            Expr::Between(b) => Expr::Between(Arc::new(Between {
                negated: b.negated,
                expr: b.expr.snapshot()?,
                low: b.low.snapshot()?,
                high: b.high.snapshot()?,
            })),
            Expr::In(i) => Expr::In(Arc::new(InExpr {
                negated: i.negated,
                expr: i.expr.snapshot()?,
                target: i.target.snapshot()?,
            })),
            Expr::Match(m) => Expr::Match(Arc::new(MatchExpr {
                op: m.op,
                negated: m.negated,
                left: m.left.snapshot()?,
                pattern: m.pattern.snapshot()?,
                escape: m.escape.snapshot()?,
            })),
            Expr::Row(items) => Expr::Row(snapshot_all(items)?.into()),
            Expr::Case(case) => Expr::Case(Arc::new(CaseExpr {
                base: case.base.snapshot()?,
                branches: case
                    .branches
                    .iter()
                    .map(|(when, then)| Ok((when.snapshot()?, then.snapshot()?)))
                    .collect::<QbResult<_>>()?,
                otherwise: case.otherwise.snapshot()?,
            })),
            Expr::Exists(select) => Expr::Exists(select.snapshot()?),
            Expr::Subquery(select) => Expr::Subquery(select.snapshot()?),
            Expr::Slot(slot) => slot.snapshot()?,
        })
    }
}

impl SlotValue for Expr {
    const KIND: &'static str = "expression";

    fn snapshot_value(&self) -> QbResult<Self> {
        self.snapshot()
    }
}

impl FunctionCall {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        quote_identifier_if_needed(out, &self.name);
        out.push('(');
        match &self.args {
            FunctionArgs::List(args) => append_list(out, args)?,
            FunctionArgs::Distinct(arg) => {
                out.push_str("DISTINCT ");
                arg.append_to(out)?;
            }
            FunctionArgs::Star => out.push('*'),
        }
        out.push(')');
        Ok(())
    }
}

impl Between {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.expr.append_left(out, Precedence::EQUALITY)?;
        out.push_str(if self.negated { " NOT BETWEEN " } else { " BETWEEN " });
        self.low.append_right(out, Precedence::EQUALITY)?;
        out.push_str(" AND ");
        self.high.append_right(out, Precedence::EQUALITY)
    }
}

impl InExpr {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.expr.append_left(out, Precedence::EQUALITY)?;
        out.push_str(if self.negated { " NOT IN " } else { " IN " });
        match &self.target {
            InTarget::Row(items) => {
                out.push('(');
                append_list(out, items)?;
                out.push(')');
            }
            InTarget::Select(select) => {
                out.push('(');
                select.append_to(out)?;
                out.push(')');
            }
            InTarget::Table(name) => name.append_to(out)?,
            InTarget::TableFunction { name, args } => {
                name.append_to(out)?;
                out.push('(');
                append_list(out, args)?;
                out.push(')');
            }
        }
        Ok(())
    }
}

impl InTarget {
    fn snapshot(&self) -> QbResult<Self> {
        Ok(match self {
            InTarget::Row(items) => InTarget::Row(snapshot_all(items)?),
            InTarget::Select(select) => InTarget::Select(select.snapshot()?),
            InTarget::Table(name) => InTarget::Table(name.clone()),
            InTarget::TableFunction { name, args } => InTarget::TableFunction {
                name: name.clone(),
                args: snapshot_all(args)?,
            },
        })
    }
}

impl MatchExpr {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        self.left.append_left(out, Precedence::EQUALITY)?;
        out.push(' ');
        if self.negated {
            out.push_str("NOT ");
        }
        out.push_str(self.op.as_str());
        out.push(' ');
        self.pattern.append_right(out, Precedence::EQUALITY)?;
        if let Some(escape) = &self.escape {
            out.push_str(" ESCAPE ");
            escape.append_right(out, Precedence::EQUALITY)?;
        }
        Ok(())
    }
}

impl Raise {
    fn append_to(&self, out: &mut String) {
        let (action, message) = match self {
            Raise::Ignore => {
                out.push_str("RAISE(IGNORE)");
                return;
            }
            Raise::Rollback(message) => ("ROLLBACK", message),
            Raise::Abort(message) => ("ABORT", message),
            Raise::Fail(message) => ("FAIL", message),
        };
        out.push_str("RAISE(");
        out.push_str(action);
        out.push_str(", ");
        string_literal(out, message);
        out.push(')');
    }
}

impl CaseExpr {
    fn append_to(&self, out: &mut String) -> QbResult<()> {
        out.push_str("CASE");
        if let Some(base) = &self.base {
            out.push(' ');
            base.append_to(out)?;
        }
        for (when, then) in &self.branches {
            out.push_str(" WHEN ");
            when.append_to(out)?;
            out.push_str(" THEN ");
            then.append_to(out)?;
        }
        if let Some(otherwise) = &self.otherwise {
            out.push_str(" ELSE ");
            otherwise.append_to(out)?;
        }
        out.push_str(" END");
        Ok(())
    }
}
