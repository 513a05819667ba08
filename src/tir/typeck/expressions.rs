use crate::ast::{Expr, ExprKind, Span};
use crate::errors::Result;
use crate::registry::Type;
use crate::tir::{LogicalOp, TirExpr, TirExprKind};

use super::Typer;

impl Typer<'_> {
    pub(super) fn type_expr(&mut self, expr: &Expr) -> Result<TirExpr> {
        let span = expr.span;

        match &expr.kind {
            ExprKind::BoolLiteral(value) => Ok(TirExpr {
                kind: TirExprKind::BoolLiteral(*value),
                ty: Type::Bool,
            }),

            ExprKind::IntLiteral(value) => Ok(TirExpr {
                kind: TirExprKind::IntLiteral(*value),
                ty: Type::U256,
            }),

            ExprKind::Name(id) => {
                let binding = self
                    .lookup(id)
                    .cloned()
                    .ok_or_else(|| self.name_error(span, format!("undefined variable `{}`", id)))?;
                Ok(TirExpr {
                    kind: TirExprKind::Var(binding.slot),
                    ty: binding.ty,
                })
            }

            ExprKind::BoolOp { op, left, right } => {
                let op = LogicalOp::from(*op);
                let (left_span, right_span) = (left.span, right.span);
                let left = self.type_expr(left)?;
                self.expect_bool_operand(&left, op, "left", left_span)?;
                let right = self.type_expr(right)?;
                self.expect_bool_operand(&right, op, "right", right_span)?;

                Ok(TirExpr {
                    kind: TirExprKind::LogicalOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    ty: Type::Bool,
                })
            }

            ExprKind::SelfAddress => {
                if self.current_contract.is_none() {
                    return Err(
                        self.context_error(span, "self.address used outside contract context")
                    );
                }
                Ok(TirExpr {
                    kind: TirExprKind::SelfAddress,
                    ty: Type::Address,
                })
            }

            ExprKind::Tuple(elements) => {
                let elements = elements
                    .iter()
                    .map(|e| self.type_expr(e))
                    .collect::<Result<Vec<_>>>()?;
                let ty = Type::Tuple(elements.iter().map(|e| e.ty.clone()).collect());
                Ok(TirExpr {
                    kind: TirExprKind::Tuple(elements),
                    ty,
                })
            }
        }
    }

    /// Operands of `and`/`or` must be `bool`; there is no truthiness coercion.
    fn expect_bool_operand(
        &self,
        operand: &TirExpr,
        op: LogicalOp,
        side: &str,
        span: Span,
    ) -> Result<()> {
        if operand.ty.is_bool() {
            return Ok(());
        }
        Err(self.type_error(
            span,
            format!(
                "{} operand of `{}`: expected bool, got {}",
                side, op, operand.ty
            ),
        ))
    }
}
