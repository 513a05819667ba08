//! Control-flow lowering of short-circuit boolean operators.
//!
//! `x and y` becomes `if x { y } else { false }` and `x or y` becomes
//! `if x { true } else { y }`. The right operand sits in a branch arm, so it
//! is only evaluated when the left one does not already decide the result.

use log::debug;

use crate::tir::{LogicalOp, TirExpr, TirExprKind, TirFunction, TirReturn, TirStmt};

use super::{LirExpr, LirExprKind, LirFunction, LirStmt, SourceReturn};

pub fn lower_function(func: TirFunction) -> LirFunction {
    debug!("Lowering function '{}'", func.name);
    LirFunction {
        name: func.name,
        contract: func.contract,
        params: func.params,
        return_type: func.return_type,
        body: lower_stmts(func.body),
        span: func.span,
    }
}

fn lower_stmts(stmts: Vec<TirStmt>) -> Vec<LirStmt> {
    stmts.into_iter().map(lower_stmt).collect()
}

fn lower_stmt(stmt: TirStmt) -> LirStmt {
    match stmt {
        TirStmt::Let { name, ty, value } => LirStmt::Let {
            name,
            ty,
            value: lower_expr(value),
        },
        TirStmt::Expr(expr) => LirStmt::Expr(lower_expr(expr)),
        TirStmt::If {
            condition,
            then_body,
            else_body,
        } => LirStmt::If {
            condition: lower_expr(condition),
            then_body: lower_stmts(then_body),
            else_body: lower_stmts(else_body),
        },
        TirStmt::Return(TirReturn::Bare) => LirStmt::Return(SourceReturn::Bare),
        TirStmt::Return(TirReturn::WithValue(expr)) => {
            LirStmt::Return(SourceReturn::WithValue(lower_expr(expr)))
        }
    }
}

pub fn lower_expr(expr: TirExpr) -> LirExpr {
    let ty = expr.ty;
    let kind = match expr.kind {
        TirExprKind::BoolLiteral(value) => LirExprKind::BoolLiteral(value),
        TirExprKind::IntLiteral(value) => LirExprKind::IntLiteral(value),
        TirExprKind::Var(name) => LirExprKind::Var(name),
        TirExprKind::SelfAddress => LirExprKind::SelfAddress,
        TirExprKind::Tuple(elems) => LirExprKind::Tuple(elems.into_iter().map(lower_expr).collect()),
        TirExprKind::LogicalOp { op, left, right } => {
            let cond = Box::new(lower_expr(*left));
            let right = Box::new(lower_expr(*right));
            match op {
                LogicalOp::And => LirExprKind::Branch {
                    cond,
                    then_value: right,
                    else_value: Box::new(LirExpr::bool(false)),
                },
                LogicalOp::Or => LirExprKind::Branch {
                    cond,
                    then_value: Box::new(LirExpr::bool(true)),
                    else_value: right,
                },
            }
        }
    };
    LirExpr { kind, ty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Type;

    fn var(name: &str) -> TirExpr {
        TirExpr {
            kind: TirExprKind::Var(name.to_string()),
            ty: Type::Bool,
        }
    }

    fn logical(op: LogicalOp, left: TirExpr, right: TirExpr) -> TirExpr {
        TirExpr {
            kind: TirExprKind::LogicalOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            ty: Type::Bool,
        }
    }

    fn lir_var(name: &str) -> Box<LirExpr> {
        Box::new(LirExpr {
            kind: LirExprKind::Var(name.to_string()),
            ty: Type::Bool,
        })
    }

    #[test]
    fn and_puts_right_operand_in_then_arm() {
        let lowered = lower_expr(logical(LogicalOp::And, var("x"), var("y")));
        assert_eq!(lowered.ty, Type::Bool);
        assert_eq!(
            lowered.kind,
            LirExprKind::Branch {
                cond: lir_var("x"),
                then_value: lir_var("y"),
                else_value: Box::new(LirExpr::bool(false)),
            }
        );
    }

    #[test]
    fn or_puts_right_operand_in_else_arm() {
        let lowered = lower_expr(logical(LogicalOp::Or, var("x"), var("y")));
        assert_eq!(
            lowered.kind,
            LirExprKind::Branch {
                cond: lir_var("x"),
                then_value: Box::new(LirExpr::bool(true)),
                else_value: lir_var("y"),
            }
        );
    }

    #[test]
    fn nested_operators_lower_recursively() {
        // (a or b) and c
        let lowered = lower_expr(logical(
            LogicalOp::And,
            logical(LogicalOp::Or, var("a"), var("b")),
            var("c"),
        ));
        let LirExprKind::Branch { cond, then_value, .. } = lowered.kind else {
            panic!("expected a branch");
        };
        assert!(matches!(cond.kind, LirExprKind::Branch { .. }));
        assert_eq!(then_value, lir_var("c"));
    }

    #[test]
    fn operators_inside_statements_are_lowered() {
        let func = TirFunction {
            name: "f".to_string(),
            contract: None,
            params: vec![],
            return_type: Type::unit(),
            body: vec![TirStmt::If {
                condition: logical(LogicalOp::And, var("a"), var("b")),
                then_body: vec![TirStmt::Expr(logical(LogicalOp::Or, var("c"), var("d")))],
                else_body: vec![TirStmt::Return(TirReturn::Bare)],
            }],
            span: crate::ast::Span::unknown(),
        };
        let lowered = lower_function(func);
        let LirStmt::If {
            condition,
            then_body,
            else_body,
        } = &lowered.body[0]
        else {
            panic!("expected if");
        };
        assert!(matches!(condition.kind, LirExprKind::Branch { .. }));
        assert!(matches!(
            &then_body[0],
            LirStmt::Expr(LirExpr {
                kind: LirExprKind::Branch { .. },
                ..
            })
        ));
        assert!(matches!(else_body[0], LirStmt::Return(SourceReturn::Bare)));
    }
}
