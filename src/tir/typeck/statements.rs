use crate::ast::{Expr, Span, Stmt, StmtKind};
use crate::errors::Result;
use crate::registry::Type;
use crate::tir::{TirReturn, TirStmt};

use super::Typer;

impl Typer<'_> {
    pub(super) fn type_stmt(&mut self, stmt: &Stmt) -> Result<Option<TirStmt>> {
        let span = stmt.span;

        match &stmt.kind {
            StmtKind::Pass => Ok(None),
            StmtKind::Expr(expr) => Ok(Some(TirStmt::Expr(self.type_expr(expr)?))),
            StmtKind::Let { target, ty, value } => {
                let declared = self.resolve_type(ty, span)?;
                let value = self.type_expr(value)?;
                if !self.registry.compatible(&declared, &value.ty) {
                    return Err(self.type_error(
                        span,
                        format!(
                            "cannot assign value of type `{}` to `{}` declared as `{}`",
                            value.ty, target, declared
                        ),
                    ));
                }
                let slot = self.declare(target, declared.clone());
                Ok(Some(TirStmt::Let {
                    name: slot,
                    ty: declared,
                    value,
                }))
            }
            StmtKind::If {
                test,
                body,
                or_else,
            } => {
                let condition = self.type_expr(test)?;
                if !condition.ty.is_bool() {
                    return Err(self.type_error(
                        test.span,
                        format!("if condition: expected bool, got {}", condition.ty),
                    ));
                }
                let then_body = self.type_block(body)?;
                let else_body = self.type_block(or_else)?;
                Ok(Some(TirStmt::If {
                    condition,
                    then_body,
                    else_body,
                }))
            }
            StmtKind::Return(value) => self.type_return(value.as_ref(), span).map(Some),
        }
    }

    /// Type a block of statements inside a new scope.
    pub(super) fn type_block(&mut self, stmts: &[Stmt]) -> Result<Vec<TirStmt>> {
        self.push_scope();
        let result = self.type_stmts(stmts);
        self.pop_scope();
        result
    }

    pub(super) fn type_stmts(&mut self, stmts: &[Stmt]) -> Result<Vec<TirStmt>> {
        let mut body = Vec::with_capacity(stmts.len());
        for stmt in stmts {
            body.extend(self.type_stmt(stmt)?);
        }
        Ok(body)
    }

    fn type_return(&mut self, value: Option<&Expr>, span: Span) -> Result<TirStmt> {
        let expected = self
            .current_return_type
            .clone()
            .unwrap_or_else(Type::unit);

        match value {
            None => {
                if !expected.is_unit() {
                    return Err(self.return_type_error(
                        span,
                        format!("return without value: expected {}, got ()", expected),
                    ));
                }
                Ok(TirStmt::Return(TirReturn::Bare))
            }
            Some(value) => {
                let value = self.type_expr(value)?;
                if !self.registry.equal(&expected, &value.ty) {
                    return Err(self.return_type_error(
                        span,
                        format!("return type mismatch: expected {}, got {}", expected, value.ty),
                    ));
                }
                Ok(TirStmt::Return(TirReturn::WithValue(value)))
            }
        }
    }
}
