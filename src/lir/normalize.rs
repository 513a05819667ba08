//! Return normalization.
//!
//! In a unit-returning function, `return`, `return ()` and falling off the
//! end all become `Terminator::ReturnUnit`; the spelling is not kept. In any
//! other function each return becomes `ReturnValue`, and a path that reaches
//! the end of the body is a `MissingReturnError`.

use log::debug;

use crate::ast::Span;
use crate::errors::{CompileError, ErrorCategory, Result};
use crate::registry::Type;

use super::{Block, LirFunction, LirStmt, NormStmt, NormalizedFunction, SourceReturn, Terminator};

struct Normalizer<'a> {
    function_name: &'a str,
    return_type: &'a Type,
    span: Span,
}

pub fn normalize(func: LirFunction) -> Result<NormalizedFunction> {
    let LirFunction {
        name,
        contract,
        params,
        return_type,
        body,
        span,
    } = func;
    debug!("Normalizing returns of '{}'", name);

    let normalizer = Normalizer {
        function_name: &name,
        return_type: &return_type,
        span,
    };
    let mut body = normalizer.normalize_block(body)?;
    if body.terminator.falls_through() {
        if !return_type.is_unit() {
            return Err(normalizer.error(
                ErrorCategory::MissingReturnError,
                format!(
                    "function `{}` declared to return {} can reach its end without returning a value",
                    name, return_type
                ),
            ));
        }
        body.terminator = Terminator::ReturnUnit;
    }

    Ok(NormalizedFunction {
        name,
        contract,
        params,
        return_type,
        body,
        span,
    })
}

impl Normalizer<'_> {
    fn error(&self, category: ErrorCategory, message: String) -> CompileError {
        CompileError::new(category, self.span, message).in_function(self.function_name)
    }

    fn normalize_block(&self, stmts: Vec<LirStmt>) -> Result<Block> {
        let mut out = Vec::with_capacity(stmts.len());
        let mut stmts = stmts.into_iter();

        while let Some(stmt) = stmts.next() {
            let terminator = match stmt {
                LirStmt::Let { name, ty, value } => {
                    out.push(NormStmt::Let { name, ty, value });
                    continue;
                }
                LirStmt::Expr(expr) => {
                    out.push(NormStmt::Expr(expr));
                    continue;
                }
                LirStmt::If {
                    condition,
                    then_body,
                    else_body,
                } => {
                    let then_block = self.normalize_block(then_body)?;
                    let else_block = self.normalize_block(else_body)?;
                    if then_block.terminator.falls_through()
                        || else_block.terminator.falls_through()
                    {
                        out.push(NormStmt::If {
                            condition,
                            then_block,
                            else_block,
                        });
                        continue;
                    }
                    Terminator::If {
                        condition,
                        then_block: Box::new(then_block),
                        else_block: Box::new(else_block),
                    }
                }
                LirStmt::Return(ret) => self.normalize_return(ret, &mut out)?,
            };

            let unreachable = stmts.count();
            if unreachable > 0 {
                debug!(
                    "Dropping {} unreachable statement(s) in '{}'",
                    unreachable, self.function_name
                );
            }
            return Ok(Block {
                stmts: out,
                terminator,
            });
        }

        Ok(Block {
            stmts: out,
            terminator: Terminator::Fallthrough,
        })
    }

    fn normalize_return(&self, ret: SourceReturn, out: &mut Vec<NormStmt>) -> Result<Terminator> {
        if self.return_type.is_unit() {
            return match ret {
                SourceReturn::Bare => Ok(Terminator::ReturnUnit),
                SourceReturn::WithValue(value) if value.is_unit_literal() => {
                    Ok(Terminator::ReturnUnit)
                }
                SourceReturn::WithValue(value) if value.ty.is_unit() => {
                    out.push(NormStmt::Expr(value));
                    Ok(Terminator::ReturnUnit)
                }
                SourceReturn::WithValue(value) => Err(self.error(
                    ErrorCategory::ReturnTypeError,
                    format!("return type mismatch: expected (), got {}", value.ty),
                )),
            };
        }

        match ret {
            SourceReturn::WithValue(value) => Ok(Terminator::ReturnValue(value)),
            SourceReturn::Bare => Err(self.error(
                ErrorCategory::ReturnTypeError,
                format!("return without value: expected {}, got ()", self.return_type),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lir::{LirExpr, LirExprKind};
    use crate::tir::FunctionParam;

    fn function(return_type: Type, body: Vec<LirStmt>) -> LirFunction {
        LirFunction {
            name: "f".to_string(),
            contract: None,
            params: vec![FunctionParam::new("c".to_string(), Type::Bool)],
            return_type,
            body,
            span: Span::new(1, 0),
        }
    }

    fn var(name: &str, ty: Type) -> LirExpr {
        LirExpr {
            kind: LirExprKind::Var(name.to_string()),
            ty,
        }
    }

    fn unit_literal() -> LirExpr {
        LirExpr {
            kind: LirExprKind::Tuple(vec![]),
            ty: Type::unit(),
        }
    }

    #[test]
    fn unit_return_spellings_collapse() {
        let spellings = vec![
            vec![LirStmt::Return(SourceReturn::Bare)],
            vec![LirStmt::Return(SourceReturn::WithValue(unit_literal()))],
            vec![],
        ];
        let normalized: Vec<_> = spellings
            .into_iter()
            .map(|body| normalize(function(Type::unit(), body)).unwrap())
            .collect();

        for n in &normalized {
            assert_eq!(
                n.body,
                Block {
                    stmts: vec![],
                    terminator: Terminator::ReturnUnit,
                }
            );
        }
        assert_eq!(normalized[0], normalized[1]);
        assert_eq!(normalized[1], normalized[2]);
    }

    #[test]
    fn unit_valued_expression_is_kept_for_effect() {
        let n = normalize(function(
            Type::unit(),
            vec![LirStmt::Return(SourceReturn::WithValue(var("u", Type::unit())))],
        ))
        .unwrap();
        assert_eq!(n.body.stmts, vec![NormStmt::Expr(var("u", Type::unit()))]);
        assert_eq!(n.body.terminator, Terminator::ReturnUnit);
    }

    #[test]
    fn missing_return_on_else_path() {
        let body = vec![LirStmt::If {
            condition: var("c", Type::Bool),
            then_body: vec![LirStmt::Return(SourceReturn::WithValue(var(
                "a",
                Type::Address,
            )))],
            else_body: vec![],
        }];
        let err = normalize(function(Type::Address, body)).unwrap_err();
        assert_eq!(err.category, ErrorCategory::MissingReturnError);
        assert_eq!(err.span, Span::new(1, 0));
        assert_eq!(err.function_name.as_deref(), Some("f"));
        assert!(err.message.contains("address"));
    }

    #[test]
    fn if_returning_on_both_paths_terminates() {
        let ret = |name: &str| LirStmt::Return(SourceReturn::WithValue(var(name, Type::Bool)));
        let body = vec![
            LirStmt::If {
                condition: var("c", Type::Bool),
                then_body: vec![ret("a")],
                else_body: vec![ret("b")],
            },
            LirStmt::Expr(var("dead", Type::Bool)),
        ];
        let n = normalize(function(Type::Bool, body)).unwrap();
        assert!(n.body.stmts.is_empty());
        let Terminator::If {
            then_block,
            else_block,
            ..
        } = &n.body.terminator
        else {
            panic!("expected if terminator");
        };
        assert_eq!(then_block.terminator, Terminator::ReturnValue(var("a", Type::Bool)));
        assert_eq!(else_block.terminator, Terminator::ReturnValue(var("b", Type::Bool)));
    }

    #[test]
    fn early_unit_return_inside_if() {
        let body = vec![
            LirStmt::If {
                condition: var("c", Type::Bool),
                then_body: vec![LirStmt::Return(SourceReturn::WithValue(unit_literal()))],
                else_body: vec![],
            },
            LirStmt::Expr(var("c", Type::Bool)),
        ];
        let n = normalize(function(Type::unit(), body)).unwrap();
        assert_eq!(n.body.stmts.len(), 2);
        let NormStmt::If {
            then_block,
            else_block,
            ..
        } = &n.body.stmts[0]
        else {
            panic!("expected if statement");
        };
        assert_eq!(then_block.terminator, Terminator::ReturnUnit);
        assert_eq!(else_block.terminator, Terminator::Fallthrough);
        assert_eq!(n.body.terminator, Terminator::ReturnUnit);
    }

    #[test]
    fn statements_after_return_are_dropped() {
        let body = vec![
            LirStmt::Return(SourceReturn::Bare),
            LirStmt::Expr(var("c", Type::Bool)),
        ];
        let n = normalize(function(Type::unit(), body)).unwrap();
        assert!(n.body.stmts.is_empty());
    }
}
