use crate::ast::FunctionDef;
use crate::errors::Result;
use crate::tir::{FunctionParam, TirFunction};

use super::Typer;

impl Typer<'_> {
    pub(super) fn type_function_body(&mut self, func: &FunctionDef) -> Result<TirFunction> {
        let return_type = self
            .registry
            .resolve_return(func.return_type.as_ref(), func.span)
            .map_err(|err| self.make_error(err.category, err.span, err.message))?;

        self.push_scope();
        let mut params = Vec::with_capacity(func.params.len());
        for param in &func.params {
            if params.iter().any(|p: &FunctionParam| p.name == param.name) {
                return Err(self.name_error(
                    param.span,
                    format!(
                        "duplicate parameter `{}` in function `{}`",
                        param.name, func.name
                    ),
                ));
            }
            let ty = self.resolve_type(&param.ty, param.span)?;
            let slot = self.declare(&param.name, ty.clone());
            params.push(FunctionParam::new(slot, ty));
        }
        self.current_return_type = Some(return_type.clone());

        let body = self.type_stmts(&func.body)?;
        self.pop_scope();

        Ok(TirFunction {
            name: func.name.clone(),
            contract: self.current_contract.clone(),
            params,
            return_type,
            body,
            span: func.span,
        })
    }
}
