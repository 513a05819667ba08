//! Pipeline driver: type → lower → normalize → codegen, once per function.
//!
//! Functions are independent. Each gets its own typer and owns every tree it
//! builds; only the type registry is shared. An error aborts the function it
//! occurred in and nothing else.

use rayon::prelude::*;
use log::{debug, info, warn};

use crate::ast::{ContractDef, FunctionDef, Module};
use crate::codegen::{self, FunctionCode};
use crate::config::CompilerConfig;
use crate::errors::{CompileError, ErrorCategory, Result};
use crate::lir::{self, LirFunction, NormalizedFunction};
use crate::registry::TypeRegistry;
use crate::tir::typeck::Typer;
use crate::tir::TirFunction;

#[derive(Debug, Clone)]
pub struct CompiledFunction {
    pub name: String,
    pub contract: Option<String>,
    pub tir: TirFunction,
    pub lir: LirFunction,
    pub normalized: NormalizedFunction,
    pub code: FunctionCode,
}

impl CompiledFunction {
    /// `Contract.name` for methods, `name` for free functions.
    pub fn qualified_name(&self) -> String {
        match &self.contract {
            Some(contract) => format!("{}.{}", contract, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompiledModule {
    pub functions: Vec<CompiledFunction>,
    pub errors: Vec<CompileError>,
}

impl CompiledModule {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn function(&self, contract: Option<&str>, name: &str) -> Option<&CompiledFunction> {
        self.functions
            .iter()
            .find(|f| f.name == name && f.contract.as_deref() == contract)
    }
}

pub struct Compiler {
    registry: TypeRegistry,
    config: CompilerConfig,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            registry: TypeRegistry::new(),
            config,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn compile_module(&self, module: &Module) -> CompiledModule {
        let work: Vec<(Option<&ContractDef>, &FunctionDef)> = module
            .contracts
            .iter()
            .flat_map(|c| c.functions.iter().map(move |f| (Some(c), f)))
            .chain(module.functions.iter().map(|f| (None, f)))
            .collect();
        info!(
            "Compiling {} function(s){}",
            work.len(),
            if self.config.parallel { " in parallel" } else { "" }
        );

        let results: Vec<Result<CompiledFunction>> = if self.config.parallel {
            work.par_iter()
                .map(|(contract, func)| self.compile_function(func, *contract))
                .collect()
        } else {
            work.iter()
                .map(|(contract, func)| self.compile_function(func, *contract))
                .collect()
        };

        let mut compiled = CompiledModule::default();
        for result in results {
            match result {
                Ok(func) => compiled.functions.push(func),
                Err(err) => {
                    warn!(
                        "In function '{}': {}",
                        err.function_name.as_deref().unwrap_or("?"),
                        err
                    );
                    compiled.errors.push(err);
                }
            }
        }
        compiled
    }

    pub fn compile_function(
        &self,
        func: &FunctionDef,
        contract: Option<&ContractDef>,
    ) -> Result<CompiledFunction> {
        let tir = Typer::new(&self.registry).type_function(func, contract)?;
        let lir = lir::lower_function(tir.clone());
        let normalized = lir::normalize(lir.clone())?;
        let code = codegen::generate(&normalized).map_err(|err| {
            CompileError::new(ErrorCategory::InternalError, func.span, format!("{:#}", err))
                .in_function(func.name.clone())
        })?;
        debug!(
            "Compiled '{}' to {} instruction(s)",
            func.name,
            code.instructions.len()
        );

        Ok(CompiledFunction {
            name: func.name.clone(),
            contract: contract.map(|c| c.name.clone()),
            tir,
            lir,
            normalized,
            code,
        })
    }
}
