//! Expression typer: AST → TIR.
//!
//! Checks types only. Nothing here decides evaluation order; that belongs
//! to the control-flow lowering in `lir::lower`.

use std::collections::HashMap;

use log::debug;

use crate::ast::{ContractDef, FunctionDef, Span};
use crate::errors::{CompileError, ErrorCategory, Result};
use crate::registry::{Type, TypeRegistry};

use super::TirFunction;

mod expressions;
mod functions;
mod statements;

macro_rules! define_error_helpers {
    ($($name:ident => $category:ident),* $(,)?) => {
        $(
            fn $name(&self, span: Span, msg: impl Into<String>) -> CompileError {
                self.make_error(ErrorCategory::$category, span, msg.into())
            }
        )*
    }
}

/// A name in scope. `slot` is the storage name emitted code uses; it only
/// differs from the source name when an earlier binding in the same function
/// already took that name.
#[derive(Debug, Clone)]
struct Binding {
    ty: Type,
    slot: String,
}

pub struct Typer<'r> {
    registry: &'r TypeRegistry,

    scopes: Vec<HashMap<String, Binding>>,
    /// Bindings made so far per source name in the current function
    bindings_per_name: HashMap<String, usize>,
    current_return_type: Option<Type>,
    current_function_name: Option<String>,
    current_contract: Option<String>,
}

impl<'r> Typer<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            scopes: Vec::new(),
            bindings_per_name: HashMap::new(),
            current_return_type: None,
            current_function_name: None,
            current_contract: None,
        }
    }

    /// Type one function. `contract` is the enclosing contract for methods,
    /// `None` for free functions.
    pub fn type_function(
        &mut self,
        func: &FunctionDef,
        contract: Option<&ContractDef>,
    ) -> Result<TirFunction> {
        debug!("Typing function '{}'", func.name);
        self.scopes.clear();
        self.bindings_per_name.clear();
        self.current_contract = contract.map(|c| c.name.clone());
        self.current_function_name = Some(func.name.clone());

        let result = self.type_function_body(func);

        self.scopes.clear();
        self.bindings_per_name.clear();
        self.current_return_type = None;
        self.current_function_name = None;
        self.current_contract = None;
        result
    }

    // ── error helpers ──────────────────────────────────────────────────

    fn make_error(&self, category: ErrorCategory, span: Span, message: String) -> CompileError {
        let err = CompileError::new(category, span, message);
        match &self.current_function_name {
            Some(name) => err.in_function(name.clone()),
            None => err,
        }
    }

    define_error_helpers! {
        type_error        => TypeError,
        name_error        => NameError,
        context_error     => ContextError,
        return_type_error => ReturnTypeError,
    }

    // ── scope helpers ──────────────────────────────────────────────────

    fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind `name` in the innermost scope and return its storage slot.
    /// The first binding of a name keeps it; later ones get `name#1`,
    /// `name#2`, ... so no two bindings in a function share storage.
    fn declare(&mut self, name: &str, ty: Type) -> String {
        let count = self.bindings_per_name.entry(name.to_string()).or_insert(0);
        let slot = match *count {
            0 => name.to_string(),
            n => format!("{}#{}", name, n),
        };
        *count += 1;

        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(
                name.to_string(),
                Binding {
                    ty,
                    slot: slot.clone(),
                },
            );
        }
        slot
    }

    fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn resolve_type(&self, expr: &crate::ast::TypeExpr, span: Span) -> Result<Type> {
        self.registry.resolve(expr, span).map_err(|err| {
            self.make_error(err.category, err.span, err.message)
        })
    }
}
