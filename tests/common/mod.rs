#![allow(dead_code)]

use fe_core::ast::{ContractDef, Expr, FunctionDef, FunctionParam, Module, Stmt, TypeExpr};

pub fn bool_param(name: &str) -> FunctionParam {
    FunctionParam::new(name, TypeExpr::name("bool"))
}

/// `def bar(x: bool, y: bool) -> bool: return x <op> y`
pub fn bar(body: Expr) -> FunctionDef {
    FunctionDef::new(
        "bar",
        vec![bool_param("x"), bool_param("y")],
        Some(TypeExpr::name("bool")),
        vec![Stmt::ret(Some(body))],
    )
}

/// A module with one contract `Foo` holding `methods`, plus free `functions`.
pub fn module(methods: Vec<FunctionDef>, functions: Vec<FunctionDef>) -> Module {
    Module::new(vec![ContractDef::new("Foo", methods)], functions)
}
