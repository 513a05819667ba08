mod common;

use common::module;
use fe_core::ast::{Expr, FunctionDef, Module, Stmt, TypeExpr};
use fe_core::codegen::Instr;
use fe_core::compiler::Compiler;
use fe_core::config::CompilerConfig;
use fe_core::errors::ErrorCategory;
use fe_core::interp::{execute, Address, Env, Value};
use fe_core::lir::{Block, Terminator};

fn unit_spellings() -> Vec<FunctionDef> {
    vec![
        FunctionDef::new("bare", vec![], None, vec![Stmt::ret(None)]),
        FunctionDef::new("explicit", vec![], None, vec![Stmt::ret(Some(Expr::unit()))]),
        FunctionDef::new("declared_bare", vec![], Some(TypeExpr::unit()), vec![Stmt::ret(None)]),
        FunctionDef::new(
            "declared_explicit",
            vec![],
            Some(TypeExpr::unit()),
            vec![Stmt::ret(Some(Expr::unit()))],
        ),
        FunctionDef::new("implicit", vec![], None, vec![]),
        FunctionDef::new("declared_implicit", vec![], Some(TypeExpr::unit()), vec![Stmt::pass()]),
    ]
}

#[test]
fn unit_return_spellings_compile_identically() {
    let compiled = Compiler::default().compile_module(&Module::new(vec![], unit_spellings()));
    assert!(compiled.is_ok(), "errors: {:?}", compiled.errors);
    assert_eq!(compiled.functions.len(), 6);

    let expected = Block {
        stmts: vec![],
        terminator: Terminator::ReturnUnit,
    };
    for func in &compiled.functions {
        assert!(func.normalized.return_type.is_unit(), "{}", func.name);
        assert_eq!(func.normalized.body, expected, "{}", func.name);
        assert_eq!(func.code.instructions, vec![Instr::ReturnUnit], "{}", func.name);
    }

    let encoded: Vec<String> = compiled
        .functions
        .iter()
        .map(|f| serde_json::to_string(&f.code.instructions).unwrap())
        .collect();
    assert!(encoded.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn unit_functions_return_unit_value() {
    let compiled = Compiler::default().compile_module(&Module::new(vec![], unit_spellings()));
    for func in &compiled.functions {
        let run = execute(&func.code, &[], &Env::default()).unwrap();
        assert_eq!(run.value, Value::unit());
    }
}

#[test]
fn self_address_in_contract_method() {
    let method = FunctionDef::new(
        "me",
        vec![],
        Some(TypeExpr::name("address")),
        vec![Stmt::ret(Some(Expr::self_address()))],
    );
    let compiled = Compiler::default().compile_module(&module(vec![method], vec![]));
    assert!(compiled.is_ok());

    let func = compiled.function(Some("Foo"), "me").unwrap();
    assert_eq!(func.qualified_name(), "Foo.me");
    let Terminator::ReturnValue(value) = &func.normalized.body.terminator else {
        panic!("expected a value return");
    };
    assert_eq!(value.ty, fe_core::registry::Type::Address);
    assert_eq!(
        func.code.instructions,
        vec![Instr::SelfAddress, Instr::ReturnValue]
    );

    let env = Env {
        self_address: Some(Address([7; 20])),
    };
    let run = execute(&func.code, &[], &env).unwrap();
    assert_eq!(run.value, Value::Address(Address([7; 20])));
}

#[test]
fn self_address_in_free_function_fails_alone() {
    let free = FunctionDef::new(
        "me",
        vec![],
        Some(TypeExpr::name("address")),
        vec![Stmt::ret(Some(Expr::self_address().at(2, 11)))],
    );
    let sibling = FunctionDef::new("ok", vec![], None, vec![]);
    let compiled = Compiler::default().compile_module(&Module::new(vec![], vec![free, sibling]));

    assert_eq!(compiled.errors.len(), 1);
    let err = &compiled.errors[0];
    assert_eq!(err.category, ErrorCategory::ContextError);
    assert_eq!(err.function_name.as_deref(), Some("me"));
    assert_eq!(err.span.line, 2);

    assert_eq!(compiled.functions.len(), 1);
    assert_eq!(compiled.functions[0].name, "ok");
}

#[test]
fn address_function_missing_return_on_some_path() {
    let method = FunctionDef::new(
        "pick",
        vec![common::bool_param("c")],
        Some(TypeExpr::name("address")),
        vec![Stmt::if_(
            Expr::name("c"),
            vec![Stmt::ret(Some(Expr::self_address()))],
            vec![Stmt::pass()],
        )],
    );
    let compiled = Compiler::default().compile_module(&module(vec![method], vec![]));
    assert_eq!(compiled.errors.len(), 1);
    assert_eq!(compiled.errors[0].category, ErrorCategory::MissingReturnError);
    assert!(compiled.functions.is_empty());
}

#[test]
fn address_function_returning_on_every_path() {
    let method = FunctionDef::new(
        "pick",
        vec![common::bool_param("c")],
        Some(TypeExpr::name("address")),
        vec![Stmt::if_(
            Expr::name("c"),
            vec![Stmt::ret(Some(Expr::self_address()))],
            vec![Stmt::ret(Some(Expr::self_address()))],
        )],
    );
    let compiled = Compiler::default().compile_module(&module(vec![method], vec![]));
    assert!(compiled.is_ok(), "errors: {:?}", compiled.errors);
}

#[test]
fn parallel_and_sequential_agree() {
    let functions = unit_spellings()
        .into_iter()
        .chain([
            common::bar(Expr::and(Expr::name("x"), Expr::name("y"))),
            FunctionDef::new("broken", vec![], Some(TypeExpr::name("bool")), vec![]),
        ])
        .collect();
    let module = Module::new(vec![], functions);

    let parallel = Compiler::new(CompilerConfig::default()).compile_module(&module);
    let sequential = Compiler::new(CompilerConfig {
        parallel: false,
        ..CompilerConfig::default()
    })
    .compile_module(&module);

    let names = |m: &fe_core::compiler::CompiledModule| {
        m.functions.iter().map(|f| f.name.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&parallel), names(&sequential));
    assert_eq!(parallel.errors.len(), 1);
    assert_eq!(sequential.errors.len(), 1);
    assert_eq!(parallel.errors[0].category, ErrorCategory::MissingReturnError);
    for (p, s) in parallel.functions.iter().zip(&sequential.functions) {
        assert_eq!(p.code.instructions, s.code.instructions);
    }
}
