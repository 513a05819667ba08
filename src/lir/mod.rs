//! Lowered IR.
//!
//! Same shape as the TIR except that `and`/`or` no longer exist: each one is
//! a `Branch` expression with a single merge point. `normalize` then turns
//! the statement list into blocks ending in a canonical terminator.

pub mod lower;
pub mod normalize;

use serde::{Deserialize, Serialize};

use crate::ast::Span;
use crate::registry::Type;
use crate::tir::FunctionParam;

pub use lower::lower_function;
pub use normalize::normalize;

/// Output of `lower_function`. Built only from a `TirFunction`, so
/// `normalize` never sees an untyped body.
///
/// ```compile_fail
/// use fe_core::lir::{normalize, LirFunction};
/// use fe_core::registry::Type;
///
/// let untyped = LirFunction {
///     name: "f".to_string(),
///     contract: None,
///     params: vec![],
///     return_type: Type::unit(),
///     body: vec![],
///     span: Default::default(),
/// };
/// let _ = normalize(untyped);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct LirFunction {
    pub(crate) name: String,
    pub(crate) contract: Option<String>,
    pub(crate) params: Vec<FunctionParam>,
    pub(crate) return_type: Type,
    pub(crate) body: Vec<LirStmt>,
    pub(crate) span: Span,
}

impl LirFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contract(&self) -> Option<&str> {
        self.contract.as_deref()
    }

    pub fn params(&self) -> &[FunctionParam] {
        &self.params
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn body(&self) -> &[LirStmt] {
        &self.body
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LirStmt {
    Let {
        name: String,
        ty: Type,
        value: LirExpr,
    },
    Expr(LirExpr),
    If {
        condition: LirExpr,
        then_body: Vec<LirStmt>,
        else_body: Vec<LirStmt>,
    },
    Return(SourceReturn),
}

/// Return statement as spelled in source; gone after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SourceReturn {
    Bare,
    WithValue(LirExpr),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LirExpr {
    pub kind: LirExprKind,
    pub ty: Type,
}

impl LirExpr {
    pub fn bool(value: bool) -> Self {
        Self {
            kind: LirExprKind::BoolLiteral(value),
            ty: Type::Bool,
        }
    }

    pub fn is_unit_literal(&self) -> bool {
        matches!(&self.kind, LirExprKind::Tuple(elems) if elems.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LirExprKind {
    BoolLiteral(bool),
    IntLiteral(u64),
    Var(String),
    SelfAddress,
    Tuple(Vec<LirExpr>),
    /// Evaluate `cond`, then exactly one of `then_value` / `else_value`.
    /// Both arms have the expression's type; the arms meet in one merge point.
    Branch {
        cond: Box<LirExpr>,
        then_value: Box<LirExpr>,
        else_value: Box<LirExpr>,
    },
}

// ── Normalized form ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFunction {
    pub name: String,
    pub contract: Option<String>,
    pub params: Vec<FunctionParam>,
    pub return_type: Type,
    pub body: Block,
    pub span: Span,
}

/// Straight-line statements followed by one terminator. Only blocks nested
/// inside an `if` may end in `Fallthrough`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<NormStmt>,
    pub terminator: Terminator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NormStmt {
    Let {
        name: String,
        ty: Type,
        value: LirExpr,
    },
    Expr(LirExpr),
    /// An `if` after which execution may continue.
    If {
        condition: LirExpr,
        then_block: Block,
        else_block: Block,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Terminator {
    ReturnUnit,
    ReturnValue(LirExpr),
    /// An `if` neither of whose arms can reach its end.
    If {
        condition: LirExpr,
        then_block: Box<Block>,
        else_block: Box<Block>,
    },
    /// Continue after the enclosing `if`.
    Fallthrough,
}

impl Terminator {
    pub fn falls_through(&self) -> bool {
        matches!(self, Terminator::Fallthrough)
    }
}
