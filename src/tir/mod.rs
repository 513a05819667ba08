pub mod typeck;

use serde::{Deserialize, Serialize};

use crate::ast::{BoolOpKind, Span};
use crate::registry::Type;

// ── Logical ops ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
}

impl From<BoolOpKind> for LogicalOp {
    fn from(op: BoolOpKind) -> Self {
        match op {
            BoolOpKind::And => LogicalOp::And,
            BoolOpKind::Or => LogicalOp::Or,
        }
    }
}

impl std::fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicalOp::And => write!(f, "and"),
            LogicalOp::Or => write!(f, "or"),
        }
    }
}

// ── TIR nodes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: String,
    pub ty: Type,
}

impl FunctionParam {
    pub fn new(name: String, ty: Type) -> Self {
        Self { name, ty }
    }
}

/// A function whose every statement and expression has been typed.
/// Only the typer constructs these; outside the crate it is read-only.
#[derive(Debug, Clone, Serialize)]
pub struct TirFunction {
    pub(crate) name: String,
    /// Enclosing contract, if this is a contract method
    pub(crate) contract: Option<String>,
    pub(crate) params: Vec<FunctionParam>,
    pub(crate) return_type: Type,
    pub(crate) body: Vec<TirStmt>,
    pub(crate) span: Span,
}

impl TirFunction {
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

    pub fn body(&self) -> &[TirStmt] {
        &self.body
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TirStmt {
    Let {
        name: String,
        ty: Type,
        value: TirExpr,
    },
    Expr(TirExpr),
    If {
        condition: TirExpr,
        then_body: Vec<TirStmt>,
        else_body: Vec<TirStmt>,
    },
    Return(TirReturn),
}

/// A typed return statement, still in its source spelling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TirReturn {
    Bare,
    WithValue(TirExpr),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TirExpr {
    pub kind: TirExprKind,
    pub ty: Type,
}

impl TirExpr {
    pub fn is_unit_literal(&self) -> bool {
        matches!(&self.kind, TirExprKind::Tuple(elems) if elems.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TirExprKind {
    BoolLiteral(bool),
    IntLiteral(u64),
    Var(String),
    LogicalOp {
        op: LogicalOp,
        left: Box<TirExpr>,
        right: Box<TirExpr>,
    },
    SelfAddress,
    Tuple(Vec<TirExpr>),
}
