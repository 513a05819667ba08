use serde::{Deserialize, Serialize};

use super::expr::{Expr, Span};
use super::types::TypeExpr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    #[serde(default)]
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn pass() -> Self {
        Self::new(StmtKind::Pass, Span::unknown())
    }

    pub fn expr(expr: Expr) -> Self {
        let span = expr.span;
        Self::new(StmtKind::Expr(expr), span)
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Self::new(StmtKind::Return(value), Span::unknown())
    }

    pub fn let_(target: impl Into<String>, ty: TypeExpr, value: Expr) -> Self {
        Self::new(
            StmtKind::Let {
                target: target.into(),
                ty,
                value,
            },
            Span::unknown(),
        )
    }

    pub fn if_(test: Expr, body: Vec<Stmt>, or_else: Vec<Stmt>) -> Self {
        Self::new(
            StmtKind::If {
                test,
                body,
                or_else,
            },
            Span::unknown(),
        )
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.span = Span::new(line, column);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StmtKind {
    Pass,

    /// Expression evaluated for effect
    Expr(Expr),

    /// Local binding with type annotation
    Let {
        target: String,
        ty: TypeExpr,
        value: Expr,
    },

    If {
        test: Expr,
        body: Vec<Stmt>,
        #[serde(default)]
        or_else: Vec<Stmt>,
    },

    /// `return` (None) or `return <expr>`
    Return(Option<Expr>),
}

/// Function definition. `return_type: None` means the source had no
/// arrow-return clause, which declares unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub params: Vec<FunctionParam>,
    #[serde(default)]
    pub return_type: Option<TypeExpr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

impl FunctionDef {
    pub fn new(
        name: impl Into<String>,
        params: Vec<FunctionParam>,
        return_type: Option<TypeExpr>,
        body: Vec<Stmt>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
            body,
            span: Span::unknown(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: String,
    pub ty: TypeExpr,
    #[serde(default)]
    pub span: Span,
}

impl FunctionParam {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            span: Span::unknown(),
        }
    }
}
