use serde::{Deserialize, Serialize};

/// Source location for error reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn unknown() -> Self {
        Self { line: 0, column: 0 }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Untyped expression with source location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ExprKind::BoolLiteral(value), Span::unknown())
    }

    pub fn int(value: u64) -> Self {
        Self::new(ExprKind::IntLiteral(value), Span::unknown())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Name(name.into()), Span::unknown())
    }

    pub fn self_address() -> Self {
        Self::new(ExprKind::SelfAddress, Span::unknown())
    }

    pub fn unit() -> Self {
        Self::new(ExprKind::Tuple(Vec::new()), Span::unknown())
    }

    pub fn tuple(elements: Vec<Expr>) -> Self {
        Self::new(ExprKind::Tuple(elements), Span::unknown())
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Self::bool_op(BoolOpKind::And, left, right)
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Self::bool_op(BoolOpKind::Or, left, right)
    }

    fn bool_op(op: BoolOpKind, left: Expr, right: Expr) -> Self {
        Self::new(
            ExprKind::BoolOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
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
pub enum ExprKind {
    BoolLiteral(bool),

    /// Integer literal (defaults to `u256`)
    IntLiteral(u64),

    /// Parameter or local variable reference
    Name(String),

    /// Short-circuiting `and` / `or`
    BoolOp {
        op: BoolOpKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `self.address`
    SelfAddress,

    /// Tuple literal; `()` is the unit value
    Tuple(Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoolOpKind {
    And,
    Or,
}

impl std::fmt::Display for BoolOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoolOpKind::And => write!(f, "and"),
            BoolOpKind::Or => write!(f, "or"),
        }
    }
}
