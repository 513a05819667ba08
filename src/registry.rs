//! Canonical types and the registry that resolves type syntax into them.
//!
//! Unit has no variant of its own: it is the empty tuple. Every way of
//! spelling it (`()`, an omitted return clause, `Type::unit()`) produces
//! `Type::Tuple(vec![])`, so structural equality already treats them as one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::{Span, TypeExpr};
use crate::errors::{CompileError, ErrorCategory, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Address,
    U256,
    I256,
    U8,
    String,
    Tuple(Vec<Type>),
}

impl Type {
    pub fn unit() -> Self {
        Type::Tuple(Vec::new())
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Type::Tuple(elems) if elems.is_empty())
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Address => write!(f, "address"),
            Type::U256 => write!(f, "u256"),
            Type::I256 => write!(f, "i256"),
            Type::U8 => write!(f, "u8"),
            Type::String => write!(f, "string"),
            Type::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Read-only after construction; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    primitives: HashMap<&'static str, Type>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let primitives = [
            ("bool", Type::Bool),
            ("address", Type::Address),
            ("u256", Type::U256),
            ("i256", Type::I256),
            ("u8", Type::U8),
            ("string", Type::String),
        ]
        .into_iter()
        .collect();
        Self { primitives }
    }

    pub fn resolve(&self, expr: &TypeExpr, span: Span) -> Result<Type> {
        match expr {
            TypeExpr::Name(name) => self.primitives.get(name.as_str()).cloned().ok_or_else(|| {
                CompileError::new(
                    ErrorCategory::UnknownType,
                    span,
                    format!("unknown type `{}`", name),
                )
            }),
            TypeExpr::Tuple(elems) => elems
                .iter()
                .map(|e| self.resolve(e, span))
                .collect::<Result<Vec<_>>>()
                .map(Type::Tuple),
        }
    }

    /// Resolve an optional return clause; an omitted clause declares unit.
    pub fn resolve_return(&self, expr: Option<&TypeExpr>, span: Span) -> Result<Type> {
        match expr {
            Some(expr) => self.resolve(expr, span),
            None => Ok(Type::unit()),
        }
    }

    pub fn equal(&self, a: &Type, b: &Type) -> bool {
        a == b
    }

    /// Whether a value of type `actual` may be used where `expected` is
    /// required. There are no implicit conversions.
    pub fn compatible(&self, expected: &Type, actual: &Type) -> bool {
        self.equal(expected, actual)
    }
}
