mod expr;
mod stmt;
mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

use serde::{Deserialize, Serialize};

/// A parsed source module: the unit of compilation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub contracts: Vec<ContractDef>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
}

impl Module {
    pub fn new(contracts: Vec<ContractDef>, functions: Vec<FunctionDef>) -> Self {
        Self {
            contracts,
            functions,
        }
    }

    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractDef {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
    #[serde(default)]
    pub span: Span,
}

impl ContractDef {
    pub fn new(name: impl Into<String>, functions: Vec<FunctionDef>) -> Self {
        Self {
            name: name.into(),
            functions,
            span: Span::unknown(),
        }
    }
}
