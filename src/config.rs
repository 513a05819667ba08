//! Compiler configuration.
//!
//! Loaded from an optional JSON file; command-line flags override it.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Artefacts the command-line front end can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmitTarget {
    /// The input module, re-serialized
    Ast,
    /// Typed IR per function
    Tir,
    /// IR after short-circuit lowering
    Lir,
    /// IR after return normalization
    Normalized,
    /// Control-flow graph in Graphviz format
    Cfg,
    /// Instruction listing
    Asm,
}

impl EmitTarget {
    /// File extension used for per-function output.
    pub fn extension(&self) -> &'static str {
        match self {
            EmitTarget::Ast => "ast.json",
            EmitTarget::Tir => "tir.json",
            EmitTarget::Lir => "lir.json",
            EmitTarget::Normalized => "normalized.json",
            EmitTarget::Cfg => "cfg.dot",
            EmitTarget::Asm => "asm",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Compile functions in parallel
    pub parallel: bool,
    pub emit: Vec<EmitTarget>,
    pub log_level: LogLevel,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            emit: vec![EmitTarget::Normalized, EmitTarget::Asm],
            log_level: LogLevel::Info,
        }
    }
}

impl CompilerConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config `{}`", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config `{}`", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: CompilerConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.emit, vec![EmitTarget::Normalized, EmitTarget::Asm]);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fec.json");
        std::fs::write(&path, r#"{"emit": ["cfg", "tir"], "log_level": "debug"}"#).unwrap();
        let config = CompilerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.emit, vec![EmitTarget::Cfg, EmitTarget::Tir]);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.parallel);
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(serde_json::from_str::<CompilerConfig>(r#"{"emit": ["yul"]}"#).is_err());
    }
}
