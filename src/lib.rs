pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod interp;
pub mod lir;
pub mod logger;
pub mod registry;
pub mod tir;
