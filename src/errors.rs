use thiserror::Error;

use crate::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UnknownType,
    TypeError,
    NameError,
    ContextError,
    ReturnTypeError,
    MissingReturnError,
    RuntimeError,
    InternalError,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::UnknownType => write!(f, "UnknownType"),
            ErrorCategory::TypeError => write!(f, "TypeError"),
            ErrorCategory::NameError => write!(f, "NameError"),
            ErrorCategory::ContextError => write!(f, "ContextError"),
            ErrorCategory::ReturnTypeError => write!(f, "ReturnTypeError"),
            ErrorCategory::MissingReturnError => write!(f, "MissingReturnError"),
            ErrorCategory::RuntimeError => write!(f, "RuntimeError"),
            ErrorCategory::InternalError => write!(f, "InternalError"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{category}: {message}")]
pub struct CompileError {
    pub category: ErrorCategory,
    pub message: String,
    pub span: Span,
    pub function_name: Option<String>,
}

impl CompileError {
    pub fn new(category: ErrorCategory, span: Span, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            span,
            function_name: None,
        }
    }

    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

pub fn print_error(file: &str, err: &anyhow::Error) {
    if let Some(ce) = err.chain().find_map(|e| e.downcast_ref::<CompileError>()) {
        print_compile_error(file, ce);
    } else {
        let message = err
            .chain()
            .last()
            .map(ToString::to_string)
            .unwrap_or_default();
        eprintln!("error: {}", message);
        eprintln!("  --> {}", file);
    }
}

pub fn print_compile_error(file: &str, ce: &CompileError) {
    let line_num = ce.span.line.to_string();
    let pad = line_num.len();

    eprintln!("{}: {}", ce.category, ce.message);

    eprint!(" {:>pad$} --> ", "", pad = pad);
    eprint!("{}:{}:{}", file, ce.span.line, ce.span.column);
    if let Some(ref func) = ce.function_name {
        eprint!(", in {}", func);
    }
    eprintln!();
}
