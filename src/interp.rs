//! Reference evaluator for emitted code.
//!
//! Runs a `FunctionCode` on concrete arguments and records every variable
//! read and `self.address` access, so evaluation order can be observed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ast::Span;
use crate::codegen::{FunctionCode, Instr};
use crate::errors::{CompileError, ErrorCategory, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(u64),
    Address(Address),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn unit() -> Self {
        Value::Tuple(Vec::new())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Env {
    /// Address of the executing contract; `None` for free functions
    pub self_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Load(String),
    SelfAddress,
}

#[derive(Debug, Clone)]
pub struct Execution {
    pub value: Value,
    pub trace: Vec<TraceEvent>,
}

impl Execution {
    /// Number of times `name` was read.
    pub fn loads(&self, name: &str) -> usize {
        self.trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::Load(n) if n == name))
            .count()
    }
}

struct Machine<'a> {
    code: &'a FunctionCode,
    env: &'a Env,
    locals: HashMap<String, Value>,
    stack: Vec<Value>,
    trace: Vec<TraceEvent>,
}

pub fn execute(code: &FunctionCode, args: &[Value], env: &Env) -> Result<Execution> {
    if args.len() != code.params.len() {
        return Err(runtime_error(
            code,
            format!(
                "expected {} argument(s), got {}",
                code.params.len(),
                args.len()
            ),
        ));
    }

    let mut machine = Machine {
        code,
        env,
        locals: code.params.iter().cloned().zip(args.iter().cloned()).collect(),
        stack: Vec::new(),
        trace: Vec::new(),
    };
    let value = machine.run()?;
    Ok(Execution {
        value,
        trace: machine.trace,
    })
}

fn runtime_error(code: &FunctionCode, message: String) -> CompileError {
    CompileError::new(ErrorCategory::RuntimeError, Span::unknown(), message)
        .in_function(code.name.clone())
}

impl Machine<'_> {
    fn run(&mut self) -> Result<Value> {
        let code = self.code;
        let mut pc = 0;
        loop {
            let Some(inst) = code.instructions.get(pc) else {
                return Err(self.error(format!("program counter {} out of range", pc)));
            };
            pc += 1;

            match inst {
                Instr::PushBool(value) => self.stack.push(Value::Bool(*value)),
                Instr::PushInt(value) => self.stack.push(Value::Int(*value)),
                Instr::Load(name) => {
                    let value = self
                        .locals
                        .get(name)
                        .cloned()
                        .ok_or_else(|| self.error(format!("unbound variable `{}`", name)))?;
                    self.trace.push(TraceEvent::Load(name.clone()));
                    self.stack.push(value);
                }
                Instr::Store(name) => {
                    let value = self.pop()?;
                    self.locals.insert(name.clone(), value);
                }
                Instr::SelfAddress => {
                    let address = self
                        .env
                        .self_address
                        .ok_or_else(|| self.error("no contract address in scope".to_string()))?;
                    self.trace.push(TraceEvent::SelfAddress);
                    self.stack.push(Value::Address(address));
                }
                Instr::MakeTuple(n) => {
                    if self.stack.len() < *n {
                        return Err(self.error("stack underflow".to_string()));
                    }
                    let elems = self.stack.split_off(self.stack.len() - n);
                    self.stack.push(Value::Tuple(elems));
                }
                Instr::Pop => {
                    self.pop()?;
                }
                Instr::Jump(target) => pc = *target,
                Instr::JumpIfFalse(target) => match self.pop()? {
                    Value::Bool(true) => {}
                    Value::Bool(false) => pc = *target,
                    other => {
                        return Err(self.error(format!("branch on non-bool value {:?}", other)))
                    }
                },
                Instr::ReturnUnit => return Ok(Value::unit()),
                Instr::ReturnValue => return self.pop(),
            }
        }
    }

    fn pop(&mut self) -> Result<Value> {
        self.stack
            .pop()
            .ok_or_else(|| self.error("stack underflow".to_string()))
    }

    fn error(&self, message: String) -> CompileError {
        runtime_error(self.code, message)
    }
}
