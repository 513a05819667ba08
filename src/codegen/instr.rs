use serde::{Deserialize, Serialize};

/// Stack-machine instructions. Jump targets are instruction indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instr {
    PushBool(bool),
    PushInt(u64),
    Load(String),
    Store(String),
    /// Push the executing contract's address
    SelfAddress,
    /// Pop `n` values into a tuple; `MakeTuple(0)` pushes unit
    MakeTuple(usize),
    Pop,
    Jump(usize),
    /// Pop a bool and jump if it is false
    JumpIfFalse(usize),
    ReturnUnit,
    /// Pop the return value
    ReturnValue,
}

impl std::fmt::Display for Instr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instr::PushBool(value) => write!(f, "push_bool {}", value),
            Instr::PushInt(value) => write!(f, "push_int {}", value),
            Instr::Load(name) => write!(f, "load {}", name),
            Instr::Store(name) => write!(f, "store {}", name),
            Instr::SelfAddress => write!(f, "self_address"),
            Instr::MakeTuple(n) => write!(f, "make_tuple {}", n),
            Instr::Pop => write!(f, "pop"),
            Instr::Jump(target) => write!(f, "jump {}", target),
            Instr::JumpIfFalse(target) => write!(f, "jump_if_false {}", target),
            Instr::ReturnUnit => write!(f, "return_unit"),
            Instr::ReturnValue => write!(f, "return_value"),
        }
    }
}
