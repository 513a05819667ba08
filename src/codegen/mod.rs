pub mod context;
mod instr;

use std::collections::HashMap;

use anyhow::{bail, Context as _, Result};
use petgraph::dot::Dot;
use log::debug;

use crate::lir::NormalizedFunction;
use context::{BlockEnd, Cfg, CodegenContext, Edge};

pub use instr::Instr;

/// Emitted code for one function: the block graph and its linear form.
#[derive(Debug, Clone)]
pub struct FunctionCode {
    pub name: String,
    pub contract: Option<String>,
    pub params: Vec<String>,
    pub cfg: Cfg,
    pub instructions: Vec<Instr>,
}

impl FunctionCode {
    /// Assembly-style listing, one instruction per line.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        match &self.contract {
            Some(contract) => out.push_str(&format!("{}.{}:\n", contract, self.name)),
            None => out.push_str(&format!("{}:\n", self.name)),
        }
        for (i, inst) in self.instructions.iter().enumerate() {
            out.push_str(&format!("{:>4}: {}\n", i, inst));
        }
        out
    }

    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.cfg))
    }
}

pub fn generate(func: &NormalizedFunction) -> Result<FunctionCode> {
    debug!("Generating code for '{}'", func.name);
    let mut ctx = CodegenContext::new();
    ctx.codegen_block(&func.body, None)
        .with_context(|| format!("In function '{}'", func.name))?;
    let instructions = linearize(&ctx)?;

    Ok(FunctionCode {
        name: func.name.clone(),
        contract: func.contract.clone(),
        params: func.params.iter().map(|p| p.name.clone()).collect(),
        cfg: ctx.graph,
        instructions,
    })
}

/// Lay blocks out in the order they were positioned at and resolve edges
/// into jump offsets. A jump to the next block in the layout is omitted.
fn linearize(ctx: &CodegenContext) -> Result<Vec<Instr>> {
    let next_of = |i: usize| ctx.layout.get(i + 1).copied();

    let mut sizes = Vec::with_capacity(ctx.layout.len());
    for (i, &block) in ctx.layout.iter().enumerate() {
        let bb = &ctx.graph[block];
        let end_size = match bb.end {
            BlockEnd::Open => bail!("block `{}` has no terminator", bb.label),
            BlockEnd::Jump => usize::from(next_of(i) != Some(ctx.successor(block, Edge::Jump)?)),
            BlockEnd::Branch => {
                1 + usize::from(next_of(i) != Some(ctx.successor(block, Edge::True)?))
            }
            BlockEnd::ReturnUnit | BlockEnd::ReturnValue => 1,
        };
        sizes.push(bb.insts.len() + end_size);
    }

    let mut offsets = HashMap::with_capacity(ctx.layout.len());
    let mut offset = 0;
    for (&block, size) in ctx.layout.iter().zip(&sizes) {
        offsets.insert(block, offset);
        offset += size;
    }

    let mut out = Vec::with_capacity(offset);
    for (i, &block) in ctx.layout.iter().enumerate() {
        let bb = &ctx.graph[block];
        out.extend(bb.insts.iter().cloned());
        match bb.end {
            BlockEnd::Open => bail!("block `{}` has no terminator", bb.label),
            BlockEnd::Jump => {
                let target = ctx.successor(block, Edge::Jump)?;
                if next_of(i) != Some(target) {
                    out.push(Instr::Jump(offsets[&target]));
                }
            }
            BlockEnd::Branch => {
                let then_bb = ctx.successor(block, Edge::True)?;
                let else_bb = ctx.successor(block, Edge::False)?;
                out.push(Instr::JumpIfFalse(offsets[&else_bb]));
                if next_of(i) != Some(then_bb) {
                    out.push(Instr::Jump(offsets[&then_bb]));
                }
            }
            BlockEnd::ReturnUnit => out.push(Instr::ReturnUnit),
            BlockEnd::ReturnValue => out.push(Instr::ReturnValue),
        }
    }
    Ok(out)
}
