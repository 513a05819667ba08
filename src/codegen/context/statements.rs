use anyhow::{bail, Result};
use petgraph::graph::NodeIndex;

use crate::codegen::Instr;
use crate::lir::{Block, NormStmt, Terminator};

use super::CodegenContext;

impl CodegenContext {
    /// Emit a normalized block. `continuation` is where a `Fallthrough`
    /// terminator jumps to; the function body has none.
    pub fn codegen_block(&mut self, block: &Block, continuation: Option<NodeIndex>) -> Result<()> {
        for stmt in &block.stmts {
            self.codegen_stmt(stmt)?;
        }

        match &block.terminator {
            Terminator::ReturnUnit => self.build_return_unit(),
            Terminator::ReturnValue(value) => {
                self.codegen_expr(value)?;
                self.build_return_value()
            }
            Terminator::If {
                condition,
                then_block,
                else_block,
            } => {
                self.codegen_expr(condition)?;
                let then_bb = self.append_basic_block("then");
                let else_bb = self.append_basic_block("else");
                self.build_conditional_branch(then_bb, else_bb)?;

                self.position_at_end(then_bb);
                self.codegen_block(then_block, continuation)?;
                self.position_at_end(else_bb);
                self.codegen_block(else_block, continuation)
            }
            Terminator::Fallthrough => match continuation {
                Some(target) => self.build_jump(target),
                None => bail!("fallthrough terminator outside of an if statement"),
            },
        }
    }

    fn codegen_stmt(&mut self, stmt: &NormStmt) -> Result<()> {
        match stmt {
            NormStmt::Let { name, value, .. } => {
                self.codegen_expr(value)?;
                self.emit(Instr::Store(name.clone()));
            }
            NormStmt::Expr(value) => {
                self.codegen_expr(value)?;
                self.emit(Instr::Pop);
            }
            NormStmt::If {
                condition,
                then_block,
                else_block,
            } => {
                self.codegen_expr(condition)?;
                let then_bb = self.append_basic_block("then");
                let else_bb = self.append_basic_block("else");
                let merge_bb = self.append_basic_block("endif");
                self.build_conditional_branch(then_bb, else_bb)?;

                self.position_at_end(then_bb);
                self.codegen_block(then_block, Some(merge_bb))?;
                self.position_at_end(else_bb);
                self.codegen_block(else_block, Some(merge_bb))?;

                self.position_at_end(merge_bb);
            }
        }
        Ok(())
    }
}
