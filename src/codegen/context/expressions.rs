use anyhow::Result;

use crate::codegen::Instr;
use crate::lir::{LirExpr, LirExprKind};

use super::CodegenContext;

impl CodegenContext {
    /// Emit code leaving exactly one value on the stack.
    pub fn codegen_expr(&mut self, expr: &LirExpr) -> Result<()> {
        match &expr.kind {
            LirExprKind::BoolLiteral(value) => self.emit(Instr::PushBool(*value)),
            LirExprKind::IntLiteral(value) => self.emit(Instr::PushInt(*value)),
            LirExprKind::Var(name) => self.emit(Instr::Load(name.clone())),
            LirExprKind::SelfAddress => self.emit(Instr::SelfAddress),
            LirExprKind::Tuple(elems) => {
                for elem in elems {
                    self.codegen_expr(elem)?;
                }
                self.emit(Instr::MakeTuple(elems.len()));
            }
            LirExprKind::Branch {
                cond,
                then_value,
                else_value,
            } => self.codegen_branch(cond, then_value, else_value)?,
        }
        Ok(())
    }

    fn codegen_branch(
        &mut self,
        cond: &LirExpr,
        then_value: &LirExpr,
        else_value: &LirExpr,
    ) -> Result<()> {
        self.codegen_expr(cond)?;

        let then_bb = self.append_basic_block("sc_then");
        let else_bb = self.append_basic_block("sc_else");
        let merge_bb = self.append_basic_block("sc_merge");
        self.build_conditional_branch(then_bb, else_bb)?;

        // Each arm pushes one value; the merge block sees exactly one of them.
        self.position_at_end(then_bb);
        self.codegen_expr(then_value)?;
        self.build_jump(merge_bb)?;

        self.position_at_end(else_bb);
        self.codegen_expr(else_value)?;
        self.build_jump(merge_bb)?;

        self.position_at_end(merge_bb);
        Ok(())
    }
}
