use anyhow::{bail, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use super::Instr;

mod expressions;
mod statements;

/// How a basic block ends. Targets live on the outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    Open,
    Jump,
    Branch,
    ReturnUnit,
    ReturnValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Jump,
    True,
    False,
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Jump => write!(f, ""),
            Edge::True => write!(f, "true"),
            Edge::False => write!(f, "false"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: String,
    pub insts: Vec<Instr>,
    pub end: BlockEnd,
}

impl std::fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.label)?;
        for inst in &self.insts {
            writeln!(f, "  {}", inst)?;
        }
        match self.end {
            BlockEnd::ReturnUnit => write!(f, "  return_unit"),
            BlockEnd::ReturnValue => write!(f, "  return_value"),
            _ => Ok(()),
        }
    }
}

pub type Cfg = DiGraph<BasicBlock, Edge>;

pub struct CodegenContext {
    pub(super) graph: Cfg,
    current: NodeIndex,
    /// Blocks in the order they were first positioned at
    pub(super) layout: Vec<NodeIndex>,
}

impl Default for CodegenContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CodegenContext {
    pub fn new() -> Self {
        let mut graph = Cfg::new();
        let entry = graph.add_node(BasicBlock {
            label: "entry".to_string(),
            insts: Vec::new(),
            end: BlockEnd::Open,
        });
        Self {
            graph,
            current: entry,
            layout: vec![entry],
        }
    }

    pub fn append_basic_block(&mut self, name: &str) -> NodeIndex {
        let label = format!("{}{}", name, self.graph.node_count());
        self.graph.add_node(BasicBlock {
            label,
            insts: Vec::new(),
            end: BlockEnd::Open,
        })
    }

    pub fn position_at_end(&mut self, block: NodeIndex) {
        if !self.layout.contains(&block) {
            self.layout.push(block);
        }
        self.current = block;
    }

    fn emit(&mut self, inst: Instr) {
        self.graph[self.current].insts.push(inst);
    }

    fn terminate(&mut self, end: BlockEnd) -> Result<()> {
        let block = &mut self.graph[self.current];
        if block.end != BlockEnd::Open {
            bail!("block `{}` is already terminated", block.label);
        }
        block.end = end;
        Ok(())
    }

    pub fn build_jump(&mut self, target: NodeIndex) -> Result<()> {
        self.terminate(BlockEnd::Jump)?;
        self.graph.add_edge(self.current, target, Edge::Jump);
        Ok(())
    }

    pub fn build_conditional_branch(
        &mut self,
        then_block: NodeIndex,
        else_block: NodeIndex,
    ) -> Result<()> {
        self.terminate(BlockEnd::Branch)?;
        self.graph.add_edge(self.current, then_block, Edge::True);
        self.graph.add_edge(self.current, else_block, Edge::False);
        Ok(())
    }

    pub fn build_return_unit(&mut self) -> Result<()> {
        self.terminate(BlockEnd::ReturnUnit)
    }

    pub fn build_return_value(&mut self) -> Result<()> {
        self.terminate(BlockEnd::ReturnValue)
    }

    pub(super) fn successor(&self, block: NodeIndex, kind: Edge) -> Result<NodeIndex> {
        self.graph
            .edges_directed(block, Direction::Outgoing)
            .find(|e| *e.weight() == kind)
            .map(|e| e.target())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "block `{}` has no {:?} successor",
                    self.graph[block].label,
                    kind
                )
            })
    }
}
