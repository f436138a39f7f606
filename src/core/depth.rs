// File: src/core/depth.rs
use crate::core::graph::WordGraph;
use crate::core::types::{LexicalUnit, WordId};
use crate::error::GraphError;
use std::collections::{HashMap, HashSet};

/// Memoized longest-prerequisite-chain calculator.
///
/// Shared ancestors are common (many words reuse the same roots), so every
/// result is cached for the lifetime of the calculator. A separate
/// in-progress set turns a cyclic decomposition into `GraphError::Cycle`
/// instead of unbounded recursion.
pub struct DepthCalculator<'g> {
    graph: &'g WordGraph,
    memo: HashMap<&'g str, usize>,
    in_progress: HashSet<&'g str>,
}

impl<'g> DepthCalculator<'g> {
    pub fn new(graph: &'g WordGraph) -> Self {
        Self {
            graph,
            memo: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// 0 for units without parents (and for identifiers not in the graph),
    /// otherwise one more than the deepest parent.
    pub fn depth(&mut self, word: &str) -> Result<usize, GraphError> {
        match self.graph.get(word) {
            Some(unit) => self.depth_of(unit),
            None => Ok(0),
        }
    }

    fn depth_of(&mut self, unit: &'g LexicalUnit) -> Result<usize, GraphError> {
        let word = unit.word.as_str();
        if let Some(&depth) = self.memo.get(word) {
            return Ok(depth);
        }
        if !self.in_progress.insert(word) {
            return Err(GraphError::Cycle {
                word: word.to_string(),
            });
        }

        let mut depth = 0;
        for parent in &unit.parents {
            let parent_depth = match self.graph.get(parent) {
                Some(parent_unit) => self.depth_of(parent_unit)?,
                None => 0,
            };
            depth = depth.max(parent_depth + 1);
        }

        self.in_progress.remove(word);
        self.memo.insert(word, depth);
        Ok(depth)
    }

    /// Depth of every unit in the graph.
    pub fn compute_all(mut self) -> Result<HashMap<WordId, usize>, GraphError> {
        let graph = self.graph;
        for unit in graph.iter() {
            self.depth_of(unit)?;
        }
        Ok(self
            .memo
            .into_iter()
            .map(|(word, depth)| (word.to_string(), depth))
            .collect())
    }
}
