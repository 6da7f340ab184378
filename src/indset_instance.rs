use std::borrow::Cow;
use std::convert::TryFrom;
use std::io::prelude::*;
use std::io;
use crate::cust_errors::ParamError;
use crate::graph::{Graph, RebuildGraph};
use crate::interrupter::Interrupter;

/// A parametrized independent set instance: find `k` pairwise non-adjacent vertices in `graph`.
#[derive(Debug, Clone)]
pub struct IndSetInstance<'a> {
    pub graph: RebuildGraph,
    // Untouched copy of `graph`, answers adjacency queries for vertices that were removed along
    // the current search path.
    pub (crate) orig: Cow<'a, Graph>,
    pub k: usize,
    // Nodes taken along the current search path, in the order they were taken.
    pub solution: Vec<usize>,
    pub interrupter: Option<Interrupter>,
    pub (crate) branches: usize,
}

impl<'a> IndSetInstance<'a> {

    fn with_original(orig: Cow<'a, Graph>, graph: Graph, k: usize) -> Self {
        IndSetInstance {
            orig,
            graph: RebuildGraph::new(graph),
            k,
            solution: Vec::new(),
            interrupter: None,
            branches: 0,
        }
    }

    /// Returns a new instance of the parametrized independent set problem.
    pub fn new(graph: Graph, k: usize) -> Self {
        IndSetInstance::with_original(Cow::Owned(graph.clone()), graph, k)
    }

    /// Returns a new instance that borrows `graph` as the untouched original, so only the
    /// working graph is copied.
    pub fn from_borrowed(graph: &'a Graph, k: usize) -> Self {
        IndSetInstance::with_original(Cow::Borrowed(graph), graph.clone(), k)
    }

    /// Like `from_borrowed` but checks that `k` is not negative.
    pub fn try_new(graph: &'a Graph, k: isize) -> Result<Self, ParamError> {
        let k = usize::try_from(k).map_err(|_| ParamError::InvalidParameter(k))?;
        Ok(IndSetInstance::from_borrowed(graph, k))
    }

    /// Returns the graph the instance was created with.
    pub fn original(&self) -> &Graph {
        &self.orig
    }

    pub fn set_time_interrupter(&mut self, duration: u128) {
        self.interrupter = Some(Interrupter::new(Some(duration)));
    }

    pub fn set_interrupter(&mut self, interrupter: Interrupter) {
        self.interrupter = Some(interrupter);
    }

    /// Number of recursive calls of the last `solve()`.
    pub fn branches(&self) -> usize {
        self.branches
    }

    /// Returns the names of the nodes in `self.solution`.
    pub fn solution_names(&self) -> Vec<String> {
        self.solution.iter().map(|&node| self.orig.name(node).to_owned()).collect()
    }

    /// Writes `solution`, one vertex per line.
    pub fn write_solution<W: Write>(solution: &[String], mut out: W) -> Result<(), io::Error> {
        for elem in solution {
            writeln!(out, "{}", elem)?;
        }
        Ok(())
    }

}
