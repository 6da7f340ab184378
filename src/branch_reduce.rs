use std::convert::TryFrom;
use std::error;
use std::iter;
use crate::cust_errors::{GraphError, ParamError};
use crate::graph::Graph;
use crate::indset_instance::IndSetInstance;

/// Finds an independent set of exactly `k` vertices in `graph` and returns it, or an empty
/// vector if there is none.
///
/// Bounded search tree: pick a vertex `v` of minimum degree; some maximum independent set
/// contains `v` or one of its neighbors, so branch on taking `v` or any neighbor, each time
/// removing the taken vertex together with its neighbors. On planar graphs the minimum degree
/// is at most 5, which gives `O(6^k * poly(n))`. On other graphs the result is still sound, only
/// the running time bound is lost.
///
/// Returns `ParamError::InvalidParameter` for negative `k` before doing any work. `graph` is not
/// modified and copied once.
///
/// The search recurses once per taken vertex, so the stack depth grows with `k`. A `k` larger
/// than the number of vertices returns right away, but on graphs with thousands of vertices a
/// feasible `k` of the same order can exhaust the default thread stack.
pub fn find_independent_set(graph: &Graph, k: isize) -> Result<Vec<String>, Box<dyn error::Error>> {
    IndSetInstance::try_new(graph, k)?.solve()
}

/// Same search as `find_independent_set`, but every branch works on its own deep copy of the
/// graph instead of undoing its removals. Returns the same result.
pub fn find_independent_set_by_copy(graph: &Graph, k: isize) -> Result<Vec<String>, Box<dyn error::Error>> {
    let k = usize::try_from(k).map_err(|_| ParamError::InvalidParameter(k))?;
    let solution = copy_branching(graph, k, Vec::new(), graph);
    Ok(solution.into_iter().map(|node| graph.name(node).to_owned()).collect())
}

fn copy_branching(graph: &Graph, k: usize, sol: Vec<usize>, orig: &Graph) -> Vec<usize> {
    if k == 0 {
        if orig.is_independent(&sol) {
            return sol
        }
        return Vec::new()
    }
    // Every taken vertex removes at least itself.
    if k > graph.vertex_count() {
        return Vec::new()
    }
    let (node, neighbors) = match graph.get_min_degree_node_and_neighbors() {
        Some(found) => found,
        None => return Vec::new(),
    };
    for branch_node in iter::once(node).chain(neighbors) {
        let mut g_minus = graph.clone();
        g_minus.remove_closed_neighborhood(branch_node);
        let mut sol_branch = sol.clone();
        sol_branch.push(branch_node);
        let found = copy_branching(&g_minus, k - 1, sol_branch, orig);
        if !found.is_empty() {
            return found
        }
    }
    Vec::new()
}

impl IndSetInstance<'_> {

    /// Runs the search on `self.graph` and returns the names of the found solution, or an empty
    /// vector if there is none. `self.solution` keeps the found nodes.
    ///
    /// Removals are recorded in `self.graph` and undone before the next sibling branch is tried,
    /// so all branches see the same graph a deep copy would give them.
    /// If `self.interrupter` fires, the graph is rebuilt and the `InterruptError` is returned.
    pub fn solve(&mut self) -> Result<Vec<String>, Box<dyn error::Error>> {
        self.branches = 0;
        self.solution.clear();
        let found = self.branching_recursion(self.k);
        self.graph.rebuild_complete()?;
        match found {
            Ok(true) => Ok(self.solution_names()),
            Ok(false) => Ok(Vec::new()),
            Err(e) => {
                self.solution.clear();
                Err(e)
            },
        }
    }

    fn branching_recursion(&mut self, k: usize) -> Result<bool, Box<dyn error::Error>> {
        if let Some(interrupter) = &self.interrupter {
            interrupter.send_interrupt()?;
        }
        self.branches += 1;
        if k == 0 {
            return Ok(self.orig.is_independent(&self.solution))
        }
        if k > self.graph.vertex_count() {
            return Ok(false)
        }
        let (node, neighbors) = match self.graph.get_min_degree_node_and_neighbors() {
            Some(found) => found,
            None => return Ok(false),
        };
        // Take `node` first, then each of its neighbors.
        for branch_node in iter::once(node).chain(neighbors) {
            self.graph.start_new_reduction();
            if !self.graph.add_node_to_solution(branch_node) {
                return Err(Box::new(GraphError::UnknownVertex(self.orig.name(branch_node).to_owned())))
            }
            self.solution.push(branch_node);
            if self.branching_recursion(k - 1)? {
                return Ok(true)
            }
            let taken = self.graph.rebuild_section()?;
            self.solution.truncate(self.solution.len() - taken.len());
        }
        Ok(false)
    }

}
