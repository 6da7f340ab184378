use itertools::iproduct;
use crate::cust_errors::GraphError;
use crate::graph::Graph;

/// Checks that no two vertices of `sol_candidate` are adjacent in `graph`.
/// Every vertex is also checked against itself, which only matters for self loops.
///
/// Fails if a vertex of `sol_candidate` does not exist in `graph`.
pub fn is_solution<S: AsRef<str>>(graph: &Graph, sol_candidate: &[S]) -> Result<bool, GraphError> {
    for (v, u) in iproduct!(sol_candidate, sol_candidate) {
        if graph.is_adjacent(v.as_ref(), u.as_ref())? {
            return Ok(false)
        }
    }
    Ok(true)
}

impl Graph {

    /// Index version of `is_solution`. Removed or unknown nodes are never adjacent to anything,
    /// so this should only be called on the untouched graph.
    pub fn is_independent(&self, nodes: &[usize]) -> bool {
        iproduct!(nodes, nodes).all(|(&v, &u)| !self.adjacent(v, u))
    }

}
