use std::fmt;
use std::io::prelude::*;
use std::io;
use itertools::Itertools;
use fxhash::{FxHashMap, FxHashSet};
use crate::cust_errors::GraphError;

/// Undirected graph over named vertices.
///
/// Vertices live in an index arena in insertion order. A removed vertex keeps its index and name
/// but its adjacency entry becomes `None`, so indices stay valid across removals and a removed
/// vertex can be reinserted at its old place.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    names: Vec<String>,
    ids: FxHashMap<String, usize>,
    adj_list: Vec<Option<Vec<usize>>>,
}

impl Graph {

    /// Builds a graph from ordered `(vertex, neighbors)` entries.
    ///
    /// Fails if a vertex is declared twice, a neighbor is listed twice, a neighbor was never
    /// declared as vertex or an edge is only recorded in one direction.
    pub fn from_adjacency<S: AsRef<str>>(entries: &[(S, Vec<S>)]) -> Result<Self, GraphError> {
        let mut graph = Graph::default();
        for (name, _) in entries {
            let name = name.as_ref();
            if graph.ids.contains_key(name) {
                return Err(GraphError::DuplicateVertex(name.to_owned()))
            }
            graph.ids.insert(name.to_owned(), graph.names.len());
            graph.names.push(name.to_owned());
        }
        for (name, neighbors) in entries {
            let mut list = Vec::with_capacity(neighbors.len());
            for neighbor in neighbors {
                let neighbor = neighbor.as_ref();
                let id = *graph.ids.get(neighbor)
                    .ok_or_else(|| GraphError::UnknownVertex(neighbor.to_owned()))?;
                if list.contains(&id) {
                    return Err(GraphError::DuplicateEdge(name.as_ref().to_owned(), neighbor.to_owned()))
                }
                list.push(id);
            }
            graph.adj_list.push(Some(list));
        }
        for (node, neighbors) in graph.live() {
            if let Some(&neighbor) = neighbors.iter().find(|&&neighbor| !graph.adjacent(neighbor, node)) {
                return Err(GraphError::AsymmetricEdge(graph.name(node).to_owned(), graph.name(neighbor).to_owned()))
            }
        }
        Ok(graph)
    }

    /// Returns the index of the vertex `name` if it exists.
    pub fn id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied().filter(|&node| self.has_node(node))
    }

    fn id_checked(&self, name: &str) -> Result<usize, GraphError> {
        self.id(name).ok_or_else(|| GraphError::UnknownVertex(name.to_owned()))
    }

    /// Returns the name of `node`. Removed nodes keep their name.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn name(&self, node: usize) -> &str {
        &self.names[node]
    }

    /// Returns an iterator over all undeleted nodes in vertex order.
    pub fn nodes(&self) -> impl Iterator<Item=usize> + '_ {
        self.live().map(|(node, _)| node)
    }

    fn live(&self) -> impl Iterator<Item=(usize, &Vec<usize>)> + '_ {
        self.adj_list.iter()
            .enumerate()
            .filter_map(|(node, neighbors)| neighbors.as_ref().map(|neighbors| (node, neighbors)))
    }

    /// Returns an iterator over the names of all undeleted vertices in vertex order.
    pub fn vertices(&self) -> impl Iterator<Item=&str> + '_ {
        self.nodes().map(move |node| self.name(node))
    }

    /// Checks if `node` exists.
    pub fn has_node(&self, node: usize) -> bool {
        matches!(self.adj_list.get(node), Some(Some(_)))
    }

    /// Returns the number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.nodes().count()
    }

    /// Returns the sum of all degrees. Every undirected edge is counted twice.
    pub fn edge_count(&self) -> usize {
        self.live().map(|(_, neighbors)| neighbors.len()).sum()
    }

    /// Returns the ordered neighbors of `node`, or None if `node` was deleted.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn neighbors_of(&self, node: usize) -> &Option<Vec<usize>> {
        &self.adj_list[node]
    }

    /// Returns the degree of `node` or None if `node` does not exist.
    pub fn degree_of(&self, node: usize) -> Option<usize> {
        self.adj_list.get(node)?.as_ref().map(|neighbors| neighbors.len())
    }

    /// Checks if `node_b` is a neighbor of `node_a`. False if `node_a` does not exist.
    pub fn adjacent(&self, node_a: usize, node_b: usize) -> bool {
        match self.adj_list.get(node_a) {
            Some(Some(neighbors)) => neighbors.contains(&node_b),
            _ => false,
        }
    }

    /// Returns the degree of vertex `v`.
    pub fn degree(&self, v: &str) -> Result<usize, GraphError> {
        let node = self.id_checked(v)?;
        Ok(self.degree_of(node).expect("`node` exists"))
    }

    /// Returns the neighbors of vertex `v` in stored order.
    pub fn neighbors(&self, v: &str) -> Result<Vec<&str>, GraphError> {
        let node = self.id_checked(v)?;
        Ok(self.adj_list[node].iter().flatten().map(|&neighbor| self.name(neighbor)).collect())
    }

    /// Checks if `b` is listed as a neighbor of `a`. Only `a` has to exist.
    pub fn is_adjacent(&self, a: &str, b: &str) -> Result<bool, GraphError> {
        let node_a = self.id_checked(a)?;
        Ok(self.ids.get(b).map_or(false, |&node_b| self.adjacent(node_a, node_b)))
    }

    /// Removes vertex `v` and all incident edges.
    pub fn remove_vertex(&mut self, v: &str) -> Result<(), GraphError> {
        let node = self.id_checked(v)?;
        self.remove_node(node);
        Ok(())
    }

    /// Removes the node `node` and all adjacent edges from the graph.
    /// Returns the neighbors of `node` and, for every neighbor that lost `node`, the position
    /// `node` had in its list. Returns None if the node did not exist.
    pub fn remove_node(&mut self, node: usize) -> Option<(Vec<usize>, Vec<(usize, usize)>)> {
        let neighbors = self.adj_list.get_mut(node)?.take()?;
        let mut detached = Vec::with_capacity(neighbors.len());
        for &neighbor in &neighbors {
            if neighbor == node {
                continue
            }
            let list = self.adj_list[neighbor].as_mut().expect("the graph is undirected");
            if let Some(pos) = list.iter().position(|&n| n == node) {
                list.remove(pos);
                detached.push((neighbor, pos));
            }
        }
        Some((neighbors, detached))
    }

    /// Removes `node` together with all of its neighbors.
    /// Returns false if `node` did not exist.
    pub fn remove_closed_neighborhood(&mut self, node: usize) -> bool {
        match self.remove_node(node) {
            Some((neighbors, _)) => {
                for neighbor in neighbors.into_iter().filter(|&neighbor| neighbor != node) {
                    self.remove_node(neighbor);
                }
                true
            },
            None => false,
        }
    }

    /// Reinsert a node that was deleted earlier, undoing `remove_node`.
    /// Must be called in reverse order of the removals to restore the neighbor lists exactly.
    /// Returns false if the node was not deleted properly.
    pub fn reinsert_node(&mut self, node: usize, neighbors: Vec<usize>, detached: &[(usize, usize)]) -> bool {
        if !matches!(self.adj_list.get(node), Some(None)) {
            return false
        }
        for &(neighbor, pos) in detached.iter().rev() {
            match self.adj_list[neighbor].as_mut() {
                Some(list) if pos <= list.len() => list.insert(pos, node),
                _ => return false,
            }
        }
        self.adj_list[node] = Some(neighbors);
        true
    }

    /// Returns the first node of minimum degree in vertex order together with its neighbors, or
    /// `None` if the graph is empty.
    pub fn get_min_degree_node_and_neighbors(&self) -> Option<(usize, Vec<usize>)> {
        self.live()
            .min_by_key(|(_, neighbors)| neighbors.len())
            .map(|(node, neighbors)| (node, neighbors.clone()))
    }

    /// Returns the number of vertices, undirected edges, the maximum and the minimum degree.
    pub fn n_m_max_min_stats(&self) -> (usize, usize, usize, usize) {
        let degrees: Vec<usize> = self.live().map(|(_, neighbors)| neighbors.len()).collect();
        let max = degrees.iter().copied().max().unwrap_or(0);
        let min = degrees.iter().copied().min().unwrap_or(0);
        (degrees.len(), self.edge_count() / 2, max, min)
    }

    /// Write the graph in its textual form to a writer.
    pub fn write_graph<W: Write>(&self, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "{}", self)
    }

}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (node, neighbors)) in self.live().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{};", self.name(node), neighbors.iter().map(|&n| self.name(n)).join(","))?;
        }
        write!(f, ";")
    }
}

/// Two graphs are equal if they have the same vertices and every vertex has the same set of
/// neighbors. Vertex order and neighbor order are ignored.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_count() == other.vertex_count() && self.live().all(|(node, neighbors)| {
            match other.id(self.name(node)) {
                Some(other_node) => {
                    let ours: FxHashSet<&str> = neighbors.iter().map(|&n| self.name(n)).collect();
                    let theirs: FxHashSet<&str> = other.adj_list[other_node].iter().flatten()
                        .map(|&n| other.name(n))
                        .collect();
                    ours == theirs
                },
                None => false,
            }
        })
    }
}

impl Eq for Graph {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Reduction {
    AddedNode(usize, Vec<usize>, Vec<(usize, usize)>), // Added node to the solution and removed it. Holds its neighbors and where it was detached from them.
    RemovedNode(usize, Vec<usize>, Vec<(usize, usize)>), // Removed node. Same payload.
}

/// Struct to shrink the graph along a search path and rebuild it between branching steps.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct RebuildGraph {
    pub graph: Graph,
    reductions: Vec<Reduction>,
    register: Vec<usize>, // Keeps index of first reduction in current reduction step.
}

impl RebuildGraph {

    pub fn new(graph: Graph) -> Self {
        RebuildGraph {
            graph,
            reductions: Vec::new(),
            register: vec![0],
        }
    }

    /// Adds `node` to the solution: removes `node` and all its neighbors from the graph.
    /// Records the alterations.
    pub fn add_node_to_solution(&mut self, node: usize) -> bool {
        if let Some((neighbors, detached)) = self.graph.remove_node(node) {
            let to_remove: Vec<usize> = neighbors.iter().copied().filter(|&n| n != node).collect();
            self.reductions.push(Reduction::AddedNode(node, neighbors, detached));
            self.remove_nodes(to_remove);
            true
        } else {
            false
        }
    }

    /// Removes `node` from the graph.
    /// Records the alteration.
    pub fn remove_node(&mut self, node: usize) -> bool {
        if let Some((neighbors, detached)) = self.graph.remove_node(node) {
            self.reductions.push(Reduction::RemovedNode(node, neighbors, detached));
            true
        } else {
            false
        }
    }

    /// Removes `nodes` from the graph.
    pub fn remove_nodes<I: IntoIterator<Item=usize>>(&mut self, nodes: I) {
        for node in nodes {
            self.remove_node(node);
        }
    }

    /// Starts a new reduction segment that can be undone by `rebuild_section`.
    pub fn start_new_reduction(&mut self) {
        self.register.push(self.reductions.len());
    }

    pub fn check_registers(&self) -> (usize, Vec<usize>) {
        (self.reductions.len(), self.register.clone())
    }

    /// Rebuilds the last reduction segment.
    /// Either returns an error if the recovery failed, or the nodes that were added to the
    /// solution within the segment, latest first.
    pub fn rebuild_section(&mut self) -> Result<Vec<usize>, GraphError> {
        if self.register.len() <= 1 && self.reductions.is_empty() {
            return Err(GraphError::NothingToRebuildError)
        }
        let mut remove_from_solution = Vec::new();
        let up_to = self.register.pop().unwrap_or(0);
        while self.reductions.len() > up_to {
            match self.reductions.pop().expect("This can not be empty.") {
                Reduction::RemovedNode(node, neighbors, detached) => {
                    if !self.graph.reinsert_node(node, neighbors, &detached) {
                        return Err(GraphError::RebuildError)
                    }
                },
                Reduction::AddedNode(node, neighbors, detached) => {
                    if !self.graph.reinsert_node(node, neighbors, &detached) {
                        return Err(GraphError::RebuildError)
                    }
                    remove_from_solution.push(node);
                },
            }
        }
        if self.register.is_empty() {
            self.register.push(0);
        }
        Ok(remove_from_solution)
    }

    /// Rebuilds the graph completely.
    pub fn rebuild_complete(&mut self) -> Result<(), GraphError> {
        while self.register.len() > 1 {
            self.rebuild_section()?;
        }
        if !self.reductions.is_empty() {
            self.rebuild_section()?;
        }
        Ok(())
    }

    /// See .vertex_count() for `Graph`.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// See .get_min_degree_node_and_neighbors() for `Graph`.
    pub fn get_min_degree_node_and_neighbors(&self) -> Option<(usize, Vec<usize>)> {
        self.graph.get_min_degree_node_and_neighbors()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_graph;

    #[test]
    fn degree_sum_test() {
        let g = parse_graph("a:b,c,d; b:a,c; c:a,b; d:a;;").unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 8);
        assert_eq!(g.n_m_max_min_stats(), (4, 4, 3, 1));
        let g = parse_graph("a:;;").unwrap();
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.degree("a"), Ok(0));
    }

    #[test]
    fn queries_test() {
        let g = parse_graph("a:b; b:a,c; c:b;;").unwrap();
        assert_eq!(g.degree("b"), Ok(2));
        assert_eq!(g.neighbors("b"), Ok(vec!["a", "c"]));
        assert_eq!(g.is_adjacent("a", "b"), Ok(true));
        assert_eq!(g.is_adjacent("a", "c"), Ok(false));
        // Only the first vertex is checked for existence.
        assert_eq!(g.is_adjacent("a", "z"), Ok(false));
        assert_eq!(g.is_adjacent("z", "a"), Err(GraphError::UnknownVertex("z".to_owned())));
        assert_eq!(g.degree("z"), Err(GraphError::UnknownVertex("z".to_owned())));
        assert!(g.neighbors("z").is_err());
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_vertex_test() {
        let mut g = parse_graph("a:b,c,d; b:a,c; c:a,b; d:a;;").unwrap();
        assert!(g.remove_vertex("a").is_ok());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree("d"), Ok(0));
        assert_eq!(g.neighbors("b"), Ok(vec!["c"]));
        assert_eq!(g.to_string(), "b:c; c:b; d:;;");
        assert_eq!(g.remove_vertex("a"), Err(GraphError::UnknownVertex("a".to_owned())));
        assert_eq!(g.degree("a"), Err(GraphError::UnknownVertex("a".to_owned())));
        assert_eq!(g.id("a"), None);
    }

    #[test]
    fn remove_closed_neighborhood_test() {
        let mut g = parse_graph("a:b; b:a,c; c:b,d; d:c,e; e:d;;").unwrap();
        let b = g.id("b").unwrap();
        assert!(g.remove_closed_neighborhood(b));
        assert_eq!(g.to_string(), "d:e; e:d;;");
        assert!(!g.remove_closed_neighborhood(b));
    }

    #[test]
    fn from_adjacency_test() {
        let g = Graph::from_adjacency(&[("x", vec!["y"]), ("y", vec!["x"])]).unwrap();
        assert_eq!(g.to_string(), "x:y; y:x;;");
        assert_eq!(Graph::from_adjacency(&[("x", vec![]), ("x", vec![])]),
            Err(GraphError::DuplicateVertex("x".to_owned())));
        assert_eq!(Graph::from_adjacency(&[("x", vec!["y"])]),
            Err(GraphError::UnknownVertex("y".to_owned())));
        assert_eq!(Graph::from_adjacency(&[("x", vec!["y"]), ("y", vec![])]),
            Err(GraphError::AsymmetricEdge("x".to_owned(), "y".to_owned())));
        assert_eq!(Graph::from_adjacency(&[("x", vec!["y", "y"]), ("y", vec!["x"])]),
            Err(GraphError::DuplicateEdge("x".to_owned(), "y".to_owned())));
        let empty: &[(&str, Vec<&str>)] = &[];
        assert_eq!(Graph::from_adjacency(empty).unwrap().to_string(), ";");
    }

    #[test]
    fn self_loop_test() {
        let mut g = parse_graph("a:a,b; b:a;;").unwrap();
        assert_eq!(g.is_adjacent("a", "a"), Ok(true));
        assert_eq!(g.edge_count(), 3);
        assert!(g.remove_vertex("a").is_ok());
        assert_eq!(g.to_string(), "b:;;");
    }

    #[test]
    fn equality_ignores_order_test() {
        let g = parse_graph("a:b,c; b:a; c:a;;").unwrap();
        let h = parse_graph("c:a; a:c,b; b:a;;").unwrap();
        assert_eq!(g, h);
        let i = parse_graph("a:b; b:a; c:;;").unwrap();
        assert_ne!(g, i);
    }

    #[test]
    fn min_degree_tie_break_test() {
        let g = parse_graph("a:b; b:a,c; c:b,d; d:c,e; e:d;;").unwrap();
        let (node, neighbors) = g.get_min_degree_node_and_neighbors().unwrap();
        assert_eq!(g.name(node), "a");
        assert_eq!(&Some(neighbors), g.neighbors_of(node));
        assert_eq!(g.degree_of(node), Some(1));
        let g = parse_graph(";").unwrap();
        assert_eq!(g.get_min_degree_node_and_neighbors(), None);
    }

    #[test]
    fn rebuild_section_restores_order_test() {
        let g = parse_graph("a:b,c,d; b:d,a,c; c:a,b; d:b,a;;").unwrap();
        let text = g.to_string();
        let mut rg = RebuildGraph::new(g.clone());
        rg.start_new_reduction();
        assert!(rg.add_node_to_solution(g.id("c").unwrap()));
        assert_eq!(rg.graph.to_string(), "d:;;");
        rg.start_new_reduction();
        assert!(rg.add_node_to_solution(g.id("d").unwrap()));
        assert_eq!(rg.vertex_count(), 0);
        assert_eq!(rg.rebuild_section(), Ok(vec![g.id("d").unwrap()]));
        assert_eq!(rg.graph.to_string(), "d:;;");
        assert_eq!(rg.rebuild_section(), Ok(vec![g.id("c").unwrap()]));
        assert_eq!(rg.graph.to_string(), text);
        assert_eq!(rg.rebuild_section(), Err(GraphError::NothingToRebuildError));
    }

    #[test]
    fn rebuild_complete_test() {
        let g = parse_graph("a:b; b:a,c; c:b,d; d:c,e; e:d;;").unwrap();
        let mut rg = RebuildGraph::new(g.clone());
        rg.remove_node(g.id("c").unwrap());
        rg.start_new_reduction();
        assert!(rg.add_node_to_solution(g.id("a").unwrap()));
        rg.start_new_reduction();
        assert!(rg.add_node_to_solution(g.id("e").unwrap()));
        assert!(!rg.add_node_to_solution(g.id("e").unwrap()));
        assert_eq!(rg.check_registers().1.len(), 3);
        assert!(rg.rebuild_complete().is_ok());
        assert_eq!(rg.graph.to_string(), g.to_string());
        assert_eq!(rg.check_registers(), (0, vec![0]));
    }

    #[test]
    fn write_graph_test() {
        let g = parse_graph("a:b; b:a;;").unwrap();
        let mut out = Vec::new();
        assert!(g.write_graph(&mut out).is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "a:b; b:a;;\n");
    }
}
