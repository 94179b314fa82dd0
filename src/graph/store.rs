//! Adjacency-set graph store keyed by insertion order

use std::collections::{BTreeSet, HashMap};

use crate::error::{AnalysisError, Result};

/// Cleaned user handle identifying a node
pub type NodeId = String;

/// Sequence of disjoint node groups covering every node of a graph
pub type Partition = Vec<Vec<NodeId>>;

/// Identity of an edge in terms of node insertion indices.
///
/// Directed graphs keep `(source, target)` as given. Undirected graphs store the
/// pair with `source <= target` so `(u, v)` and `(v, u)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub source: u32,
    pub target: u32,
}

impl EdgeKey {
    /// Build the canonical key for an edge between two node indices
    pub fn new(source: u32, target: u32, directed: bool) -> Self {
        if directed || source <= target {
            Self { source, target }
        } else {
            Self { source: target, target: source }
        }
    }
}

/// Simple graph over string node ids, directed or undirected.
///
/// Nodes are numbered in the order they were first added and that index is
/// what every ordering in this crate is derived from. Edges are a set: adding
/// an existing edge is a no-op and self-loops are never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    directed: bool,

    /// Node string ids, indexed by insertion order
    node_ids: Vec<NodeId>,

    /// Mapping from string ids to node indices
    id_to_index: HashMap<NodeId, u32>,

    /// Outgoing neighbors per node (all neighbors when undirected)
    outgoing: Vec<BTreeSet<u32>>,

    /// Incoming neighbors per node (unused when undirected)
    incoming: Vec<BTreeSet<u32>>,

    edges: BTreeSet<EdgeKey>,
}

impl Graph {
    /// Create an empty graph
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            node_ids: Vec::new(),
            id_to_index: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
            edges: BTreeSet::new(),
        }
    }

    /// Build a graph from a sequence of node id pairs.
    ///
    /// Endpoints that were not seen before are added implicitly. Repeated pairs
    /// (and reversed pairs when undirected) collapse into one edge.
    pub fn build<I, S>(edges: I, directed: bool) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut graph = Self::new(directed);
        for (src, dst) in edges {
            graph.add_edge(src.as_ref(), dst.as_ref());
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Get or create the index for the given string id
    pub fn add_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.outgoing.push(BTreeSet::new());
        self.incoming.push(BTreeSet::new());
        idx
    }

    /// Add an edge, returning true if it was not already present.
    ///
    /// A self-loop registers its node but is not stored as an edge.
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str) -> bool {
        let src = self.add_node(src_id);
        let dst = self.add_node(dst_id);

        if src == dst {
            log::debug!("Ignoring self-loop on {}", src_id);
            return false;
        }

        self.insert_edge(src, dst)
    }

    fn insert_edge(&mut self, src: u32, dst: u32) -> bool {
        let key = EdgeKey::new(src, dst, self.directed);
        if !self.edges.insert(key) {
            return false;
        }

        self.outgoing[src as usize].insert(dst);
        if self.directed {
            self.incoming[dst as usize].insert(src);
        } else {
            self.outgoing[dst as usize].insert(src);
        }
        true
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Edge keys in ascending index order
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edges.iter().copied()
    }

    /// Edges resolved to their string endpoints
    pub fn edge_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(move |e| (self.node_id(e.source), self.node_id(e.target)))
    }

    /// String id for a node index
    ///
    /// # Panics
    ///
    /// Panics if `index` was not issued by this graph.
    pub fn node_id(&self, index: u32) -> &str {
        &self.node_ids[index as usize]
    }

    /// Insertion index of a node, if present
    pub fn index_of(&self, id: &str) -> Option<u32> {
        self.id_to_index.get(id).copied()
    }

    fn require(&self, id: &str) -> Result<u32> {
        self.index_of(id)
            .ok_or_else(|| AnalysisError::UnknownNode(id.to_string()))
    }

    /// Canonical key of the edge between two named nodes, if it exists
    pub fn edge_key(&self, src_id: &str, dst_id: &str) -> Option<EdgeKey> {
        let key = EdgeKey::new(self.index_of(src_id)?, self.index_of(dst_id)?, self.directed);
        self.edges.contains(&key).then_some(key)
    }

    /// Whether the edge is present; undirected keys match either orientation
    pub fn contains_edge(&self, key: EdgeKey) -> bool {
        self.edges.contains(&EdgeKey::new(key.source, key.target, self.directed))
    }

    /// Distinct neighbors of a node, ignoring direction, in insertion order
    pub fn neighbors(&self, id: &str) -> Result<Vec<&str>> {
        let idx = self.require(id)?;
        Ok(self
            .neighbor_indices(idx)
            .into_iter()
            .map(|n| self.node_id(n))
            .collect())
    }

    /// Neighbor indices of a node, ignoring direction, sorted ascending
    pub fn neighbor_indices(&self, index: u32) -> Vec<u32> {
        let out = &self.outgoing[index as usize];
        if !self.directed {
            return out.iter().copied().collect();
        }
        out.union(&self.incoming[index as usize]).copied().collect()
    }

    /// Successor indices (all neighbors when undirected)
    pub fn successors(&self, index: u32) -> impl Iterator<Item = u32> + '_ {
        self.outgoing[index as usize].iter().copied()
    }

    /// Degree of a node: distinct neighbors when undirected, in + out when directed
    pub fn degree(&self, id: &str) -> Result<usize> {
        Ok(self.degree_of(self.require(id)?))
    }

    /// Degree by node index
    pub fn degree_of(&self, index: u32) -> usize {
        let i = index as usize;
        if self.directed {
            self.outgoing[i].len() + self.incoming[i].len()
        } else {
            self.outgoing[i].len()
        }
    }

    /// Remove an edge in place
    pub fn remove_edge(&mut self, key: EdgeKey) -> Result<()> {
        let key = EdgeKey::new(key.source, key.target, self.directed);
        let in_range = (key.source.max(key.target) as usize) < self.node_ids.len();
        if !in_range || !self.edges.remove(&key) {
            let name = |i: u32| {
                self.node_ids
                    .get(i as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", i))
            };
            return Err(AnalysisError::EdgeNotFound {
                from: name(key.source),
                to: name(key.target),
            });
        }

        self.outgoing[key.source as usize].remove(&key.target);
        if self.directed {
            self.incoming[key.target as usize].remove(&key.source);
        } else {
            self.outgoing[key.target as usize].remove(&key.source);
        }
        Ok(())
    }

    /// Weakly connected components in insertion order
    pub fn connected_components(&self) -> Partition {
        crate::graph::algorithms::connected_components(self)
            .into_iter()
            .map(|members| members.into_iter().map(|n| self.node_ids[n as usize].clone()).collect())
            .collect()
    }

    /// Undirected view of this graph with the same node order
    pub fn to_undirected(&self) -> Graph {
        if !self.directed {
            return self.clone();
        }

        let mut projected = Graph::new(false);
        for id in &self.node_ids {
            projected.add_node(id);
        }
        for key in &self.edges {
            projected.insert_edge(key.source, key.target);
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undirected_edges_collapse() {
        let graph = Graph::build([("a", "b"), ("b", "a"), ("a", "b")], false);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree("a").unwrap(), 1);
        assert_eq!(graph.degree("b").unwrap(), 1);
    }

    #[test]
    fn test_directed_keeps_both_directions() {
        let graph = Graph::build([("a", "b"), ("b", "a")], true);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree("a").unwrap(), 2);
        assert_eq!(graph.neighbors("a").unwrap(), vec!["b"]);
    }

    #[test]
    fn test_self_loop_registers_node_only() {
        let mut graph = Graph::new(false);
        assert!(!graph.add_edge("a", "a"));
        assert_eq!(graph.nodes(), &["a".to_string()]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.degree("a").unwrap(), 0);
    }

    #[test]
    fn test_remove_edge_either_orientation() {
        let mut graph = Graph::build([("a", "b"), ("b", "c")], false);
        let b = graph.index_of("b").unwrap();
        let a = graph.index_of("a").unwrap();
        graph.remove_edge(EdgeKey { source: b, target: a }).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree("a").unwrap(), 0);
        assert!(graph.edge_key("a", "b").is_none());
    }

    #[test]
    fn test_contains_edge() {
        let undirected = Graph::build([("a", "b")], false);
        assert!(undirected.contains_edge(EdgeKey { source: 0, target: 1 }));
        assert!(undirected.contains_edge(EdgeKey { source: 1, target: 0 }));
        assert!(!undirected.contains_edge(EdgeKey { source: 0, target: 0 }));

        let directed = Graph::build([("a", "b")], true);
        assert!(directed.contains_edge(EdgeKey { source: 0, target: 1 }));
        assert!(!directed.contains_edge(EdgeKey { source: 1, target: 0 }));
        assert!(!directed.contains_edge(EdgeKey { source: 0, target: 7 }));
    }

    #[test]
    fn test_remove_missing_edge() {
        let mut graph = Graph::build([("a", "b"), ("c", "d")], true);
        let key = EdgeKey { source: 1, target: 0 };
        let err = graph.remove_edge(key).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EdgeNotFound { from: "b".into(), to: "a".into() }
        );

        let out_of_range = EdgeKey { source: 0, target: 42 };
        assert!(matches!(
            graph.remove_edge(out_of_range),
            Err(AnalysisError::EdgeNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_node() {
        let graph = Graph::new(false);
        assert_eq!(
            graph.degree("ghost"),
            Err(AnalysisError::UnknownNode("ghost".into()))
        );
    }

    #[test]
    fn test_projection_merges_reciprocal_edges() {
        let directed = Graph::build([("a", "b"), ("b", "a"), ("b", "c")], true);
        let projected = directed.to_undirected();
        assert!(!projected.is_directed());
        assert_eq!(projected.nodes(), directed.nodes());
        assert_eq!(projected.edge_count(), 2);
    }
}
