//! Graph construction module

use crate::graph::store::{Graph, NodeId};

/// Counters collected while building a graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Pairs offered to the builder
    pub pairs_seen: usize,

    /// Pairs dropped because an endpoint failed cleaning
    pub rejected: usize,

    /// Pairs that repeated an existing edge
    pub duplicates: usize,

    /// Pairs whose endpoints were the same user
    pub self_loops: usize,
}

/// Builder for incrementally constructing a Graph from raw user pairs
pub struct GraphBuilder<F> {
    graph: Graph,

    /// Token cleaner; `None` rejects the token
    clean: F,

    stats: BuildStats,
}

impl<F> GraphBuilder<F>
where
    F: Fn(&str) -> Option<NodeId>,
{
    /// Create a new graph builder using the given cleaning function
    pub fn new(directed: bool, clean: F) -> Self {
        Self {
            graph: Graph::new(directed),
            clean,
            stats: BuildStats::default(),
        }
    }

    /// Clean both tokens and add an edge between them.
    ///
    /// Returns true if a new edge was inserted.
    pub fn add_pair(&mut self, raw_src: &str, raw_dst: &str) -> bool {
        self.stats.pairs_seen += 1;

        let (Some(src), Some(dst)) = ((self.clean)(raw_src), (self.clean)(raw_dst)) else {
            self.stats.rejected += 1;
            return false;
        };

        if src == dst {
            self.stats.self_loops += 1;
        }

        let inserted = self.graph.add_edge(&src, &dst);
        if !inserted && src != dst {
            self.stats.duplicates += 1;
        }
        inserted
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Finish building
    pub fn build(self) -> Graph {
        log::info!(
            "Built {} graph with {} nodes and {} edges ({} pairs, {} rejected, {} duplicates, {} self-loops)",
            if self.graph.is_directed() { "directed" } else { "undirected" },
            self.graph.node_count(),
            self.graph.edge_count(),
            self.stats.pairs_seen,
            self.stats.rejected,
            self.stats.duplicates,
            self.stats.self_loops,
        );
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaning::clean_user_name;

    #[test]
    fn test_builder_counts() {
        let mut builder = GraphBuilder::new(false, clean_user_name);
        assert!(builder.add_pair("@Alice", "bob"));
        assert!(!builder.add_pair("bob", "alice"));
        assert!(!builder.add_pair("NAN", "bob"));
        assert!(!builder.add_pair("carol", "@carol"));

        let stats = builder.stats();
        assert_eq!(stats.pairs_seen, 4);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.self_loops, 1);

        let graph = builder.build();
        assert_eq!(graph.nodes(), &["alice", "bob", "carol"]);
        assert_eq!(graph.edge_count(), 1);
    }
}
