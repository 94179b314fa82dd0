//! Graph algorithms for analysis

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::graph::store::{EdgeKey, Graph};

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let px = self.parent[x as usize];
        if px != x {
            self.parent[x as usize] = self.find(px);
        }
        self.parent[x as usize]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += rank_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += rank_x;
        }
    }
}

/// Find weakly connected components as lists of node indices.
///
/// Components are ordered by their lowest node index and members are sorted
/// ascending, so the result follows insertion order of the graph.
pub fn connected_components(graph: &Graph) -> Vec<Vec<u32>> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for edge in graph.edges() {
        sets.union(edge.source, edge.target);
    }

    let mut root_to_component: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<Vec<u32>> = Vec::new();

    for node in 0..node_count as u32 {
        let root = sets.find(node);
        let slot = *root_to_component.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(node);
    }

    components
}

/// Edge betweenness centrality for every edge, using Brandes' accumulation.
///
/// Scores are summed over ordered `(s, t)` pairs and are not normalized, so on
/// an undirected graph each unordered pair contributes twice. Shortest paths
/// follow edge direction when the graph is directed.
pub fn edge_betweenness(graph: &Graph) -> BTreeMap<EdgeKey, f64> {
    let n = graph.node_count();
    let directed = graph.is_directed();
    let mut scores: BTreeMap<EdgeKey, f64> = graph.edges().map(|e| (e, 0.0)).collect();

    let mut order: Vec<u32> = Vec::with_capacity(n);
    let mut preds: Vec<Vec<u32>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    let mut delta = vec![0.0f64; n];
    let mut queue = VecDeque::new();

    for s in 0..n as u32 {
        order.clear();
        for i in 0..n {
            preds[i].clear();
            sigma[i] = 0.0;
            dist[i] = -1;
            delta[i] = 0.0;
        }

        sigma[s as usize] = 1.0;
        dist[s as usize] = 0;
        queue.push_back(s);

        // Single-source shortest paths by hop count
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let next = dist[v as usize] + 1;
            for w in graph.successors(v) {
                let wi = w as usize;
                if dist[wi] < 0 {
                    dist[wi] = next;
                    queue.push_back(w);
                }
                if dist[wi] == next {
                    sigma[wi] += sigma[v as usize];
                    preds[wi].push(v);
                }
            }
        }

        // Dependency accumulation in order of non-increasing distance
        for &w in order.iter().rev() {
            let wi = w as usize;
            for &v in &preds[wi] {
                let vi = v as usize;
                let credit = sigma[vi] / sigma[wi] * (1.0 + delta[wi]);
                if let Some(score) = scores.get_mut(&EdgeKey::new(v, w, directed)) {
                    *score += credit;
                }
                delta[vi] += credit;
            }
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(graph: &Graph, scores: &BTreeMap<EdgeKey, f64>, u: &str, v: &str) -> f64 {
        scores[&graph.edge_key(u, v).unwrap()]
    }

    #[test]
    fn test_disjoint_sets() {
        let mut sets = DisjointSets::new(4);
        sets.union(0, 1);
        sets.union(2, 1);
        assert_eq!(sets.find(0), sets.find(2));
        assert_ne!(sets.find(3), sets.find(1));

        // Repeated unions are no-ops
        sets.union(0, 2);
        assert_eq!(sets.find(1), sets.find(2));
        assert_eq!(sets.find(3), 3);
    }

    #[test]
    fn test_components_follow_insertion_order() {
        let graph = Graph::build([("d", "e"), ("a", "b"), ("e", "f"), ("c", "a")], false);
        assert_eq!(connected_components(&graph), vec![vec![0, 1, 4], vec![2, 3, 5]]);
    }

    #[test]
    fn test_components_are_weak_for_directed() {
        let graph = Graph::build([("a", "b"), ("c", "b")], true);
        assert_eq!(connected_components(&graph), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_path_betweenness() {
        // a - b - c: ordered pairs through (a,b) are a->b, a->c, b->a, c->a
        let graph = Graph::build([("a", "b"), ("b", "c")], false);
        let scores = edge_betweenness(&graph);
        assert!((score(&graph, &scores, "a", "b") - 4.0).abs() < 1e-12);
        assert!((score(&graph, &scores, "b", "c") - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_square_splits_paths() {
        // a-b-c-d-a: opposite corners have two shortest paths each
        let graph = Graph::build([("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")], false);
        let scores = edge_betweenness(&graph);
        for (u, v) in [("a", "b"), ("b", "c"), ("c", "d"), ("d", "a")] {
            assert!((score(&graph, &scores, u, v) - 4.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_directed_betweenness_follows_direction() {
        let graph = Graph::build([("a", "b"), ("b", "c")], true);
        let scores = edge_betweenness(&graph);
        // a->b carries a->b and a->c; b->c carries a->c and b->c
        assert!((score(&graph, &scores, "a", "b") - 2.0).abs() < 1e-12);
        assert!((score(&graph, &scores, "b", "c") - 2.0).abs() < 1e-12);
    }
}
