//! Hub ranking and community statistics

use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::cluster::{Community, CommunityMap, RESIDUAL_COMMUNITY};
use crate::graph::{Graph, NodeId, Partition};

/// The `k` highest-degree nodes with their degrees.
///
/// Sorted by degree (highest first); equal degrees keep graph insertion order.
/// Returns fewer than `k` entries when the graph is smaller.
pub fn top_hubs(graph: &Graph, k: usize) -> Vec<(NodeId, usize)> {
    if k == 0 || graph.is_empty() {
        return Vec::new();
    }

    (0..graph.node_count() as u32)
        .map(|idx| (idx, graph.degree_of(idx)))
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(k)
        .map(|(idx, degree)| (graph.node_id(idx).to_string(), degree))
        .collect()
}

/// Calculate density (actual edges / potential edges)
pub fn calculate_density(graph: &Graph, members: &[u32]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    let potential_edges = if graph.is_directed() { n * (n - 1) } else { n * (n - 1) / 2 };
    let member_set: HashSet<u32> = members.iter().copied().collect();

    let actual_edges = graph
        .edges()
        .filter(|e| member_set.contains(&e.source) && member_set.contains(&e.target))
        .count();

    actual_edges as f32 / potential_edges as f32
}

/// Members ranked by degree inside the community, highest first.
///
/// Only edges with both endpoints in `members` count; on a directed graph a
/// member's internal degree is in + out, matching [`Graph::degree`].
pub fn identify_central_nodes(graph: &Graph, members: &[u32], top_n: usize) -> Vec<NodeId> {
    let member_set: HashSet<u32> = members.iter().copied().collect();
    let mut internal: HashMap<u32, usize> = HashMap::with_capacity(members.len());

    for edge in graph.edges() {
        if member_set.contains(&edge.source) && member_set.contains(&edge.target) {
            *internal.entry(edge.source).or_default() += 1;
            *internal.entry(edge.target).or_default() += 1;
        }
    }

    members
        .iter()
        .map(|&idx| (idx, internal.get(&idx).copied().unwrap_or(0)))
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(top_n)
        .map(|(idx, _)| graph.node_id(idx).to_string())
        .collect()
}

/// Summaries for every non-residual component of a partition.
///
/// Density and centrality are measured on `graph`, normally the source graph
/// before any edges were removed.
pub fn summarize_communities(
    graph: &Graph,
    partition: &Partition,
    map: &CommunityMap,
    central_nodes: usize,
) -> Vec<Community> {
    partition
        .iter()
        .filter_map(|component| {
            let id = *map.get(component.first()?)?;
            if id == RESIDUAL_COMMUNITY {
                return None;
            }

            let indices: Vec<u32> = component.iter().filter_map(|n| graph.index_of(n)).collect();
            Some(Community {
                id,
                members: component.clone(),
                size: component.len(),
                density: calculate_density(graph, &indices),
                central_nodes: identify_central_nodes(graph, &indices, central_nodes),
            })
        })
        .collect()
}
