//! Results persistence module

use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::cluster::{Community, CommunityMap, RESIDUAL_COMMUNITY};
use crate::graph::{Graph, NodeId, Partition};

/// Save the hub ranking as a JSON array
pub fn save_hubs(path: &Path, hubs: &[(NodeId, usize)]) -> Result<()> {
    log::info!("Saving {} hubs to {}", hubs.len(), path.display());

    let body = json!(hubs
        .iter()
        .enumerate()
        .map(|(rank, (user, degree))| json!({
            "rank": rank + 1,
            "user": user,
            "degree": degree,
        }))
        .collect::<Vec<_>>());

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&body)?.as_bytes())?;
    Ok(())
}

/// Save community detection results to the specified directory
pub fn save_communities(
    output_dir: &Path,
    graph: &Graph,
    partition: &Partition,
    map: &CommunityMap,
    communities: &[Community],
) -> Result<()> {
    log::info!(
        "Saving {} communities ({} components) to {}",
        communities.len(),
        partition.len(),
        output_dir.display()
    );

    fs::create_dir_all(output_dir)?;

    let mut file = File::create(output_dir.join("communities.json"))?;
    file.write_all(to_string_pretty(map)?.as_bytes())?;

    let mut file = File::create(output_dir.join("partition.json"))?;
    file.write_all(to_string_pretty(partition)?.as_bytes())?;

    save_summary(output_dir, graph, partition, map, communities)?;

    log::info!("Results saved successfully");
    Ok(())
}

/// Save summary information
fn save_summary(
    output_dir: &Path,
    graph: &Graph,
    partition: &Partition,
    map: &CommunityMap,
    communities: &[Community],
) -> Result<()> {
    let residual_nodes = map.values().filter(|&&id| id == RESIDUAL_COMMUNITY).count();
    let clustered_nodes: usize = communities.iter().map(|c| c.size).sum();

    let summary = json!({
        "graph_stats": {
            "directed": graph.is_directed(),
            "node_count": graph.node_count(),
            "edge_count": graph.edge_count(),
        },
        "community_stats": {
            "component_count": partition.len(),
            "community_count": communities.len(),
            "clustered_nodes": clustered_nodes,
            "residual_nodes": residual_nodes,
            "largest_community_size": communities.iter().map(|c| c.size).max().unwrap_or(0),
        },
        "communities": communities,
    });

    let mut file = File::create(output_dir.join("summary.json"))?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;
    Ok(())
}
