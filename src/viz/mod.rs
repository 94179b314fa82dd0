//! Export files for external layout and rendering tools.
//!
//! Nothing here computes coordinates; Graphviz or a plotting tool does the
//! layout from the DOT file or the node table.

use anyhow::Result;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::NodeIndex;
use petgraph::{Directed, EdgeType, Undirected};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::cluster::{CommunityMap, RESIDUAL_COMMUNITY};
use crate::graph::{Graph, NodeId};

/// How nodes are coloured in the exported drawing
#[derive(Debug, Clone, Copy)]
pub enum Highlight<'a> {
    /// Colour by community id; residual nodes are grey
    Communities(&'a CommunityMap),
    /// Colour the listed hubs and number them by rank
    Hubs(&'a [(NodeId, usize)]),
}

fn to_petgraph<Ty: EdgeType>(graph: &Graph) -> petgraph::Graph<NodeId, (), Ty> {
    let mut out = petgraph::Graph::with_capacity(graph.node_count(), graph.edge_count());
    let indices: Vec<NodeIndex> = graph.nodes().iter().map(|id| out.add_node(id.clone())).collect();
    for edge in graph.edges() {
        out.add_edge(indices[edge.source as usize], indices[edge.target as usize], ());
    }
    out
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_attributes(graph: &Graph, id: &str, highlight: Highlight<'_>, hub_rank: &HashMap<&str, usize>) -> String {
    // Node size grows with degree, as the scatter plots did
    let degree = graph.degree(id).unwrap_or(0);
    let width = 0.2 + 0.05 * degree as f32;

    let (label, fill) = match highlight {
        Highlight::Communities(map) => {
            let community = map.get(id).copied().unwrap_or(RESIDUAL_COMMUNITY);
            let fill = if community == RESIDUAL_COMMUNITY {
                "0.0 0.0 0.8".to_string()
            } else {
                let hue = (community as f32 * 0.17) % 1.0;
                format!("{:.3} 0.6 0.9", hue)
            };
            (escape(id), fill)
        }
        Highlight::Hubs(_) => match hub_rank.get(id) {
            Some(rank) => (format!("{}: {}", rank, escape(id)), "0.6 0.8 0.9".to_string()),
            None => (String::new(), "0.0 0.0 0.8".to_string()),
        },
    };

    format!(
        "label=\"{}\", style=filled, fillcolor=\"{}\", width={:.2}",
        label, fill, width
    )
}

fn render_dot<Ty: EdgeType>(graph: &Graph, highlight: Highlight<'_>) -> String {
    let exported = to_petgraph::<Ty>(graph);
    let hub_rank: HashMap<&str, usize> = match highlight {
        Highlight::Hubs(hubs) => hubs
            .iter()
            .enumerate()
            .map(|(rank, (id, _))| (id.as_str(), rank + 1))
            .collect(),
        Highlight::Communities(_) => HashMap::new(),
    };

    let node_attrs = |_, (_, id): (NodeIndex, &NodeId)| node_attributes(graph, id, highlight, &hub_rank);
    let dot = Dot::with_attr_getters(
        &exported,
        &[DotConfig::EdgeNoLabel, DotConfig::NodeNoLabel],
        &|_, _| String::new(),
        &node_attrs,
    );

    format!("{:?}", dot)
}

/// Write a Graphviz DOT file of the graph
pub fn export_dot(path: &Path, graph: &Graph, highlight: Highlight<'_>) -> Result<()> {
    log::info!("Writing DOT export to {}", path.display());

    let dot = if graph.is_directed() {
        render_dot::<Directed>(graph, highlight)
    } else {
        render_dot::<Undirected>(graph, highlight)
    };

    fs::write(path, dot)?;
    Ok(())
}

/// Write a CSV node table with degree and community for plotting tools
pub fn export_node_table(path: &Path, graph: &Graph, map: &CommunityMap) -> Result<()> {
    log::info!("Writing node table to {}", path.display());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["id", "label", "degree", "community"])?;

    for (idx, id) in graph.nodes().iter().enumerate() {
        let community = map.get(id).copied().unwrap_or(RESIDUAL_COMMUNITY);
        writer.write_record([
            idx.to_string(),
            id.clone(),
            graph.degree_of(idx as u32).to_string(),
            community.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
