//! Community analysis module

pub mod detection;
pub mod metrics;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

pub use detection::{to_community_map, to_community_map_with_threshold, CommunityDetector, DetectorState};
pub use metrics::{summarize_communities, top_hubs};

/// Community id reserved for residual components
pub const RESIDUAL_COMMUNITY: u32 = 0;

/// Components with at most this many members are residual
pub const MIN_COMMUNITY_SIZE: usize = 5;

/// Community id for every node of a graph
pub type CommunityMap = BTreeMap<NodeId, u32>;

/// Summary of one non-residual community
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Community {
    /// Community id (always positive)
    pub id: u32,

    /// Members in graph insertion order
    pub members: Vec<NodeId>,

    /// Size of the community
    pub size: usize,

    /// Density: internal edges / potential edges
    pub density: f32,

    /// Members with the most neighbors inside the community
    pub central_nodes: Vec<NodeId>,
}
