//! Hub ranking and Girvan-Newman community detection for retweet networks

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod storage;
pub mod viz;

pub use cluster::{
    to_community_map, top_hubs, Community, CommunityDetector, CommunityMap, DetectorState,
};
pub use config::Config;
pub use error::{AnalysisError, Result};
pub use graph::{EdgeKey, Graph, NodeId, Partition};
