//! Error types for graph analysis

use thiserror::Error;

/// Errors raised by the graph store, hub ranking and community detection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// An argument was outside its accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Attempted to remove an edge that is not in the graph
    #[error("edge not found: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    /// All edges were removed before the requested number of steps completed
    #[error("partitions exhausted after {completed} of {requested} steps")]
    ExhaustedPartitions { requested: usize, completed: usize },

    /// The graph has no nodes
    #[error("graph is empty")]
    EmptyGraph,

    /// Lookup of a node that was never added
    #[error("unknown node: {0}")]
    UnknownNode(String),
}

/// Result alias for the analysis core
pub type Result<T> = std::result::Result<T, AnalysisError>;
