//! Graph representation and algorithms module

pub mod store;
pub mod builder;
pub mod algorithms;

pub use builder::{BuildStats, GraphBuilder};
pub use store::{EdgeKey, Graph, NodeId, Partition};
