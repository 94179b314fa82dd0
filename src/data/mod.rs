//! Edge-list ingestion and user name cleaning

pub mod cleaning;
pub mod loader;

pub use cleaning::clean_user_name;
pub use loader::{build_community_graph, build_directed_graph, list_edge_files, load_graph};
