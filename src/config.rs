//! Configuration management for the retweet network analyzer

/// Default separator between the two users on an input line
pub const DEFAULT_SEPARATOR: &str = ";,.";

/// Default number of hubs reported
pub const DEFAULT_TOP_N_HUBS: usize = 20;

/// Default Girvan-Newman steps
pub const DEFAULT_ITERATIONS: usize = 5;

/// Default central nodes listed per community
pub const DEFAULT_CENTRAL_NODES: usize = 5;

/// Default configuration for the retweet network analyzer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Separator between the two users on each input line
    pub separator: String,

    /// How many input files to read (None reads all of them)
    pub num_files: Option<usize>,

    /// Number of hubs to report
    pub top_n_hubs: usize,

    /// Girvan-Newman steps to run before reading the partition
    pub iterations: usize,

    /// Components with at most this many members are residual (community id 0)
    pub min_community_size: usize,

    /// Number of central nodes reported per community
    pub central_nodes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            num_files: None,
            top_n_hubs: DEFAULT_TOP_N_HUBS,
            iterations: DEFAULT_ITERATIONS,
            min_community_size: crate::cluster::MIN_COMMUNITY_SIZE,
            central_nodes: DEFAULT_CENTRAL_NODES,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        separator: impl Into<String>,
        num_files: Option<usize>,
        top_n_hubs: usize,
        iterations: usize,
        min_community_size: usize,
        central_nodes: usize,
    ) -> Self {
        Self {
            separator: separator.into(),
            num_files,
            top_n_hubs,
            iterations,
            min_community_size,
            central_nodes,
        }
    }
}
