//! Loading retweet edge files from disk

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::data::cleaning::clean_user_name;
use crate::error::AnalysisError;
use crate::graph::{Graph, GraphBuilder, NodeId};

/// List `*.csv` files in a directory, sorted by name, limited to `num_files`
pub fn list_edge_files(dir: &Path, num_files: Option<usize>) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(anyhow::anyhow!("Input directory not found: {}", dir.display()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    files.sort();

    if let Some(limit) = num_files {
        files.truncate(limit);
    }

    Ok(files)
}

/// Load every edge file in `dir` into a graph, cleaning tokens with `clean`.
///
/// Each line holds two user tokens separated by `config.separator`. Lines
/// that do not split into exactly two tokens are skipped. Fails with
/// [`AnalysisError::EmptyGraph`] when no user survives cleaning.
pub fn load_graph<F>(dir: &Path, config: &Config, directed: bool, clean: F) -> Result<Graph>
where
    F: Fn(&str) -> Option<NodeId>,
{
    let files = list_edge_files(dir, config.num_files)?;
    log::info!("Reading {} edge file(s) from {}", files.len(), dir.display());

    let mut builder = GraphBuilder::new(directed, clean);

    for file in &files {
        log::info!("Opening {}", file.display());
        let contents = fs::read_to_string(file)
            .with_context(|| format!("reading edge file {}", file.display()))?;

        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(config.separator.as_str()).collect();
            match parts.as_slice() {
                [src, dst] => {
                    builder.add_pair(src, dst);
                }
                _ => log::warn!(
                    "{}:{}: expected 2 users separated by {:?}, found {} field(s)",
                    file.display(),
                    line_no + 1,
                    config.separator,
                    parts.len()
                ),
            }
        }
    }

    let graph = builder.build();
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph)
            .with_context(|| format!("no users loaded from {}", dir.display()));
    }

    Ok(graph)
}

/// Directed retweet graph, used for hub ranking
pub fn build_directed_graph(dir: &Path, config: &Config) -> Result<Graph> {
    load_graph(dir, config, true, clean_user_name)
}

/// Undirected interaction graph, used for community detection
pub fn build_community_graph(dir: &Path, config: &Config) -> Result<Graph> {
    load_graph(dir, config, false, clean_user_name)
}
