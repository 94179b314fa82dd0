//! Girvan-Newman community detection

use crate::cluster::{CommunityMap, MIN_COMMUNITY_SIZE, RESIDUAL_COMMUNITY};
use crate::error::{AnalysisError, Result};
use crate::graph::algorithms::edge_betweenness;
use crate::graph::{EdgeKey, Graph, Partition};

/// Rounding slack per summed term, in units of machine epsilon
const ULPS_PER_TERM: f64 = 4.0;

/// Lowest score still considered equal to `max_score`.
///
/// Each edge score sums one dependency per source node, so the rounding error
/// is bounded by a few ULPs per source. Scores further below the maximum than
/// that differ in exact arithmetic and are not ties.
fn tie_cutoff(max_score: f64, node_count: usize) -> f64 {
    let slack = max_score.abs() * f64::EPSILON * ULPS_PER_TERM * node_count.max(1) as f64;
    max_score - slack
}

/// Progress of a detector through its working graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No step has run yet
    Ready,
    /// The given number of steps completed and edges remain
    Stepped(usize),
    /// No edges remain to remove
    Exhausted,
}

/// Iterative edge-betweenness community detector.
///
/// Owns an undirected working copy of the source graph. Each [`step`] removes
/// every edge tied for the highest betweenness and reports the connected
/// components of what is left. Node and edge ordering come from the source
/// graph's insertion order, so repeated runs on the same input agree.
///
/// [`step`]: CommunityDetector::step
#[derive(Debug, Clone)]
pub struct CommunityDetector {
    graph: Graph,
    state: DetectorState,
    steps: usize,
    last_partition: Option<Partition>,
}

impl CommunityDetector {
    /// Create a detector over the undirected projection of `graph`
    pub fn new(graph: &Graph) -> Self {
        Self {
            graph: graph.to_undirected(),
            state: DetectorState::Ready,
            steps: 0,
            last_partition: None,
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Number of successful steps so far
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Partition produced by the most recent successful step
    pub fn last_partition(&self) -> Option<&Partition> {
        self.last_partition.as_ref()
    }

    /// Current working graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Remove all maximum-betweenness edges and return the resulting partition
    pub fn step(&mut self) -> Result<Partition> {
        if self.graph.edge_count() == 0 {
            self.state = DetectorState::Exhausted;
            return Err(AnalysisError::ExhaustedPartitions {
                requested: self.steps + 1,
                completed: self.steps,
            });
        }

        let scores = edge_betweenness(&self.graph);
        let max_score = scores.values().copied().fold(f64::NEG_INFINITY, f64::max);
        let cutoff = tie_cutoff(max_score, self.graph.node_count());

        let doomed: Vec<EdgeKey> = scores
            .into_iter()
            .filter(|&(_, score)| score >= cutoff)
            .map(|(edge, _)| edge)
            .collect();

        for edge in &doomed {
            self.graph.remove_edge(*edge)?;
        }

        let partition = self.graph.connected_components();
        self.steps += 1;
        self.state = if self.graph.edge_count() == 0 {
            DetectorState::Exhausted
        } else {
            DetectorState::Stepped(self.steps)
        };

        log::debug!(
            "Step {}: removed {} edge(s) with betweenness {:.3}, {} components, {} edges left",
            self.steps,
            doomed.len(),
            max_score,
            partition.len(),
            self.graph.edge_count()
        );

        self.last_partition = Some(partition.clone());
        Ok(partition)
    }

    /// Run exactly `iterations` steps and return the final partition
    pub fn run(&mut self, iterations: usize) -> Result<Partition> {
        if iterations == 0 {
            return Err(AnalysisError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }

        let mut partition = Vec::new();
        for completed in 0..iterations {
            partition = self.step().map_err(|err| match err {
                AnalysisError::ExhaustedPartitions { .. } => AnalysisError::ExhaustedPartitions {
                    requested: iterations,
                    completed,
                },
                other => other,
            })?;
        }

        log::info!(
            "Community detection finished after {} steps with {} components",
            self.steps,
            partition.len()
        );

        Ok(partition)
    }
}

/// Assign community ids using the default residual threshold
pub fn to_community_map(partition: &Partition) -> CommunityMap {
    to_community_map_with_threshold(partition, MIN_COMMUNITY_SIZE)
}

/// Assign community ids to every node of a partition.
///
/// Components larger than `min_size` get consecutive ids from 1 in partition
/// order. The rest share the residual id 0.
pub fn to_community_map_with_threshold(partition: &Partition, min_size: usize) -> CommunityMap {
    let mut map = CommunityMap::new();
    let mut next_id = RESIDUAL_COMMUNITY + 1;

    for component in partition {
        let id = if component.len() > min_size {
            let id = next_id;
            next_id += 1;
            id
        } else {
            RESIDUAL_COMMUNITY
        };

        for node in component {
            map.insert(node.clone(), id);
        }
    }

    map
}
