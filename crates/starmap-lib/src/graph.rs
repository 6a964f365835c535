use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::catalog::SystemId;
use crate::error::{Error, Result};

/// Identifier of the map background element. It is never a star system.
pub const BACKGROUND_NODE_ID: &str = "rect1";

/// Static lane between two systems as it appears in the graph snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaneEdge {
    pub start: SystemId,
    pub end: SystemId,
    pub distance: f64,
}

/// Graph snapshot exported alongside the map.
///
/// `nodes` carries renderer metadata the router never reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: serde_json::Value,
    #[serde(default)]
    pub edges: Vec<LaneEdge>,
}

/// Weighted, undirected lane graph used by the router.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Arc<HashMap<SystemId, HashMap<SystemId, f64>>>,
}

impl Graph {
    /// Weight of the lane between `from` and `to`, if one exists.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency
            .get(from)
            .and_then(|neighbours| neighbours.get(to))
            .copied()
    }

    /// Neighbours of `system` with the lane distance to each.
    pub fn neighbours(&self, system: &str) -> impl Iterator<Item = (&SystemId, f64)> {
        self.adjacency
            .get(system)
            .into_iter()
            .flat_map(|neighbours| neighbours.iter().map(|(id, distance)| (id, *distance)))
    }

    pub fn contains(&self, system: &str) -> bool {
        self.adjacency.contains_key(system)
    }

    /// Number of systems that touch at least one lane.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected lanes.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum::<usize>() / 2
    }

    /// Sum of lane weights along `path`, or `None` if a consecutive pair is not a lane.
    pub fn path_weight(&self, path: &[SystemId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.weight(&pair[0], &pair[1]))
            .sum()
    }
}

/// Build the lane graph from an edge list, inserting every edge in both directions.
///
/// Edges with a negative or non-finite distance are skipped. A repeated pair
/// keeps the distance of the last occurrence.
pub fn build_adjacency(edges: &[LaneEdge]) -> Graph {
    let mut adjacency: HashMap<SystemId, HashMap<SystemId, f64>> = HashMap::new();
    let mut skipped_edges = 0usize;

    for edge in edges {
        if !edge.distance.is_finite() || edge.distance < 0.0 {
            skipped_edges += 1;
            continue;
        }
        adjacency
            .entry(edge.start.clone())
            .or_default()
            .insert(edge.end.clone(), edge.distance);
        adjacency
            .entry(edge.end.clone())
            .or_default()
            .insert(edge.start.clone(), edge.distance);
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "ignored lanes with invalid distances");
    }

    Graph {
        adjacency: Arc::new(adjacency),
    }
}

/// Load a graph snapshot from JSON.
pub fn load_graph_snapshot(path: &Path) -> Result<GraphSnapshot> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&raw)?;
    info!(
        edges = snapshot.edges.len(),
        path = %path.display(),
        "loaded graph snapshot"
    );
    Ok(snapshot)
}
