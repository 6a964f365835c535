use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, SystemId};
use crate::distance::distance;
use crate::error::{Error, Result};
use crate::graph::{Graph, BACKGROUND_NODE_ID};

/// Minimum-distance route over the lane graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub steps: Vec<SystemId>,
    /// Sum of traversed lane weights.
    pub total_distance: f64,
}

impl Route {
    /// Number of lanes traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&str> {
        self.steps.first().map(String::as_str)
    }

    pub fn goal(&self) -> Option<&str> {
        self.steps.last().map(String::as_str)
    }

    /// Straight-line distance between the route endpoints, when both are cataloged.
    ///
    /// This is the length a gateway would need to replace the whole route.
    pub fn straight_line_distance(&self, catalog: &Catalog) -> Option<f64> {
        let start = catalog.get(self.start()?)?;
        let goal = catalog.get(self.goal()?)?;
        Some(distance(start, goal))
    }
}

/// Run Dijkstra's algorithm to find the lowest-cost path between two systems.
///
/// Fails with [`Error::InvalidEndpoint`] when either endpoint is the map
/// background and with [`Error::NoPathFound`] when the endpoints are not
/// connected by lanes.
pub fn shortest_path(graph: &Graph, start: &str, goal: &str) -> Result<Route> {
    for endpoint in [start, goal] {
        if endpoint == BACKGROUND_NODE_ID {
            return Err(Error::InvalidEndpoint {
                id: endpoint.to_string(),
            });
        }
    }

    if start == goal {
        return Ok(Route {
            steps: vec![start.to_string()],
            total_distance: 0.0,
        });
    }

    let not_found = || Error::NoPathFound {
        start: start.to_string(),
        goal: goal.to_string(),
    };

    if !graph.contains(start) || !graph.contains(goal) {
        return Err(not_found());
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            let steps = reconstruct_path(&parents, start, goal);
            debug!(
                start,
                goal,
                hops = steps.len().saturating_sub(1),
                total = current_distance,
                "route found"
            );
            return Ok(Route {
                steps,
                total_distance: current_distance,
            });
        }

        for (next, weight) in graph.neighbours(entry.node) {
            let next_cost = current_distance + weight;
            if next_cost < *distances.get(next.as_str()).unwrap_or(&f64::INFINITY) {
                distances.insert(next.as_str(), next_cost);
                parents.insert(next.as_str(), entry.node);
                queue.push(QueueEntry::new(next.as_str(), next_cost));
            }
        }
    }

    Err(not_found())
}

fn reconstruct_path(parents: &HashMap<&str, &str>, start: &str, goal: &str) -> Vec<SystemId> {
    let mut path = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
