use std::fmt::Write;

use serde::Serialize;

use crate::catalog::{Catalog, SystemId};
use crate::distance::format_distance;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::path::Route;
use crate::registry::PlannedGateway;

/// Endpoint within a route summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteEndpoint {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Step taken along a route, with the weight of the lane that reached it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: SystemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lane_distance: Option<f64>,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unknown>")
    }
}

/// Serializable route with resolved system names.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub hops: usize,
    pub total_distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub straight_line_distance: Option<f64>,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Resolve names and per-lane weights for `route`.
    pub fn from_route(route: &Route, graph: &Graph, catalog: &Catalog) -> Result<Self> {
        if route.steps.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let steps: Vec<RouteStep> = route
            .steps
            .iter()
            .enumerate()
            .map(|(index, id)| RouteStep {
                index,
                id: id.clone(),
                name: catalog.system_name(id).map(str::to_string),
                lane_distance: index
                    .checked_sub(1)
                    .and_then(|previous| graph.weight(&route.steps[previous], id)),
            })
            .collect();

        let endpoint = |step: &RouteStep| RouteEndpoint {
            id: step.id.clone(),
            name: step.name.clone(),
        };
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Err(Error::EmptyRoute);
        };
        let start = endpoint(first);
        let goal = endpoint(last);

        Ok(Self {
            hops: route.hop_count(),
            total_distance: route.total_distance,
            straight_line_distance: route.straight_line_distance(catalog),
            start,
            goal,
            steps,
        })
    }

    /// Plain text rendering, one step per line.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {} total)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            format_distance(self.total_distance)
        );
        if let Some(direct) = self.straight_line_distance {
            let _ = writeln!(buffer, "Straight-line distance: {}", format_distance(direct));
        }
        for step in &self.steps {
            match step.lane_distance {
                Some(lane) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) +{}",
                        step.index,
                        step.display_name(),
                        step.id,
                        format_distance(lane)
                    );
                }
                None => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({})",
                        step.index,
                        step.display_name(),
                        step.id
                    );
                }
            }
        }
        buffer
    }
}

/// Plain text listing of planned gateways in insertion order.
pub fn render_planned_gateways(gateways: &[PlannedGateway]) -> String {
    if gateways.is_empty() {
        return "No gateways planned.\n".to_string();
    }
    let mut buffer = String::new();
    for gateway in gateways {
        let _ = writeln!(
            buffer,
            "#{} {} <-> {} ({})",
            gateway.id,
            gateway.source_name,
            gateway.target_name,
            gateway.distance_label()
        );
    }
    buffer
}
