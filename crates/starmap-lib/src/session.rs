//! Explorer session: routes map clicks to the router or the gateway planner.
//!
//! The session owns the loaded snapshot (lane graph, catalog, existing
//! gateways) together with all interactive state. Every method runs to
//! completion synchronously; failures are logged and degrade to an empty
//! result so a bad click never tears the session down.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::{Catalog, System, SystemId};
use crate::config::PlannerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::graph::{build_adjacency, Graph, BACKGROUND_NODE_ID};
use crate::path::{shortest_path, Route};
use crate::planner::{Candidates, GatewayPlanner};
use crate::registry::{ExistingGateway, GatewayId, GatewayRegistry, PlannedGateway};
use crate::selection::{PlanningStrategy, SelectionEvent, SelectionPhase, SelectionState};

/// Interaction mode of the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapMode {
    /// Clicking selects a single system for inspection.
    #[default]
    Explore,
    /// Clicks collect two endpoints for a route query.
    Navigation,
    /// Clicks pick gateway origins.
    Gateway,
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            MapMode::Explore => "explore",
            MapMode::Navigation => "navigation",
            MapMode::Gateway => "gateway",
        };
        f.write_str(value)
    }
}

impl FromStr for MapMode {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "explore" | "standard" => Ok(MapMode::Explore),
            "navigation" | "nav" | "route" => Ok(MapMode::Navigation),
            "gateway" => Ok(MapMode::Gateway),
            other => Err(format!("unknown map mode '{other}'")),
        }
    }
}

/// Up to two pending route endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteSelection {
    endpoints: Vec<SystemId>,
}

impl RouteSelection {
    pub fn endpoints(&self) -> &[SystemId] {
        &self.endpoints
    }

    /// Add an endpoint. Returns the pair to route once two distinct endpoints are held.
    ///
    /// A click while two endpoints are held starts over with the clicked
    /// system; re-clicking a lone endpoint removes it.
    pub fn select(&mut self, id: &str) -> Option<(SystemId, SystemId)> {
        match self.endpoints.as_slice() {
            [_, _] => {
                self.endpoints = vec![id.to_string()];
                None
            }
            [only] if only == id => {
                self.endpoints.clear();
                None
            }
            [first] => {
                let pair = (first.clone(), id.to_string());
                self.endpoints.push(id.to_string());
                Some(pair)
            }
            _ => {
                self.endpoints.push(id.to_string());
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.endpoints.clear();
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Background or unknown system; nothing changed.
    Ignored,
    /// Explore mode selection.
    Selected(SystemId),
    /// Navigation mode is still waiting for a second endpoint.
    RoutePending(Vec<SystemId>),
    /// Navigation mode computed a route.
    RouteFound(Route),
    /// Navigation mode had two endpoints but no route could be drawn.
    RouteUnavailable { start: SystemId, goal: SystemId },
    /// Gateway mode transition, with any gateways it added to the registry.
    Planning {
        event: SelectionEvent,
        added: Vec<GatewayId>,
    },
}

/// Everything a renderer needs to draw the current state.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerView<'a> {
    pub mode: MapMode,
    pub strategy: PlanningStrategy,
    pub phase: SelectionPhase,
    pub origin_a: Option<&'a System>,
    pub origin_b: Option<&'a System>,
    pub selected_system: Option<&'a str>,
    pub route_endpoints: &'a [SystemId],
    pub route: Option<&'a Route>,
    /// Straight-line distance between the route endpoints.
    pub route_straight_line: Option<f64>,
    pub candidates: &'a Candidates,
    pub heatmap: BTreeMap<SystemId, String>,
    pub planned_gateways: &'a [PlannedGateway],
    pub existing_gateways: &'a [ExistingGateway],
}

/// Interactive explorer over one dataset snapshot.
#[derive(Debug, Clone)]
pub struct Explorer {
    catalog: Arc<Catalog>,
    graph: Graph,
    existing_gateways: Vec<ExistingGateway>,
    mode: MapMode,
    selected_system: Option<SystemId>,
    route_selection: RouteSelection,
    last_route: Option<Route>,
    selection: SelectionState,
    planner: GatewayPlanner,
    registry: GatewayRegistry,
}

impl Explorer {
    /// Build a session from a loaded dataset.
    pub fn new(dataset: Dataset, config: PlannerConfig) -> Self {
        let graph = build_adjacency(&dataset.graph.edges);
        Self::from_parts(
            graph,
            Arc::new(dataset.catalog),
            dataset.existing_gateways,
            config,
        )
    }

    /// Build a session from an already-built graph and catalog.
    pub fn from_parts(
        graph: Graph,
        catalog: Arc<Catalog>,
        existing_gateways: Vec<ExistingGateway>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            planner: GatewayPlanner::new(catalog.clone(), config),
            catalog,
            graph,
            existing_gateways,
            mode: MapMode::default(),
            selected_system: None,
            route_selection: RouteSelection::default(),
            last_route: None,
            selection: SelectionState::default(),
            registry: GatewayRegistry::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn existing_gateways(&self) -> &[ExistingGateway] {
        &self.existing_gateways
    }

    pub fn mode(&self) -> MapMode {
        self.mode
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn candidates(&self) -> &Candidates {
        self.planner.candidates()
    }

    pub fn registry(&self) -> &GatewayRegistry {
        &self.registry
    }

    pub fn last_route(&self) -> Option<&Route> {
        self.last_route.as_ref()
    }

    pub fn planner_config(&self) -> &PlannerConfig {
        self.planner.config()
    }

    /// Switch map mode. Leaving a mode discards its pending selection.
    pub fn set_mode(&mut self, mode: MapMode) {
        if self.mode == mode {
            return;
        }
        match self.mode {
            MapMode::Gateway => self.reset_planning(),
            MapMode::Navigation => {
                self.route_selection.clear();
                self.last_route = None;
            }
            MapMode::Explore => {}
        }
        debug!(from = %self.mode, to = %mode, "map mode changed");
        self.mode = mode;
    }

    /// Toggle gateway planning on or off (off returns to explore mode).
    pub fn toggle_gateway_mode(&mut self) -> MapMode {
        let next = if self.mode == MapMode::Gateway {
            MapMode::Explore
        } else {
            MapMode::Gateway
        };
        self.set_mode(next);
        self.mode
    }

    /// Change the planning strategy; origin B is dropped, origin A kept.
    pub fn set_strategy(&mut self, strategy: PlanningStrategy) {
        if self.selection.set_strategy(strategy) {
            self.planner.recompute(&self.selection);
        }
    }

    /// Shortest lane route between two systems, independent of the click state.
    pub fn route(&self, start: &str, goal: &str) -> Result<Route> {
        shortest_path(&self.graph, start, goal)
    }

    /// Feed a map click into the session.
    pub fn click(&mut self, id: &str) -> ClickOutcome {
        if id == BACKGROUND_NODE_ID {
            return ClickOutcome::Ignored;
        }
        let system = match self.catalog.require(id) {
            Ok(system) => system.clone(),
            Err(error) => {
                warn!(%error, mode = %self.mode, "ignoring click");
                return ClickOutcome::Ignored;
            }
        };

        match self.mode {
            MapMode::Explore => {
                self.selected_system = Some(system.id.clone());
                ClickOutcome::Selected(system.id)
            }
            MapMode::Navigation => self.navigation_click(&system),
            MapMode::Gateway => self.gateway_click(&system),
        }
    }

    fn navigation_click(&mut self, system: &System) -> ClickOutcome {
        self.selected_system = Some(system.id.clone());
        let Some((start, goal)) = self.route_selection.select(&system.id) else {
            self.last_route = None;
            return ClickOutcome::RoutePending(self.route_selection.endpoints().to_vec());
        };

        match shortest_path(&self.graph, &start, &goal) {
            Ok(route) => {
                self.last_route = Some(route.clone());
                ClickOutcome::RouteFound(route)
            }
            Err(error) => {
                warn!(%error, "route query failed");
                self.last_route = None;
                ClickOutcome::RouteUnavailable { start, goal }
            }
        }
    }

    fn gateway_click(&mut self, system: &System) -> ClickOutcome {
        let event = self.selection.select(system);
        let mut added = Vec::new();
        if let SelectionEvent::GatewayProposed(proposed) = &event {
            added.extend(self.registry.add_gateway(&proposed.source, &proposed.target));
        }
        self.planner.recompute(&self.selection);
        ClickOutcome::Planning { event, added }
    }

    /// Confirm a ranked candidate.
    ///
    /// SINGLE: equivalent to clicking the candidate, so one gateway from
    /// origin A is planned and the selection returns to idle. DUAL: plans
    /// origin A → candidate and candidate → origin B, each deduplicated on its
    /// own; the origins stay selected. Returns the ids of gateways actually added.
    pub fn confirm_candidate(&mut self, id: &str) -> Vec<GatewayId> {
        match self.try_confirm(id) {
            Ok(added) => added,
            Err(error) => {
                warn!(%error, "ignoring candidate confirmation");
                Vec::new()
            }
        }
    }

    fn try_confirm(&mut self, id: &str) -> Result<Vec<GatewayId>> {
        let system = self.catalog.require(id)?.clone();
        if self.mode != MapMode::Gateway || !self.planner.candidates().contains(id) {
            debug!(system = id, "confirmation does not match a current candidate");
            return Ok(Vec::new());
        }

        match self.selection.strategy() {
            PlanningStrategy::Single => match self.gateway_click(&system) {
                ClickOutcome::Planning { added, .. } => Ok(added),
                _ => Ok(Vec::new()),
            },
            PlanningStrategy::Dual => {
                let (Some(origin_a), Some(origin_b)) =
                    (self.selection.origin_a(), self.selection.origin_b())
                else {
                    return Ok(Vec::new());
                };
                let mut added = Vec::new();
                added.extend(self.registry.add_gateway(origin_a, &system));
                added.extend(self.registry.add_gateway(&system, origin_b));
                debug!(midpoint = id, added = added.len(), "confirmed dual-origin route");
                Ok(added)
            }
        }
    }

    /// Remove a planned gateway by id. Returns `true` if one was removed.
    pub fn remove_gateway(&mut self, id: GatewayId) -> bool {
        self.registry.remove_gateway(id).is_some()
    }

    /// Drop pending origins and candidates. Planned gateways are kept.
    pub fn clear_selection(&mut self) {
        self.reset_planning();
    }

    /// Drop pending origins, candidates, and every planned gateway.
    pub fn clear_all(&mut self) {
        self.registry.clear_all();
        self.reset_planning();
    }

    fn reset_planning(&mut self) {
        self.selection.clear();
        self.planner.recompute(&self.selection);
    }

    /// Swap in a freshly loaded dataset.
    ///
    /// The lane graph is rebuilt and every derived or pending state is reset.
    /// Planned gateways survive with the names and distances captured when
    /// they were added.
    pub fn reload(&mut self, dataset: Dataset) {
        self.graph = build_adjacency(&dataset.graph.edges);
        self.catalog = Arc::new(dataset.catalog);
        self.existing_gateways = dataset.existing_gateways;
        self.planner.replace_catalog(self.catalog.clone());
        self.selection.clear();
        self.route_selection.clear();
        self.last_route = None;
        self.selected_system = None;
    }

    /// Snapshot of the current state for a renderer.
    pub fn view(&self) -> PlannerView<'_> {
        let heatmap = if self.mode == MapMode::Gateway {
            self.planner.heatmap(&self.selection)
        } else {
            BTreeMap::new()
        };
        PlannerView {
            mode: self.mode,
            strategy: self.selection.strategy(),
            phase: self.selection.phase(),
            origin_a: self.selection.origin_a(),
            origin_b: self.selection.origin_b(),
            selected_system: self.selected_system.as_deref(),
            route_endpoints: self.route_selection.endpoints(),
            route: self.last_route.as_ref(),
            route_straight_line: self
                .last_route
                .as_ref()
                .and_then(|route| route.straight_line_distance(&self.catalog)),
            candidates: self.planner.candidates(),
            heatmap,
            planned_gateways: self.registry.planned(),
            existing_gateways: &self.existing_gateways,
        }
    }
}
