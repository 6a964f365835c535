//! Star-map library entry points.
//!
//! This crate loads a universe snapshot (lane graph, system catalog, existing
//! gateways), routes between systems over the lane graph, and ranks candidate
//! systems for new gateways. Consumers such as the CLI should drive an
//! [`Explorer`] session or call the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod planner;
pub mod registry;
pub mod selection;
pub mod session;

pub use catalog::{load_catalog, Catalog, System, SystemId, SystemPosition};
pub use config::PlannerConfig;
pub use dataset::{default_data_dir, load_dataset, resolve_dataset, Dataset, DatasetPaths};
pub use distance::{bucket, distance, format_distance, gradient_color, DistanceBucket};
pub use error::{Error, Result};
pub use graph::{build_adjacency, Graph, LaneEdge, BACKGROUND_NODE_ID};
pub use output::RouteSummary;
pub use path::{shortest_path, Route};
pub use planner::{
    find_best_midpoints, find_closest_systems, Candidates, ClosestCandidate, GatewayPlanner,
    MidpointCandidate,
};
pub use registry::{ExistingGateway, GatewayId, GatewayRegistry, PlannedGateway};
pub use selection::{PlanningStrategy, SelectionEvent, SelectionPhase, SelectionState};
pub use session::{ClickOutcome, Explorer, MapMode, PlannerView};
