use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, info};

use crate::catalog::{System, SystemId};
use crate::distance::{distance, format_distance};
use crate::error::{Error, Result};

/// Identifier assigned to a planned gateway when it is added.
pub type GatewayId = u64;

/// A gateway the user has planned.
///
/// Names and distance are captured at creation and never recomputed, even if
/// the catalog is later reloaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedGateway {
    pub id: GatewayId,
    pub source_id: SystemId,
    pub target_id: SystemId,
    #[serde(rename = "source")]
    pub source_name: String,
    #[serde(rename = "target")]
    pub target_name: String,
    #[serde(serialize_with = "serialize_two_places")]
    pub distance: f64,
}

impl PlannedGateway {
    /// Whether this gateway links `a` and `b`, in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source_id == a && self.target_id == b) || (self.source_id == b && self.target_id == a)
    }

    /// Distance with two decimal places.
    pub fn distance_label(&self) -> String {
        format_distance(self.distance)
    }
}

fn serialize_two_places<S: Serializer>(
    value: &f64,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_distance(*value))
}

/// Read-only gateway that already exists in the universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingGateway {
    pub source_id: SystemId,
    pub target_id: SystemId,
}

/// Planned gateways in insertion order, unique per unordered system pair.
#[derive(Debug, Clone)]
pub struct GatewayRegistry {
    planned: Vec<PlannedGateway>,
    next_id: GatewayId,
}

impl Default for GatewayRegistry {
    fn default() -> Self {
        Self {
            planned: Vec::new(),
            next_id: 1,
        }
    }
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planned gateways in the order they were added.
    pub fn planned(&self) -> &[PlannedGateway] {
        &self.planned
    }

    pub fn len(&self) -> usize {
        self.planned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
    }

    /// Whether a planned gateway already links `a` and `b` in either direction.
    pub fn contains_pair(&self, a: &str, b: &str) -> bool {
        self.planned.iter().any(|gateway| gateway.connects(a, b))
    }

    /// Plan a gateway between two systems.
    ///
    /// Returns `None` without touching the registry when the pair is already
    /// planned or both ends are the same system.
    pub fn add_gateway(&mut self, source: &System, target: &System) -> Option<GatewayId> {
        if source.id == target.id {
            debug!(system = %source.id, "ignored self gateway");
            return None;
        }
        if self.contains_pair(&source.id, &target.id) {
            debug!(source = %source.id, target = %target.id, "gateway already planned");
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.planned.push(PlannedGateway {
            id,
            source_id: source.id.clone(),
            target_id: target.id.clone(),
            source_name: source.name.clone(),
            target_name: target.name.clone(),
            distance: distance(source, target),
        });
        debug!(id, source = %source.id, target = %target.id, "planned gateway");
        Some(id)
    }

    /// Remove a planned gateway by id. Returns the removed gateway, if any.
    pub fn remove_gateway(&mut self, id: GatewayId) -> Option<PlannedGateway> {
        let position = self.planned.iter().position(|gateway| gateway.id == id)?;
        Some(self.planned.remove(position))
    }

    /// Drop every planned gateway.
    pub fn clear_all(&mut self) {
        self.planned.clear();
    }
}

/// Load the existing-gateway list from JSON.
pub fn load_existing_gateways(path: &Path) -> Result<Vec<ExistingGateway>> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let gateways: Vec<ExistingGateway> = serde_json::from_str(&raw)?;
    info!(
        gateways = gateways.len(),
        path = %path.display(),
        "loaded existing gateways"
    );
    Ok(gateways)
}
