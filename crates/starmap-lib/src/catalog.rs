use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Stable identifier for a star system, as used by the map export.
pub type SystemId = String;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Cartesian coordinates for a star system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SystemPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SystemPosition {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Immutable reference data for a single star system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub natural_id: String,
    pub position: SystemPosition,
}

/// Raw catalog row from the universe export.
///
/// The export contains one row per planet, so the same `SystemId` can appear
/// many times. Unknown columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemRecord {
    #[serde(rename = "SystemId")]
    pub system_id: SystemId,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "NaturalId", default)]
    pub natural_id: String,
    #[serde(rename = "PositionX")]
    pub position_x: f64,
    #[serde(rename = "PositionY")]
    pub position_y: f64,
    #[serde(rename = "PositionZ", default)]
    pub position_z: Option<f64>,
}

impl From<SystemRecord> for System {
    fn from(record: SystemRecord) -> Self {
        System {
            id: record.system_id,
            name: record.name,
            natural_id: record.natural_id,
            position: SystemPosition {
                x: record.position_x,
                y: record.position_y,
                z: record.position_z.unwrap_or(0.0),
            },
        }
    }
}

/// In-memory system catalog keyed by [`SystemId`].
///
/// Systems keep the order in which they first appeared so that candidate
/// rankings with equal distances are reproducible.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: Vec<System>,
    index: HashMap<SystemId, usize>,
    name_to_id: HashMap<String, SystemId>,
    natural_to_id: HashMap<String, SystemId>,
}

impl Catalog {
    /// Group raw rows by system id. The first row for each id is authoritative.
    pub fn from_records(records: impl IntoIterator<Item = SystemRecord>) -> Self {
        Self::from_systems(records.into_iter().map(System::from))
    }

    /// Build a catalog from already-shaped systems, keeping the first entry per id.
    pub fn from_systems(systems: impl IntoIterator<Item = System>) -> Self {
        let mut catalog = Catalog::default();
        let mut duplicates = 0usize;
        for system in systems {
            if catalog.index.contains_key(&system.id) {
                duplicates += 1;
                continue;
            }
            catalog
                .name_to_id
                .entry(system.name.clone())
                .or_insert_with(|| system.id.clone());
            if !system.natural_id.is_empty() {
                catalog
                    .natural_to_id
                    .entry(system.natural_id.to_ascii_uppercase())
                    .or_insert_with(|| system.id.clone());
            }
            catalog
                .index
                .insert(system.id.clone(), catalog.systems.len());
            catalog.systems.push(system);
        }
        if duplicates > 0 {
            debug!(duplicates, "ignored repeated catalog rows");
        }
        catalog
    }

    /// All systems in first-seen order.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Lookup a system by identifier.
    pub fn get(&self, id: &str) -> Option<&System> {
        self.index.get(id).map(|&slot| &self.systems[slot])
    }

    /// Lookup a system by identifier, failing with [`Error::MissingSystemData`].
    pub fn require(&self, id: &str) -> Result<&System> {
        self.get(id).ok_or_else(|| Error::MissingSystemData { id: id.to_string() })
    }

    /// Lookup a system identifier by its case-sensitive name.
    pub fn system_id_by_name(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(String::as_str)
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: &str) -> Option<&str> {
        self.get(id).map(|system| system.name.as_str())
    }

    /// Resolve user input as a system id, exact name, or natural id (case-insensitive).
    pub fn resolve(&self, query: &str) -> Result<&System> {
        let query = query.trim();
        if let Some(system) = self.get(query) {
            return Ok(system);
        }
        let by_name = self
            .system_id_by_name(query)
            .or_else(|| {
                self.natural_to_id
                    .get(&query.to_ascii_uppercase())
                    .map(String::as_str)
            })
            .and_then(|id| self.get(id));
        by_name.ok_or_else(|| Error::UnknownSystem {
            name: query.to_string(),
            suggestions: self.fuzzy_system_matches(query, 3),
        })
    }

    /// Names of systems that closely resemble `query`, best match first.
    pub fn fuzzy_system_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .systems
            .iter()
            .map(|system| {
                let score = strsim::jaro_winkler(&needle, &system.name.to_lowercase());
                (score, system.name.as_str())
            })
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

/// Load the system catalog from a JSON array of [`SystemRecord`] rows.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }
    let raw = fs::read_to_string(path)?;
    let records: Vec<SystemRecord> = serde_json::from_str(&raw)?;
    let rows = records.len();
    let catalog = Catalog::from_records(records);
    info!(
        rows,
        systems = catalog.len(),
        path = %path.display(),
        "loaded system catalog"
    );
    Ok(catalog)
}
