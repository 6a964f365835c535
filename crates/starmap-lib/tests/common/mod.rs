//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use starmap_lib::{load_dataset, resolve_dataset, Dataset, Explorer, PlannerConfig};

/// Fixture system ids.
#[allow(dead_code)]
pub mod ids {
    pub const BENTEN: &str = "7d4c";
    pub const MONTEM: &str = "1f2e";
    pub const PROMITOR: &str = "9b3a";
    pub const KATOA: &str = "c0de";
    pub const HORTUS: &str = "e5f1";
    pub const ETHERWIND: &str = "4a7b";
}

/// Directory holding the JSON dataset fixtures.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the fixture dataset.
#[allow(dead_code)]
pub fn fixture_dataset() -> Dataset {
    let paths = resolve_dataset(Some(&fixtures_dir())).expect("fixture dataset resolves");
    load_dataset(&paths).expect("fixture dataset loads")
}

/// Explorer over the fixture dataset with default planner settings.
#[allow(dead_code)]
pub fn fixture_explorer() -> Explorer {
    Explorer::new(fixture_dataset(), PlannerConfig::default())
}
