use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::catalog::{load_catalog, Catalog};
use crate::error::{Error, Result};
use crate::graph::{load_graph_snapshot, GraphSnapshot};
use crate::registry::{load_existing_gateways, ExistingGateway};

/// Environment variable pointing at the dataset directory.
pub const DATA_DIR_ENV: &str = "STARMAP_DATA_DIR";

const GRAPH_FILENAME: &str = "graph_data.json";
const CATALOG_FILENAME: &str = "universe_data.json";
const EXISTING_GATEWAYS_FILENAME: &str = "existing_gateways.json";

/// Paths to the dataset files inside a data directory.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub graph: PathBuf,
    pub catalog: PathBuf,
    /// Present only when the file exists; the existing-gateway list is optional.
    pub existing_gateways: Option<PathBuf>,
}

impl DatasetPaths {
    /// Lay out the expected file names under `dir`.
    pub fn for_directory(dir: &Path) -> Self {
        let existing = dir.join(EXISTING_GATEWAYS_FILENAME);
        Self {
            graph: dir.join(GRAPH_FILENAME),
            catalog: dir.join(CATALOG_FILENAME),
            existing_gateways: existing.exists().then_some(existing),
        }
    }
}

/// Everything the engine needs from one load.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: GraphSnapshot,
    pub catalog: Catalog,
    pub existing_gateways: Vec<ExistingGateway>,
}

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "starmap", "starmap").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Locate the dataset: explicit directory, then [`DATA_DIR_ENV`], then the platform default.
pub fn resolve_dataset(data_dir: Option<&Path>) -> Result<DatasetPaths> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => match env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        },
    };
    debug!(dir = %dir.display(), "resolving dataset");

    let paths = DatasetPaths::for_directory(&dir);
    for required in [&paths.graph, &paths.catalog] {
        if !required.exists() {
            return Err(Error::DatasetNotFound {
                path: required.clone(),
            });
        }
    }
    Ok(paths)
}

/// Load every dataset file referenced by `paths`.
pub fn load_dataset(paths: &DatasetPaths) -> Result<Dataset> {
    let graph = load_graph_snapshot(&paths.graph)?;
    let catalog = load_catalog(&paths.catalog)?;
    let existing_gateways = match &paths.existing_gateways {
        Some(path) => load_existing_gateways(path)?,
        None => Vec::new(),
    };
    Ok(Dataset {
        graph,
        catalog,
        existing_gateways,
    })
}
