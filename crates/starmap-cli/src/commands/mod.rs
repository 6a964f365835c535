//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use starmap_lib::{load_dataset, resolve_dataset, Dataset, PlannerConfig};

use crate::output::OutputFormat;

pub mod closest;
pub mod midpoints;
pub mod route;
pub mod session;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub data_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: PlannerConfig,
}

impl CommandContext {
    /// Locate and load the dataset for this invocation.
    pub fn load_dataset(&self) -> Result<Dataset> {
        load_dataset_from(self.data_dir.as_deref())
    }
}

fn load_dataset_from(data_dir: Option<&Path>) -> Result<Dataset> {
    let paths = resolve_dataset(data_dir).context("failed to locate the star-map dataset")?;
    load_dataset(&paths)
        .with_context(|| format!("failed to load dataset from {}", paths.graph.display()))
}
