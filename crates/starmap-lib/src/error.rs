use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::SystemId;

/// Convenient result alias for the star-map library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Every variant is recoverable: the explorer session logs the failure and
/// degrades to an empty result instead of propagating it to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// A route query referenced the reserved background node.
    #[error("invalid route endpoint: {id} is not a star system")]
    InvalidEndpoint { id: SystemId },

    /// Raised when no route could be found between two systems.
    #[error("no route found between {start} and {goal}")]
    NoPathFound { start: SystemId, goal: SystemId },

    /// An operation referenced a system id absent from the current catalog.
    #[error("system {id} is missing from the catalog")]
    MissingSystemData { id: SystemId },

    /// Raised when a system name could not be found in the catalog.
    #[error("unknown system name: {name}{}", format_suggestions(.suggestions))]
    UnknownSystem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Dataset file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the dataset")]
    ProjectDirsUnavailable,

    /// A route summary was requested for a route without any steps.
    #[error("route contains no steps")]
    EmptyRoute,

    /// Planner configuration failed validation.
    #[error("invalid planner configuration: {message}")]
    InvalidConfig { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
