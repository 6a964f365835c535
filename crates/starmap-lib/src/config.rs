use std::env;

use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variable overriding [`PlannerConfig::max_range`].
pub const MAX_RANGE_ENV: &str = "STARMAP_MAX_RANGE";
/// Environment variable overriding [`PlannerConfig::midpoint_limit`].
pub const MIDPOINT_LIMIT_ENV: &str = "STARMAP_MIDPOINT_LIMIT";

/// Default SINGLE-mode search radius. Wide enough to include the `>=25` bucket.
pub const DEFAULT_MAX_RANGE: f64 = 35.0;
/// Default number of DUAL-mode midpoints kept after ranking.
pub const DEFAULT_MIDPOINT_LIMIT: usize = 50;

/// Tunables for gateway candidate ranking.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum distance for SINGLE-mode candidates (inclusive).
    pub max_range: f64,
    /// Maximum number of DUAL-mode midpoints.
    pub midpoint_limit: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_range: DEFAULT_MAX_RANGE,
            midpoint_limit: DEFAULT_MIDPOINT_LIMIT,
        }
    }
}

impl PlannerConfig {
    /// Defaults overlaid with any valid environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Overlay values from `lookup`; values that fail to parse are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(MAX_RANGE_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(value) => self.max_range = value,
                Err(_) => warn!(key = MAX_RANGE_ENV, value = %raw, "ignoring unparsable override"),
            }
        }
        if let Some(raw) = lookup(MIDPOINT_LIMIT_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(value) => self.midpoint_limit = value,
                Err(_) => {
                    warn!(key = MIDPOINT_LIMIT_ENV, value = %raw, "ignoring unparsable override")
                }
            }
        }
        self
    }

    /// Reject ranges that would make candidate filtering meaningless.
    pub fn validate(&self) -> Result<()> {
        if !self.max_range.is_finite() || self.max_range < 0.0 {
            return Err(Error::InvalidConfig {
                message: format!(
                    "max_range must be a finite, non-negative distance (got {})",
                    self.max_range
                ),
            });
        }
        Ok(())
    }
}
