//! Planner configuration loading from `planner.toml`
//!
//! Every setting has a default, so the file itself is optional. A file that exists but
//! does not parse is an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "planner.toml";

/// What finalization does when a single itinerary activity fails to insert.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InsertFailurePolicy {
    /// Roll back the whole finalization on the first failed insert
    #[default]
    Abort,
    /// Log and count the failure, keep going, and report it in the finalize result
    Collect,
}

/// Top-level structure of `planner.toml`
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// `[planner]` table
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Settings for trip planning and background dispatch
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlannerConfig {
    /// Publish a trip request after each trip creation
    pub dispatch_enabled: bool,
    /// Capacity of the in-process trip request queue
    pub queue_capacity: usize,
    /// Behaviour on a failed activity insert during finalization
    pub insert_failure_policy: InsertFailurePolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            dispatch_enabled: true,
            queue_capacity: 64,
            insert_failure_policy: InsertFailurePolicy::Abort,
        }
    }
}

/// Loads planner configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, the TOML is invalid, or the queue
/// capacity is zero.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    parse_config(&contents)
}

/// Loads configuration from `TRIP_PLANNER_CONFIG` (default `./planner.toml`), using
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("TRIP_PLANNER_CONFIG")
        .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        tracing::info!("No planner config at {}, using defaults", path);
        Ok(Config::default())
    }
}

fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse planner.toml: {e}"),
    })?;

    if config.planner.queue_capacity == 0 {
        return Err(Error::Config {
            message: "queue_capacity must be at least 1".to_string(),
        });
    }

    Ok(config)
}
