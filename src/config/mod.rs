/// Database configuration and connection management
pub mod database;

/// Planner settings loading from planner.toml
pub mod planner;
