//! Core business logic - framework-agnostic trip planning operations.

/// Activity kinds, entity references, and the fixed time-slot table
pub mod activity;
/// Budget split into logistics, activities, and buffer
pub mod budget;
/// Tier-biased flight, hotel, attraction, and restaurant queries
pub mod catalog;
/// Finalization: tier commit and itinerary persistence
pub mod finalize;
/// Haversine distance
pub mod geo;
/// Greedy assignment of activities to itinerary days
pub mod itinerary;
/// Tier option generation
pub mod options;
/// User preferences (home city)
pub mod preferences;
/// Service tiers
pub mod tier;
/// Trip creation, day scheduling, and lookups
pub mod trip;
