//! Flight entity - One-way flight offers between two cities.
//!
//! Flights are directional: the outbound leg of a trip goes from the traveler's home city
//! to the destination, the inbound leg is a separate row going the other way.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Flight database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "flights")]
pub struct Model {
    /// Unique identifier for the flight
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Departure city
    pub from_city_id: i64,
    /// Arrival city
    pub to_city_id: i64,
    /// Operating airline name
    pub airline: String,
    /// Flight duration in minutes
    pub duration_minutes: i32,
    /// Ticket price for one passenger, one way
    pub price: f64,
    /// Aggregated passenger rating (0.0 - 5.0)
    pub rating: f64,
}

/// `Flight` relations are not modelled; both city columns are plain ids
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
