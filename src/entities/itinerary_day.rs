//! Itinerary day entity - One calendar day of a trip.
//!
//! Days are numbered 1..N without gaps and are created together with their trip.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Itinerary day database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itinerary_days")]
pub struct Model {
    /// Unique identifier for the day
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent trip
    pub trip_id: i64,
    /// 1-based position within the trip
    pub day_number: i32,
    /// Calendar date of this day
    pub date: Date,
    /// Free-text notes
    pub notes: String,
}

/// Defines relationships between `ItineraryDay` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each day belongs to one trip
    #[sea_orm(
        belongs_to = "super::trip::Entity",
        from = "Column::TripId",
        to = "super::trip::Column::Id",
        on_delete = "Cascade"
    )]
    Trip,
    /// One day has many activities
    #[sea_orm(has_many = "super::itinerary_activity::Entity")]
    Activities,
}

impl Related<super::trip::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Trip.def()
    }
}

impl Related<super::itinerary_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
