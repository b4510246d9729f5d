//! Trip entity - A user's planned journey to one destination city.
//!
//! `status` holds the string form of [`crate::core::trip::TripStatus`]; a trip moves from
//! `"Planned"` to `"Finalized"` exactly once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Trip database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "trips")]
pub struct Model {
    /// Unique identifier for the trip
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Destination city
    pub destination_city_id: i64,
    /// User-given trip name
    pub title: String,
    /// First calendar day of the trip
    pub start_date: Date,
    /// Last calendar day of the trip, strictly after `start_date`
    pub end_date: Date,
    /// Total budget for flights, hotel, and activities
    pub total_budget: f64,
    /// `"Planned"` or `"Finalized"`
    pub status: String,
    /// When the trip was created
    pub created_at: DateTimeUtc,
    /// When the trip was last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Trip and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each trip goes to one city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::DestinationCityId",
        to = "super::city::Column::Id"
    )]
    DestinationCity,
    /// One trip has one itinerary day per calendar day
    #[sea_orm(has_many = "super::itinerary_day::Entity")]
    ItineraryDays,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DestinationCity.def()
    }
}

impl Related<super::itinerary_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItineraryDays.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
