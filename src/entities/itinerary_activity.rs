//! Itinerary activity entity - A time-boxed entry within an itinerary day.
//!
//! At most one of the four reference columns is set, selected by `activity_type`.
//! Core code never touches those columns directly; it goes through
//! [`crate::core::activity::ActivityRef`], which makes other combinations unrepresentable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Itinerary activity database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itinerary_activities")]
pub struct Model {
    /// Unique identifier for the activity
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Parent itinerary day
    pub itinerary_day_id: i64,
    /// `"flight"`, `"hotel"`, `"attraction"`, or `"restaurant"`
    pub activity_type: String,
    /// Set for flight activities
    pub flight_id: Option<i64>,
    /// Set for hotel activities
    pub hotel_id: Option<i64>,
    /// Set for attraction activities, None for placeholder events
    pub attraction_id: Option<i64>,
    /// Set for restaurant activities
    pub restaurant_id: Option<i64>,
    /// Fixed time-slot index within the day
    pub order_number: i32,
    /// Slot start
    pub start_time: DateTime,
    /// Slot end
    pub end_time: DateTime,
    /// Free-text notes, may carry a fallback suggestion
    pub notes: String,
    /// When the activity was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `ItineraryActivity` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each activity belongs to one itinerary day
    #[sea_orm(
        belongs_to = "super::itinerary_day::Entity",
        from = "Column::ItineraryDayId",
        to = "super::itinerary_day::Column::Id",
        on_delete = "Cascade"
    )]
    ItineraryDay,
    /// Flight taken in this slot
    #[sea_orm(
        belongs_to = "super::flight::Entity",
        from = "Column::FlightId",
        to = "super::flight::Column::Id"
    )]
    Flight,
    /// Hotel stayed at in this slot
    #[sea_orm(
        belongs_to = "super::hotel::Entity",
        from = "Column::HotelId",
        to = "super::hotel::Column::Id"
    )]
    Hotel,
    /// Attraction visited in this slot
    #[sea_orm(
        belongs_to = "super::attraction::Entity",
        from = "Column::AttractionId",
        to = "super::attraction::Column::Id"
    )]
    Attraction,
    /// Restaurant eaten at in this slot
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
}

impl Related<super::itinerary_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItineraryDay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
