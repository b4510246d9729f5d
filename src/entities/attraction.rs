//! Attraction entity - Sights and activities that fill the middle days of a trip.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Attraction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attractions")]
pub struct Model {
    /// Unique identifier for the attraction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// City the attraction is located in
    pub city_id: i64,
    /// Display name
    pub name: String,
    /// Free-form category (e.g., "museum", "park")
    pub category: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Aggregated visitor rating (0.0 - 5.0)
    pub rating: f64,
    /// Entry fee per person, 0.0 for free attractions
    pub entry_fee: f64,
}

/// Defines relationships between Attraction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attraction belongs to one city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
