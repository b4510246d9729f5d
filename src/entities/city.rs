//! City entity - Destinations and home cities that flights connect.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// City database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    /// Unique identifier for the city
    #[sea_orm(primary_key)]
    pub id: i64,
    /// City name (e.g., "Lisbon")
    pub name: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Latitude of the city centre in degrees
    pub latitude: f64,
    /// Longitude of the city centre in degrees
    pub longitude: f64,
}

/// Defines relationships between City and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One city has many hotels
    #[sea_orm(has_many = "super::hotel::Entity")]
    Hotels,
    /// One city has many attractions
    #[sea_orm(has_many = "super::attraction::Entity")]
    Attractions,
    /// One city has many restaurants
    #[sea_orm(has_many = "super::restaurant::Entity")]
    Restaurants,
}

impl Related<super::hotel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hotels.def()
    }
}

impl Related<super::attraction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attractions.def()
    }
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
