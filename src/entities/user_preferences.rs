//! User preferences entity - Travel defaults per user.
//!
//! The home city is the origin of every outbound flight; it is not part of the trip request.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User preferences database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_preferences")]
pub struct Model {
    /// Unique identifier for the preference row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning user, one row per user
    #[sea_orm(unique)]
    pub user_id: i64,
    /// City the user travels from
    pub home_city_id: i64,
    /// Lower end of the user's usual trip budget
    pub budget_min: f64,
    /// Upper end of the user's usual trip budget
    pub budget_max: f64,
    /// Free-form travel style (e.g., "relaxed", "adventurous")
    pub travel_style: String,
    /// When the preferences were created
    pub created_at: DateTimeUtc,
    /// When the preferences were last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between `UserPreferences` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The home city
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::HomeCityId",
        to = "super::city::Column::Id"
    )]
    HomeCity,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeCity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
