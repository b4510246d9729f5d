//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod attraction;
pub mod city;
pub mod flight;
pub mod hotel;
pub mod itinerary_activity;
pub mod itinerary_day;
pub mod restaurant;
pub mod trip;
pub mod user_preferences;

// Re-export specific types to avoid conflicts
pub use attraction::{Column as AttractionColumn, Entity as Attraction, Model as AttractionModel};
pub use city::{Column as CityColumn, Entity as City, Model as CityModel};
pub use flight::{Column as FlightColumn, Entity as Flight, Model as FlightModel};
pub use hotel::{Column as HotelColumn, Entity as Hotel, Model as HotelModel};
pub use itinerary_activity::{
    Column as ItineraryActivityColumn, Entity as ItineraryActivity,
    Model as ItineraryActivityModel,
};
pub use itinerary_day::{
    Column as ItineraryDayColumn, Entity as ItineraryDay, Model as ItineraryDayModel,
};
pub use restaurant::{Column as RestaurantColumn, Entity as Restaurant, Model as RestaurantModel};
pub use trip::{Column as TripColumn, Entity as Trip, Model as TripModel};
pub use user_preferences::{
    Column as UserPreferencesColumn, Entity as UserPreferences, Model as UserPreferencesModel,
};
