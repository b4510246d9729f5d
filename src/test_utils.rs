//! Shared test utilities for the trip planner.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalog records with sensible defaults.

use crate::{
    core::{
        preferences::upsert_preferences,
        trip::{TripPlanRequest, plan_trip},
    },
    entities::{attraction, city, flight, hotel, restaurant, trip},
    errors::Result,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test city.
///
/// # Defaults
/// * `country_code`: "PT"
/// * coordinates: 38.72, -9.14
pub async fn create_test_city(db: &DatabaseConnection, name: &str) -> Result<city::Model> {
    create_city_at(db, name, (38.72, -9.14)).await
}

/// Creates a test city at the given `(latitude, longitude)`.
pub async fn create_city_at(
    db: &DatabaseConnection,
    name: &str,
    (latitude, longitude): (f64, f64),
) -> Result<city::Model> {
    let model = city::ActiveModel {
        name: Set(name.to_string()),
        country_code: Set("PT".to_string()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates a one-way flight.
///
/// # Defaults
/// * `airline`: "TestAir"
/// * `duration_minutes`: 60
pub async fn create_test_flight(
    db: &DatabaseConnection,
    from_city_id: i64,
    to_city_id: i64,
    price: f64,
    rating: f64,
) -> Result<flight::Model> {
    let model = flight::ActiveModel {
        from_city_id: Set(from_city_id),
        to_city_id: Set(to_city_id),
        airline: Set("TestAir".to_string()),
        duration_minutes: Set(60),
        price: Set(price),
        rating: Set(rating),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates a hotel.
///
/// # Defaults
/// * `stars`: 3
/// * coordinates: 38.71, -9.14
pub async fn create_test_hotel(
    db: &DatabaseConnection,
    city_id: i64,
    name: &str,
    price_per_night: f64,
    rating: f64,
) -> Result<hotel::Model> {
    let model = hotel::ActiveModel {
        city_id: Set(city_id),
        name: Set(name.to_string()),
        stars: Set(3),
        rating: Set(rating),
        price_per_night: Set(price_per_night),
        latitude: Set(38.71),
        longitude: Set(-9.14),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates an attraction at `(latitude, longitude)` with category "sight".
pub async fn create_test_attraction(
    db: &DatabaseConnection,
    city_id: i64,
    name: &str,
    entry_fee: f64,
    rating: f64,
    (latitude, longitude): (f64, f64),
) -> Result<attraction::Model> {
    let model = attraction::ActiveModel {
        city_id: Set(city_id),
        name: Set(name.to_string()),
        category: Set("sight".to_string()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        rating: Set(rating),
        entry_fee: Set(entry_fee),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Creates a restaurant at `(latitude, longitude)` with cuisine "portuguese".
pub async fn create_test_restaurant(
    db: &DatabaseConnection,
    city_id: i64,
    name: &str,
    price_range: &str,
    rating: f64,
    (latitude, longitude): (f64, f64),
) -> Result<restaurant::Model> {
    let model = restaurant::ActiveModel {
        city_id: Set(city_id),
        name: Set(name.to_string()),
        cuisine: Set("portuguese".to_string()),
        latitude: Set(latitude),
        longitude: Set(longitude),
        rating: Set(rating),
        price_range: Set(price_range.to_string()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// A small catalog shared by the planning tests.
///
/// Flights are listed cheapest first, hotels are `Hostel Central` (80), `Riverside` (95)
/// and `Palace` (140), all in the destination.
#[derive(Debug, Clone)]
pub struct TestWorld {
    /// User whose home city is `home`
    pub user_id: i64,
    /// Origin city (Porto)
    pub home: city::Model,
    /// Destination city (Lisbon)
    pub destination: city::Model,
    /// Hotel ids in the destination
    pub hotel_ids: Vec<i64>,
    /// Home to destination flight ids
    pub outbound_flight_ids: Vec<i64>,
    /// Destination to home flight ids
    pub inbound_flight_ids: Vec<i64>,
}

/// Creates a database holding a [`TestWorld`].
pub async fn setup_trip_world() -> Result<(DatabaseConnection, TestWorld)> {
    let db = setup_test_db().await?;
    let home = create_city_at(&db, "Porto", (41.15, -8.61)).await?;
    let destination = create_city_at(&db, "Lisbon", (38.72, -9.14)).await?;

    let user_id = 1;
    upsert_preferences(&db, user_id, home.id, 500.0, 3000.0, "balanced".to_string()).await?;

    let mut outbound_flight_ids = Vec::new();
    for (price, rating) in [(120.0, 3.0), (150.0, 4.8)] {
        let flight = create_test_flight(&db, home.id, destination.id, price, rating).await?;
        outbound_flight_ids.push(flight.id);
    }
    let mut inbound_flight_ids = Vec::new();
    for (price, rating) in [(110.0, 3.2), (140.0, 4.8)] {
        let flight = create_test_flight(&db, destination.id, home.id, price, rating).await?;
        inbound_flight_ids.push(flight.id);
    }

    let mut hotel_ids = Vec::new();
    for (name, price, rating) in [
        ("Hostel Central", 80.0, 3.5),
        ("Riverside", 95.0, 4.3),
        ("Palace", 140.0, 4.9),
    ] {
        let hotel = create_test_hotel(&db, destination.id, name, price, rating).await?;
        hotel_ids.push(hotel.id);
    }

    for (name, fee, rating, point) in [
        ("Castle", 15.0, 4.7, (38.7139, -9.1334)),
        ("Tower", 10.0, 4.6, (38.6916, -9.2160)),
        ("Monastery", 12.0, 4.8, (38.6979, -9.2068)),
        ("Oceanarium", 25.0, 4.5, (38.7635, -9.0937)),
        ("Garden", 0.0, 4.2, (38.7150, -9.1350)),
        ("Tile Museum", 5.0, 4.4, (38.7247, -9.1137)),
        ("Viewpoint", 0.0, 4.3, (38.7171, -9.1303)),
        ("Old Tram", 3.0, 4.1, (38.7107, -9.1365)),
        ("Art Gallery", 8.0, 4.0, (38.7370, -9.1540)),
    ] {
        create_test_attraction(&db, destination.id, name, fee, rating, point).await?;
    }

    for (name, range, rating, point) in [
        ("Tasca", "$", 4.4, (38.7120, -9.1330)),
        ("Cervejaria", "$$", 4.6, (38.7180, -9.1400)),
        ("Pastelaria", "", 4.2, (38.6970, -9.2050)),
        ("Marisqueira", "$$$$", 4.9, (38.7600, -9.0950)),
    ] {
        create_test_restaurant(&db, destination.id, name, range, rating, point).await?;
    }

    let world = TestWorld {
        user_id,
        home,
        destination,
        hotel_ids,
        outbound_flight_ids,
        inbound_flight_ids,
    };
    Ok((db, world))
}

/// Plans a trip named "Spring break" to the world's destination.
pub async fn create_test_trip(
    db: &DatabaseConnection,
    world: &TestWorld,
    start_date: &str,
    end_date: &str,
    budget: f64,
) -> Result<trip::Model> {
    let request = TripPlanRequest {
        name: "Spring break".to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        destination_city_id: world.destination.id,
        budget,
    };
    plan_trip(db, world.user_id, &request).await
}
