//! Catalog queries - Tier-biased selection of flights, hotels, attractions, and restaurants.
//!
//! Each query filters by city and price cap and then orders according to the tier:
//! Economy takes the cheapest candidate, Balanced and Luxury take the best rated one and
//! break rating ties towards the more expensive candidate. Balanced hotels are further
//! restricted to 60% of the nightly ceiling. Ties left after that are broken by id so
//! results are deterministic.

use crate::{
    core::tier::Tier,
    entities::{Attraction, Flight, Hotel, Restaurant, attraction, flight, hotel, restaurant},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Select, prelude::*};

/// Maximum number of ranked attractions returned for one city.
pub const ATTRACTION_LIMIT: u64 = 10;
/// Maximum number of ranked restaurants returned for one city.
pub const RESTAURANT_LIMIT: u64 = 15;
/// Balanced hotels must cost at most this share of the nightly ceiling.
pub const BALANCED_HOTEL_SHARE: f64 = 0.60;

/// Orders a query cheapest first or best rated first, depending on the tier.
fn order_by_tier<E, C>(query: Select<E>, tier: Tier, rating: C, price: C, id: C) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let ordered = match tier {
        Tier::Economy => query.order_by_asc(price),
        Tier::Balanced | Tier::Luxury => query.order_by_desc(rating).order_by_desc(price),
    };
    ordered.order_by_asc(id)
}

/// Best one-way flight from `from_city_id` to `to_city_id` costing at most `max_price`.
pub async fn best_flight_by_tier<C>(
    db: &C,
    from_city_id: i64,
    to_city_id: i64,
    max_price: f64,
    tier: Tier,
) -> Result<Option<flight::Model>>
where
    C: ConnectionTrait,
{
    let query = Flight::find()
        .filter(flight::Column::FromCityId.eq(from_city_id))
        .filter(flight::Column::ToCityId.eq(to_city_id))
        .filter(flight::Column::Price.lte(max_price));

    order_by_tier(
        query,
        tier,
        flight::Column::Rating,
        flight::Column::Price,
        flight::Column::Id,
    )
    .one(db)
    .await
    .map_err(Into::into)
}

/// Best hotel in `city_id` whose nightly price fits under `max_price_per_night`.
pub async fn best_hotel_by_tier<C>(
    db: &C,
    city_id: i64,
    max_price_per_night: f64,
    tier: Tier,
) -> Result<Option<hotel::Model>>
where
    C: ConnectionTrait,
{
    let cap = match tier {
        Tier::Balanced => max_price_per_night * BALANCED_HOTEL_SHARE,
        Tier::Economy | Tier::Luxury => max_price_per_night,
    };

    let query = Hotel::find()
        .filter(hotel::Column::CityId.eq(city_id))
        .filter(hotel::Column::PricePerNight.lte(cap));

    order_by_tier(
        query,
        tier,
        hotel::Column::Rating,
        hotel::Column::PricePerNight,
        hotel::Column::Id,
    )
    .one(db)
    .await
    .map_err(Into::into)
}

/// Up to [`ATTRACTION_LIMIT`] attractions in `city_id` with an entry fee of at most
/// `max_entry_fee`, ranked for the tier.
pub async fn best_attractions_by_tier<C>(
    db: &C,
    city_id: i64,
    max_entry_fee: f64,
    tier: Tier,
) -> Result<Vec<attraction::Model>>
where
    C: ConnectionTrait,
{
    let query = Attraction::find()
        .filter(attraction::Column::CityId.eq(city_id))
        .filter(attraction::Column::EntryFee.lte(max_entry_fee));

    order_by_tier(
        query,
        tier,
        attraction::Column::Rating,
        attraction::Column::EntryFee,
        attraction::Column::Id,
    )
    .limit(ATTRACTION_LIMIT)
    .all(db)
    .await
    .map_err(Into::into)
}

/// Price ranges a tier eats at. Restaurants without a known price range fit every tier.
#[must_use]
pub const fn restaurant_price_ranges(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Economy => &["", "$", "$$"],
        Tier::Balanced => &["", "$$", "$$$"],
        Tier::Luxury => &["", "$$$", "$$$$"],
    }
}

/// Up to [`RESTAURANT_LIMIT`] restaurants in `city_id` matching the tier's price ranges,
/// best rated first.
pub async fn best_restaurants_by_tier<C>(
    db: &C,
    city_id: i64,
    tier: Tier,
) -> Result<Vec<restaurant::Model>>
where
    C: ConnectionTrait,
{
    Restaurant::find()
        .filter(restaurant::Column::CityId.eq(city_id))
        .filter(restaurant::Column::PriceRange.is_in(restaurant_price_ranges(tier).iter().copied()))
        .order_by_desc(restaurant::Column::Rating)
        .order_by_asc(restaurant::Column::Id)
        .limit(RESTAURANT_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}
