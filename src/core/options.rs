//! Tier option generation - Turns a trip budget into up to three concrete trip options.
//!
//! For every tier, in the fixed order Economy, Balanced, Luxury, the generator picks an
//! outbound flight, an inbound flight, and a hotel that fit the allocated budget. A tier
//! that cannot be satisfied is dropped and logged; only when every tier is dropped does
//! generation fail. Options are computed fresh on every call and never stored.

use crate::{
    core::{
        budget::BudgetAllocation,
        catalog::{best_flight_by_tier, best_hotel_by_tier},
        preferences::get_home_city,
        tier::Tier,
        trip::get_trip,
    },
    entities::{flight, hotel},
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// One concrete, priced way to do a trip at a given tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripOption {
    /// Tier the option was built for
    pub tier: Tier,
    /// Home city to destination
    pub outbound_flight: flight::Model,
    /// Destination back home
    pub inbound_flight: flight::Model,
    /// Hotel for every night of the stay
    pub hotel: hotel::Model,
    /// What flights and hotel actually cost
    pub logistics_cost: f64,
    /// Budget for attractions and meals
    pub activities_budget: f64,
    /// Buffer plus whatever the logistics came in under budget
    pub buffer: f64,
    /// `logistics_cost + activities_budget + buffer`
    pub total: f64,
}

/// Why a tier produced no option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSkip {
    /// No outbound flight under the per-leg cap
    NoOutboundFlight,
    /// No inbound flight under the per-leg cap
    NoInboundFlight,
    /// Flights used up the whole logistics budget
    NoHotelBudget,
    /// No hotel under the nightly ceiling
    NoAffordableHotel,
}

/// Generates the trip options for a stored trip.
///
/// # Errors
/// * [`Error::TripNotFound`] for an unknown trip
/// * [`Error::Validation`] when the user has no home city or the trip is shorter than a night
/// * [`Error::NoOptions`] when no tier fits the budget
#[instrument(skip(db))]
pub async fn generate_options<C>(db: &C, trip_id: i64) -> Result<Vec<TripOption>>
where
    C: ConnectionTrait,
{
    let trip = get_trip(db, trip_id).await?;
    let origin_city_id = get_home_city(db, trip.user_id).await?;
    let allocation = BudgetAllocation::for_dates(trip.total_budget, trip.start_date, trip.end_date)?;

    generate_options_for(db, origin_city_id, trip.destination_city_id, &allocation).await
}

/// Generates options for an explicit route and allocation.
pub async fn generate_options_for<C>(
    db: &C,
    origin_city_id: i64,
    destination_city_id: i64,
    allocation: &BudgetAllocation,
) -> Result<Vec<TripOption>>
where
    C: ConnectionTrait,
{
    let mut options = Vec::with_capacity(Tier::ALL.len());

    for tier in Tier::ALL {
        match build_tier_option(db, origin_city_id, destination_city_id, allocation, tier).await? {
            Ok(option) => options.push(option),
            Err(skip) => warn!(%tier, ?skip, "Skipping tier"),
        }
    }

    if options.is_empty() {
        return Err(Error::NoOptions);
    }

    info!(count = options.len(), "Generated trip options");
    Ok(options)
}

/// Builds the option for a single tier, or says why the tier has none.
///
/// Database failures are returned as the outer error; an unsatisfiable tier is the inner
/// `Err`.
pub async fn build_tier_option<C>(
    db: &C,
    origin_city_id: i64,
    destination_city_id: i64,
    allocation: &BudgetAllocation,
    tier: Tier,
) -> Result<std::result::Result<TripOption, TierSkip>>
where
    C: ConnectionTrait,
{
    let Some(outbound_flight) = best_flight_by_tier(
        db,
        origin_city_id,
        destination_city_id,
        allocation.one_way_flight,
        tier,
    )
    .await?
    else {
        return Ok(Err(TierSkip::NoOutboundFlight));
    };

    let Some(inbound_flight) = best_flight_by_tier(
        db,
        destination_city_id,
        origin_city_id,
        allocation.one_way_flight,
        tier,
    )
    .await?
    else {
        return Ok(Err(TierSkip::NoInboundFlight));
    };

    let flights_cost = outbound_flight.price + inbound_flight.price;
    let Some(nightly_ceiling) = allocation.hotel_nightly_ceiling(flights_cost) else {
        return Ok(Err(TierSkip::NoHotelBudget));
    };

    let Some(hotel) = best_hotel_by_tier(db, destination_city_id, nightly_ceiling, tier).await?
    else {
        return Ok(Err(TierSkip::NoAffordableHotel));
    };

    let logistics_cost = flights_cost + hotel.price_per_night * f64::from(allocation.nights);
    let buffer = allocation.buffer + (allocation.logistics - logistics_cost);

    Ok(Ok(TripOption {
        tier,
        outbound_flight,
        inbound_flight,
        hotel,
        logistics_cost,
        activities_budget: allocation.activities,
        buffer,
        total: logistics_cost + allocation.activities + buffer,
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{ActiveModelTrait, Set};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn test_economy_option_worked_example() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-06-01", "2025-06-06", 2000.0).await?;

        let options = generate_options(&db, trip.id).await?;
        let economy = options.iter().find(|o| o.tier == Tier::Economy).unwrap();

        assert!(approx(economy.outbound_flight.price, 120.0));
        assert!(approx(economy.inbound_flight.price, 110.0));
        assert!(approx(economy.hotel.price_per_night, 80.0));
        assert!(approx(economy.logistics_cost, 630.0));
        assert!(approx(economy.activities_budget, 600.0));
        assert!(approx(economy.buffer, 770.0));
        assert!(approx(economy.total, 2000.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_options_in_fixed_order_within_budget() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-06-01", "2025-06-06", 2000.0).await?;

        let options = generate_options(&db, trip.id).await?;
        let tiers: Vec<_> = options.iter().map(|o| o.tier).collect();
        assert_eq!(tiers, vec![Tier::Economy, Tier::Balanced, Tier::Luxury]);

        for option in &options {
            assert!(option.logistics_cost <= 1000.0 + 1e-9);
            assert!(approx(option.total, 2000.0));
        }

        let luxury = &options[2];
        assert_eq!(luxury.hotel.name, "Palace");
        Ok(())
    }

    #[tokio::test]
    async fn test_zero_night_trip_rejected() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-06-01", "2025-06-06", 2000.0).await?;

        // Collapse the stored dates to a single day
        let mut model: crate::entities::trip::ActiveModel = trip.clone().into();
        model.end_date = Set(trip.start_date);
        model.update(&db).await?;

        match generate_options(&db, trip.id).await {
            Err(Error::Validation { message }) => {
                assert_eq!(message, "trip must be at least 1 night");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_tier_without_hotel_money_is_dropped() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-06-01", "2025-06-06", 2000.0).await?;
        let allocation = BudgetAllocation::new(2000.0, 5)?;

        let skip = build_tier_option(
            &db,
            world.home.id,
            world.destination.id,
            &BudgetAllocation {
                logistics: 200.0,
                ..allocation
            },
            Tier::Economy,
        )
        .await?;
        assert_eq!(skip.unwrap_err(), TierSkip::NoHotelBudget);

        // On a tight budget the Balanced margin leaves no bookable hotel
        let tight = BudgetAllocation::new(1300.0, 5)?;
        let options =
            generate_options_for(&db, world.home.id, world.destination.id, &tight).await?;
        assert!(options.iter().all(|o| o.tier != Tier::Balanced));
        assert!(!options.is_empty());
        assert!(generate_options(&db, trip.id).await?.len() == 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_rated_flights_leave_no_hotel_money() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let guesthouse =
            create_test_hotel(&db, world.destination.id, "Guesthouse", 10.0, 2.0).await?;

        // The rated flights (150 + 140) take the whole logistics budget
        let allocation = BudgetAllocation {
            logistics: 290.0,
            one_way_flight: 150.0,
            ..BudgetAllocation::new(2000.0, 5)?
        };

        let options =
            generate_options_for(&db, world.home.id, world.destination.id, &allocation).await?;
        let tiers: Vec<_> = options.iter().map(|o| o.tier).collect();
        assert_eq!(tiers, vec![Tier::Economy]);
        assert_eq!(options[0].hotel.id, guesthouse.id);
        assert!(approx(options[0].logistics_cost, 280.0));

        for tier in [Tier::Balanced, Tier::Luxury] {
            let skip = build_tier_option(&db, world.home.id, world.destination.id, &allocation, tier)
                .await?;
            assert_eq!(skip.unwrap_err(), TierSkip::NoHotelBudget);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_no_options_is_an_error() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-06-01", "2025-06-06", 100.0).await?;

        assert!(matches!(
            generate_options(&db, trip.id).await,
            Err(Error::NoOptions)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_trip() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            generate_options(&db, 404).await,
            Err(Error::TripNotFound { id: 404 })
        ));
        Ok(())
    }
}
