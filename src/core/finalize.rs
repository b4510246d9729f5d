//! Trip finalization - Commits a chosen tier and writes the full itinerary.
//!
//! Everything happens in one transaction on one connection: the trip is moved from
//! `Planned` to `Finalized` with a conditional update, the chosen hotel and flights are
//! checked, and every planned activity is inserted. A trip can only be finalized once;
//! a second attempt finds no `Planned` row and is rejected.

use crate::{
    config::planner::InsertFailurePolicy,
    core::{
        activity::TimeSlot,
        budget::{ACTIVITIES_SHARE, daily_attraction_limit},
        catalog::{best_attractions_by_tier, best_restaurants_by_tier},
        itinerary::{DayPlan, LogisticsSelection, PlannedActivity, plan_day_activities},
        tier::Tier,
        trip::{TripStatus, get_itinerary_days, get_trip},
    },
    entities::{Flight, Hotel, Trip, itinerary_activity, trip},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseTransaction, Set, TransactionTrait, prelude::*, sea_query::Expr};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Outcome of a finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeReport {
    /// Finalized trip
    pub trip_id: i64,
    /// Tier the itinerary was built for
    pub tier: Tier,
    /// Number of itinerary days
    pub days: usize,
    /// Activities successfully written
    pub activities_written: usize,
    /// Activities that failed to insert, only non-zero under [`InsertFailurePolicy::Collect`]
    pub failed_inserts: usize,
}

/// Finalizes a trip with the chosen logistics and writes all day activities.
///
/// # Errors
/// * [`Error::TripNotFound`] for an unknown trip
/// * [`Error::AlreadyFinalized`] when the trip is no longer `Planned`
/// * [`Error::NotFound`] when the hotel, a flight, or the itinerary days are missing
/// * [`Error::ActivityInsert`] on a failed insert under [`InsertFailurePolicy::Abort`]
///
/// Any error rolls the whole finalization back.
#[instrument(skip(db, selection), fields(tier = %selection.tier))]
pub async fn finalize_trip_plan(
    db: &DatabaseConnection,
    trip_id: i64,
    selection: &LogisticsSelection,
    policy: InsertFailurePolicy,
) -> Result<FinalizeReport> {
    info!("Finalizing trip plan");

    let txn = db.begin().await?;

    let trip = get_trip(&txn, trip_id).await?;
    mark_finalized(&txn, trip_id).await?;
    ensure_logistics_exist(&txn, selection).await?;

    let days = get_itinerary_days(&txn, trip_id).await?;
    if days.is_empty() {
        return Err(Error::NotFound {
            entity: "itinerary days for trip",
            id: trip_id,
        });
    }

    let activities_budget = trip.total_budget * ACTIVITIES_SHARE;
    let attraction_limit = daily_attraction_limit(activities_budget, days.len());

    let attractions = best_attractions_by_tier(
        &txn,
        trip.destination_city_id,
        attraction_limit,
        selection.tier,
    )
    .await?;
    if attractions.is_empty() {
        warn!(
            city_id = trip.destination_city_id,
            limit = attraction_limit,
            "No attractions found for criteria"
        );
    }

    let restaurants =
        best_restaurants_by_tier(&txn, trip.destination_city_id, selection.tier).await?;
    if restaurants.is_empty() {
        warn!(
            city_id = trip.destination_city_id,
            "No restaurants found for this city and tier"
        );
    }

    let plans = plan_day_activities(
        &days,
        selection,
        &attractions,
        &restaurants,
        attraction_limit,
    );
    let (activities_written, failed_inserts) = write_day_plans(&txn, &plans, policy).await?;

    txn.commit().await?;

    info!(
        activities_written,
        failed_inserts, "Trip finalized and saved successfully"
    );
    Ok(FinalizeReport {
        trip_id,
        tier: selection.tier,
        days: days.len(),
        activities_written,
        failed_inserts,
    })
}

/// Moves the trip from `Planned` to `Finalized`, failing if it was not `Planned`.
async fn mark_finalized(txn: &DatabaseTransaction, trip_id: i64) -> Result<()> {
    let result = Trip::update_many()
        .col_expr(
            trip::Column::Status,
            Expr::value(TripStatus::Finalized.as_str()),
        )
        .col_expr(trip::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(trip::Column::Id.eq(trip_id))
        .filter(trip::Column::Status.eq(TripStatus::Planned.as_str()))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        warn!("Trip is not in the Planned state");
        return Err(Error::AlreadyFinalized { id: trip_id });
    }
    Ok(())
}

async fn ensure_logistics_exist(
    txn: &DatabaseTransaction,
    selection: &LogisticsSelection,
) -> Result<()> {
    if Hotel::find_by_id(selection.hotel_id).one(txn).await?.is_none() {
        return Err(Error::NotFound {
            entity: "hotel",
            id: selection.hotel_id,
        });
    }

    for flight_id in [selection.outbound_flight_id, selection.inbound_flight_id] {
        if Flight::find_by_id(flight_id).one(txn).await?.is_none() {
            return Err(Error::NotFound {
                entity: "flight",
                id: flight_id,
            });
        }
    }
    Ok(())
}

fn activity_model(day: &DayPlan, planned: &PlannedActivity) -> itinerary_activity::ActiveModel {
    let (start_time, end_time) = TimeSlot::for_order(planned.order).on(day.date);
    let (flight_id, hotel_id, attraction_id, restaurant_id) = planned.entity.columns();

    itinerary_activity::ActiveModel {
        itinerary_day_id: Set(day.day_id),
        activity_type: Set(planned.entity.kind().as_str().to_string()),
        flight_id: Set(flight_id),
        hotel_id: Set(hotel_id),
        attraction_id: Set(attraction_id),
        restaurant_id: Set(restaurant_id),
        order_number: Set(planned.order),
        start_time: Set(start_time),
        end_time: Set(end_time),
        notes: Set(planned.notes.clone()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
}

/// Inserts every planned activity, returning `(written, failed)`.
///
/// Under [`InsertFailurePolicy::Collect`] each insert runs in its own savepoint, so a
/// failed row leaves the surrounding transaction usable.
pub(crate) async fn write_day_plans(
    txn: &DatabaseTransaction,
    plans: &[DayPlan],
    policy: InsertFailurePolicy,
) -> Result<(usize, usize)> {
    let mut written = 0;
    let mut failed = 0;

    for day in plans {
        for planned in &day.activities {
            let model = activity_model(day, planned);
            let activity_type = planned.entity.kind().as_str();

            let outcome = match policy {
                InsertFailurePolicy::Abort => model.insert(txn).await.map(|_| ()),
                InsertFailurePolicy::Collect => {
                    let savepoint = txn.begin().await?;
                    match model.insert(&savepoint).await {
                        Ok(_) => savepoint.commit().await,
                        Err(e) => {
                            savepoint.rollback().await?;
                            Err(e)
                        }
                    }
                }
            };

            match outcome {
                Ok(()) => written += 1,
                Err(source) => {
                    error!(
                        day_id = day.day_id,
                        activity_type,
                        order = planned.order,
                        "Failed to insert itinerary activity: {source}"
                    );
                    if policy == InsertFailurePolicy::Abort {
                        return Err(Error::ActivityInsert {
                            day_id: day.day_id,
                            activity_type,
                            order: planned.order,
                            source,
                        });
                    }
                    failed += 1;
                }
            }
        }
    }

    Ok((written, failed))
}
