//! Trip business logic - Trip creation, the itinerary day scheduler, and trip lookups.
//!
//! A trip and all of its itinerary days are written in one transaction, so a trip never
//! exists without its complete 1..N day sequence.

use crate::{
    core::{budget::validate_budget, preferences::get_preferences},
    entities::{
        ItineraryActivity, ItineraryDay, Trip, itinerary_activity, itinerary_day, trip,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

/// Date format accepted in trip requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lifecycle state of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    /// Created with empty itinerary days, no tier chosen yet
    Planned,
    /// Logistics chosen and activities written
    Finalized,
}

impl TripStatus {
    /// Value stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Finalized => "Finalized",
        }
    }

    /// Parses a stored status.
    #[must_use]
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "Planned" => Some(Self::Planned),
            "Finalized" => Some(Self::Finalized),
            _ => None,
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client request to plan a new trip.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripPlanRequest {
    /// Trip title
    pub name: String,
    /// First day, `YYYY-MM-DD`
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`, strictly after `start_date`
    pub end_date: String,
    /// Destination city
    pub destination_city_id: i64,
    /// Total budget
    pub budget: f64,
}

/// A trip request whose fields passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTrip {
    /// Trimmed title
    pub title: String,
    /// First day
    pub start_date: NaiveDate,
    /// Last day
    pub end_date: NaiveDate,
    /// Destination city
    pub destination_city_id: i64,
    /// Total budget
    pub budget: f64,
}

/// Parses a `YYYY-MM-DD` date strictly: zero-padded fields, no sign, no whitespace.
pub fn parse_trip_date(value: &str) -> Result<NaiveDate> {
    let invalid = || Error::validation("invalid date format, use YYYY-MM-DD");

    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

impl TripPlanRequest {
    /// Validates names, dates, and budget without touching the database.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for an empty name, malformed dates, an end date on or
    /// before the start date, or a budget that is not a positive amount.
    pub fn validate(&self) -> Result<ValidatedTrip> {
        let title = self.name.trim();
        if title.is_empty() {
            return Err(Error::validation("trip name cannot be empty"));
        }

        let start_date = parse_trip_date(&self.start_date)?;
        let end_date = parse_trip_date(&self.end_date)?;
        if end_date <= start_date {
            return Err(Error::validation("end date must be after start date"));
        }

        validate_budget(self.budget)?;

        Ok(ValidatedTrip {
            title: title.to_string(),
            start_date,
            end_date,
            destination_city_id: self.destination_city_id,
            budget: self.budget,
        })
    }
}

/// Creates a trip and its itinerary days for `user_id`.
///
/// The user must have a home city in their preferences, since that is where the outbound
/// flight leaves from. Nothing is persisted when validation fails.
#[instrument(skip(db, request), fields(trip_name = %request.name))]
pub async fn plan_trip(
    db: &DatabaseConnection,
    user_id: i64,
    request: &TripPlanRequest,
) -> Result<trip::Model> {
    info!("Starting trip planning");

    let validated = request.validate().inspect_err(|e| warn!("Rejected trip request: {e}"))?;

    if get_preferences(db, user_id).await?.is_none() {
        warn!("User has no home city preference");
        return Err(Error::validation(
            "set a home city in your preferences before planning a trip",
        ));
    }

    let txn = db.begin().await?;

    let now = Utc::now();
    let trip = trip::ActiveModel {
        user_id: Set(user_id),
        destination_city_id: Set(validated.destination_city_id),
        title: Set(validated.title),
        start_date: Set(validated.start_date),
        end_date: Set(validated.end_date),
        total_budget: Set(validated.budget),
        status: Set(TripStatus::Planned.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .inspect_err(|e| error!("Failed to insert trip: {e}"))?;

    info!(trip_id = trip.id, "Trip header created");

    schedule_itinerary_days(&txn, trip.id, trip.start_date, trip.end_date).await?;

    txn.commit().await?;
    Ok(trip)
}

/// Writes one itinerary day per calendar day from `start` to `end`, both inclusive,
/// numbered from 1.
///
/// Meant to run inside the transaction that created the trip; the first failing insert
/// is returned and the caller's transaction rolls back.
pub async fn schedule_itinerary_days<C>(
    db: &C,
    trip_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<itinerary_day::Model>>
where
    C: ConnectionTrait,
{
    let mut days = Vec::new();

    for (index, date) in start.iter_days().take_while(|d| *d <= end).enumerate() {
        let day_number = i32::try_from(index + 1)
            .map_err(|_| Error::validation("trip is too long"))?;

        let day = itinerary_day::ActiveModel {
            trip_id: Set(trip_id),
            day_number: Set(day_number),
            date: Set(date),
            notes: Set(format!("Plan for day {day_number}.")),
            ..Default::default()
        }
        .insert(db)
        .await
        .inspect_err(|e| error!(trip_id, day_number, "Failed to insert itinerary day: {e}"))?;

        days.push(day);
    }

    debug!(trip_id, days = days.len(), "Itinerary days created");
    Ok(days)
}

/// Finds a trip by id.
pub async fn get_trip<C>(db: &C, trip_id: i64) -> Result<trip::Model>
where
    C: ConnectionTrait,
{
    Trip::find_by_id(trip_id)
        .one(db)
        .await?
        .ok_or(Error::TripNotFound { id: trip_id })
}

/// All trips of a user, newest first.
pub async fn get_user_trips(db: &DatabaseConnection, user_id: i64) -> Result<Vec<trip::Model>> {
    Trip::find()
        .filter(trip::Column::UserId.eq(user_id))
        .order_by_desc(trip::Column::CreatedAt)
        .order_by_desc(trip::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Itinerary days of a trip ordered by day number.
pub async fn get_itinerary_days<C>(db: &C, trip_id: i64) -> Result<Vec<itinerary_day::Model>>
where
    C: ConnectionTrait,
{
    ItineraryDay::find()
        .filter(itinerary_day::Column::TripId.eq(trip_id))
        .order_by_asc(itinerary_day::Column::DayNumber)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Activities of one itinerary day ordered by slot.
pub async fn get_day_activities<C>(
    db: &C,
    itinerary_day_id: i64,
) -> Result<Vec<itinerary_activity::Model>>
where
    C: ConnectionTrait,
{
    ItineraryActivity::find()
        .filter(itinerary_activity::Column::ItineraryDayId.eq(itinerary_day_id))
        .order_by_asc(itinerary_activity::Column::OrderNumber)
        .order_by_asc(itinerary_activity::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// One itinerary day together with its activities.
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDayView {
    /// The day
    pub day: itinerary_day::Model,
    /// Its activities ordered by slot
    pub activities: Vec<itinerary_activity::Model>,
}

/// The full itinerary of a trip, day by day.
pub async fn get_trip_itinerary(
    db: &DatabaseConnection,
    trip_id: i64,
) -> Result<Vec<ItineraryDayView>> {
    get_trip(db, trip_id).await?;

    let mut views = Vec::new();
    for day in get_itinerary_days(db, trip_id).await? {
        let activities = get_day_activities(db, day.id).await?;
        views.push(ItineraryDayView { day, activities });
    }
    Ok(views)
}

/// Deletes a trip owned by `user_id` together with its days and activities.
#[instrument(skip(db))]
pub async fn delete_user_trip(db: &DatabaseConnection, trip_id: i64, user_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let trip = Trip::find_by_id(trip_id)
        .filter(trip::Column::UserId.eq(user_id))
        .one(&txn)
        .await?
        .ok_or(Error::TripNotFound { id: trip_id })?;

    let day_ids: Vec<i64> = get_itinerary_days(&txn, trip_id)
        .await?
        .into_iter()
        .map(|day| day.id)
        .collect();

    ItineraryActivity::delete_many()
        .filter(itinerary_activity::Column::ItineraryDayId.is_in(day_ids))
        .exec(&txn)
        .await?;
    ItineraryDay::delete_many()
        .filter(itinerary_day::Column::TripId.eq(trip_id))
        .exec(&txn)
        .await?;
    trip.delete(&txn).await?;

    txn.commit().await?;
    info!("Trip deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn request(start: &str, end: &str, budget: f64) -> TripPlanRequest {
        TripPlanRequest {
            name: "Spring break".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            destination_city_id: 1,
            budget,
        }
    }

    #[test]
    fn test_request_validation() {
        assert!(request("2025-04-01", "2025-04-05", 1500.0).validate().is_ok());

        let cases = [
            request("2025/04/01", "2025-04-05", 1500.0),
            request("2025-04-01", "2025-4-5x", 1500.0),
            request("2025-04-01", "2025-4-5", 1500.0),
            request(" 2025-04-01", "2025-04-05", 1500.0),
            request("+2025-04-01", "2025-04-05", 1500.0),
            request("2025-04-01", "2025-04-05 ", 1500.0),
            request("2025-02-30", "2025-03-05", 1500.0),
            request("2025-04-05", "2025-04-05", 1500.0),
            request("2025-04-05", "2025-04-01", 1500.0),
            request("2025-04-01", "2025-04-05", 0.0),
            request("2025-04-01", "2025-04-05", -20.0),
        ];
        for case in cases {
            assert!(
                matches!(case.validate(), Err(Error::Validation { .. })),
                "{case:?} should be rejected"
            );
        }

        let mut blank = request("2025-04-01", "2025-04-05", 1500.0);
        blank.name = "   ".to_string();
        assert!(matches!(blank.validate(), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_parse_trip_date_requires_padded_fields() {
        assert_eq!(
            parse_trip_date("2025-04-05").unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()
        );
        for value in ["2025-4-5", "2025-04-5", " 2025-04-05", "+2025-04-05", "2025-04-05\n", ""] {
            assert!(
                matches!(parse_trip_date(value), Err(Error::Validation { .. })),
                "{value:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_plan_trip_rejects_before_persisting() -> Result<()> {
        // A mock without prepared results fails any query, so rejection must happen first
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = plan_trip(&db, 1, &request("2025-04-05", "2025-04-05", 900.0)).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_plan_trip_requires_home_city() -> Result<()> {
        let db = setup_test_db().await?;
        let city = create_test_city(&db, "Dest").await?;
        let mut req = request("2025-04-01", "2025-04-03", 900.0);
        req.destination_city_id = city.id;

        let result = plan_trip(&db, 42, &req).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(get_user_trips(&db, 42).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_plan_trip_creates_contiguous_days() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let mut req = request("2025-04-28", "2025-05-03", 2000.0);
        req.destination_city_id = world.destination.id;

        let trip = plan_trip(&db, world.user_id, &req).await?;
        assert_eq!(TripStatus::from_db(&trip.status), Some(TripStatus::Planned));
        assert_eq!(trip.title, "Spring break");

        let days = get_itinerary_days(&db, trip.id).await?;
        assert_eq!(days.len(), 6);
        for (i, day) in days.iter().enumerate() {
            assert_eq!(day.day_number, i32::try_from(i).unwrap() + 1);
            assert_eq!(day.date, trip.start_date + chrono::Days::new(i as u64));
            assert_eq!(day.notes, format!("Plan for day {}.", i + 1));
        }
        assert_eq!(days.last().unwrap().date, trip.end_date);

        Ok(())
    }

    #[tokio::test]
    async fn test_plan_trip_unknown_city_rolls_back() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let mut req = request("2025-04-01", "2025-04-03", 900.0);
        req.destination_city_id = 9999;

        assert!(plan_trip(&db, world.user_id, &req).await.is_err());
        assert!(get_user_trips(&db, world.user_id).await?.is_empty());
        assert!(ItineraryDay::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_trip_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(matches!(
            get_trip(&db, 77).await,
            Err(Error::TripNotFound { id: 77 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_user_trip() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let trip = create_test_trip(&db, &world, "2025-04-01", "2025-04-04", 2000.0).await?;

        // Someone else cannot delete it
        assert!(matches!(
            delete_user_trip(&db, trip.id, world.user_id + 1).await,
            Err(Error::TripNotFound { .. })
        ));

        delete_user_trip(&db, trip.id, world.user_id).await?;
        assert!(matches!(
            get_trip(&db, trip.id).await,
            Err(Error::TripNotFound { .. })
        ));
        assert!(get_itinerary_days(&db, trip.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_trips_newest_first() -> Result<()> {
        let (db, world) = setup_trip_world().await?;
        let first = create_test_trip(&db, &world, "2025-04-01", "2025-04-04", 2000.0).await?;
        let second = create_test_trip(&db, &world, "2025-05-01", "2025-05-04", 2000.0).await?;

        let trips = get_user_trips(&db, world.user_id).await?;
        let ids: Vec<_> = trips.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        Ok(())
    }
}
