//! Trip planner service - the public operation surface.
//!
//! [`TripPlanner`] holds the shared database connection, the optional trip request
//! publisher, and the planner settings, and exposes the operations a transport layer calls.
//! Trip request publishes run on tasks owned by the planner. Finished tasks are reaped on
//! every trip creation and their failures counted, so [`TripPlanner::wait_for_dispatches`]
//! can report them; they never fail trip creation.

use crate::{
    config::planner::PlannerConfig,
    core::{
        finalize::{FinalizeReport, finalize_trip_plan},
        itinerary::LogisticsSelection,
        options::{TripOption, generate_options},
        tier::Tier,
        trip::{self, ItineraryDayView, TripPlanRequest},
    },
    dispatch::{TripRequestMessage, TripRequestPublisher},
    entities::{itinerary_activity, itinerary_day, trip as trip_entity},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, instrument, warn};

/// Entry point for trip planning operations.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    db: Arc<DatabaseConnection>,
    publisher: Option<TripRequestPublisher>,
    config: PlannerConfig,
    dispatches: Arc<Mutex<JoinSet<Result<()>>>>,
    dispatch_failures: Arc<AtomicUsize>,
}

impl TripPlanner {
    /// Creates a planner. Trip requests are published only when a publisher is given and
    /// `config.dispatch_enabled` is set.
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        publisher: Option<TripRequestPublisher>,
        config: PlannerConfig,
    ) -> Self {
        let publisher = publisher.filter(|_| config.dispatch_enabled);
        Self {
            db,
            publisher,
            config,
            dispatches: Arc::new(Mutex::new(JoinSet::new())),
            dispatch_failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Database connection used by the planner.
    #[must_use]
    pub fn database(&self) -> &DatabaseConnection {
        self.db.as_ref()
    }

    /// Creates a trip with empty itinerary days and returns its id.
    ///
    /// When dispatch is enabled, a trip request is published in the background after the
    /// trip is committed.
    #[instrument(skip(self, request))]
    pub async fn plan_trip(&self, user_id: i64, request: &TripPlanRequest) -> Result<i64> {
        let trip = trip::plan_trip(self.db.as_ref(), user_id, request).await?;

        if let Some(publisher) = &self.publisher {
            let publisher = publisher.clone();
            let message = TripRequestMessage::new(trip.id, user_id, trip.destination_city_id);

            let mut dispatches = self.lock_dispatches();
            self.reap_finished(&mut dispatches);
            dispatches.spawn(async move {
                publisher.publish(&message).inspect_err(|e| {
                    error!(trip_id = message.trip_id, "Trip request publish failed: {e}");
                })
            });
        }

        info!(trip_id = trip.id, "Trip planned");
        Ok(trip.id)
    }

    /// Generates the priced options for a trip, one per satisfiable tier.
    pub async fn generate_options(&self, trip_id: i64) -> Result<Vec<TripOption>> {
        generate_options(self.db.as_ref(), trip_id).await
    }

    /// Finalizes a trip with the chosen tier and logistics.
    pub async fn finalize_trip_plan(
        &self,
        trip_id: i64,
        tier: Tier,
        hotel_id: i64,
        outbound_flight_id: i64,
        inbound_flight_id: i64,
    ) -> Result<FinalizeReport> {
        let selection = LogisticsSelection {
            tier,
            hotel_id,
            outbound_flight_id,
            inbound_flight_id,
        };
        finalize_trip_plan(
            self.db.as_ref(),
            trip_id,
            &selection,
            self.config.insert_failure_policy,
        )
        .await
    }

    /// Finds a trip by id.
    pub async fn get_trip(&self, trip_id: i64) -> Result<trip_entity::Model> {
        trip::get_trip(self.db.as_ref(), trip_id).await
    }

    /// All trips of a user, newest first.
    pub async fn get_user_trips(&self, user_id: i64) -> Result<Vec<trip_entity::Model>> {
        trip::get_user_trips(self.db.as_ref(), user_id).await
    }

    /// Itinerary days of a trip.
    pub async fn get_itinerary_days(&self, trip_id: i64) -> Result<Vec<itinerary_day::Model>> {
        trip::get_itinerary_days(self.db.as_ref(), trip_id).await
    }

    /// Activities of one itinerary day.
    pub async fn get_day_activities(
        &self,
        itinerary_day_id: i64,
    ) -> Result<Vec<itinerary_activity::Model>> {
        trip::get_day_activities(self.db.as_ref(), itinerary_day_id).await
    }

    /// Whole itinerary of a trip.
    pub async fn get_trip_itinerary(&self, trip_id: i64) -> Result<Vec<ItineraryDayView>> {
        trip::get_trip_itinerary(self.db.as_ref(), trip_id).await
    }

    /// Deletes a trip owned by `user_id`.
    pub async fn delete_user_trip(&self, trip_id: i64, user_id: i64) -> Result<()> {
        trip::delete_user_trip(self.db.as_ref(), trip_id, user_id).await
    }

    /// Number of publishes still running after finished ones are reaped.
    #[must_use]
    pub fn pending_dispatches(&self) -> usize {
        let mut dispatches = self.lock_dispatches();
        self.reap_finished(&mut dispatches);
        dispatches.len()
    }

    /// Waits for all background publishes started so far and returns how many failed
    /// since the last call, including failures already reaped.
    pub async fn wait_for_dispatches(&self) -> usize {
        let mut pending = std::mem::take(&mut *self.lock_dispatches());
        while let Some(outcome) = pending.join_next().await {
            self.record_outcome(outcome);
        }

        let failed = self.dispatch_failures.swap(0, Ordering::Relaxed);
        if failed > 0 {
            warn!(failed, "Some trip request publishes failed");
        }
        failed
    }

    fn lock_dispatches(&self) -> std::sync::MutexGuard<'_, JoinSet<Result<()>>> {
        self.dispatches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn reap_finished(&self, dispatches: &mut JoinSet<Result<()>>) {
        while let Some(outcome) = dispatches.try_join_next() {
            self.record_outcome(outcome);
        }
    }

    fn record_outcome(&self, outcome: std::result::Result<Result<()>, JoinError>) {
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                self.dispatch_failures.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error!("Trip request publish task failed: {e}");
                self.dispatch_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
