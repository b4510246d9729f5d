//! Trip plan worker - Consumes trip requests one at a time and finalizes each trip.
//!
//! For every message the worker generates the tier options and finalizes the first one,
//! with no user choice involved. Failures are logged and the message is dropped. Trips
//! that were already finalized are rejected by the finalize-once guard, so a redelivered
//! message cannot write a second itinerary.

use crate::{
    config::planner::InsertFailurePolicy,
    core::{
        finalize::{FinalizeReport, finalize_trip_plan},
        itinerary::LogisticsSelection,
        options::generate_options,
        trip::get_trip,
    },
    dispatch::{message::TripRequestMessage, queue::TripRequestConsumer},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Counters kept by a worker over its lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Messages taken off the queue
    pub processed: usize,
    /// Trips finalized
    pub finalized: usize,
    /// Messages dropped because of an error
    pub failed: usize,
}

/// Sequential consumer of trip requests.
#[derive(Debug, Clone)]
pub struct TripPlanWorker {
    db: Arc<DatabaseConnection>,
    policy: InsertFailurePolicy,
}

impl TripPlanWorker {
    /// Creates a worker writing itineraries through the shared connection `db`.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, policy: InsertFailurePolicy) -> Self {
        Self { db, policy }
    }

    /// Handles one encoded message end to end.
    ///
    /// # Errors
    /// Returns the decode, lookup, generation, or finalization error that stopped the
    /// message.
    #[instrument(skip(self, payload))]
    pub async fn process(&self, payload: &[u8]) -> Result<FinalizeReport> {
        let message = TripRequestMessage::decode(payload)?;
        info!(trip_id = message.trip_id, "Consumer picked up trip request");

        let trip = get_trip(self.db.as_ref(), message.trip_id).await?;
        let options = generate_options(self.db.as_ref(), trip.id).await?;
        let best = options.into_iter().next().ok_or(Error::NoOptions)?;

        let selection = LogisticsSelection {
            tier: best.tier,
            hotel_id: best.hotel.id,
            outbound_flight_id: best.outbound_flight.id,
            inbound_flight_id: best.inbound_flight.id,
        };
        finalize_trip_plan(self.db.as_ref(), trip.id, &selection, self.policy).await
    }

    /// Consumes until the queue closes or `shutdown` is notified, one message at a time.
    pub async fn run(self, mut consumer: TripRequestConsumer, shutdown: Arc<Notify>) -> WorkerStats {
        let mut stats = WorkerStats::default();
        info!("Trip plan worker started");

        loop {
            tokio::select! {
                // Shutdown wins over a waiting message
                biased;

                () = shutdown.notified() => {
                    info!("Trip plan worker received shutdown signal");
                    break;
                }
                payload = consumer.recv() => {
                    let Some(payload) = payload else {
                        info!("Trip request queue closed");
                        break;
                    };

                    stats.processed += 1;
                    match self.process(&payload).await {
                        Ok(report) => {
                            stats.finalized += 1;
                            info!(
                                trip_id = report.trip_id,
                                tier = %report.tier,
                                "Successfully processed trip plan from queue"
                            );
                        }
                        Err(e) if e.is_client_error() => {
                            stats.failed += 1;
                            warn!("Dropping trip request: {e}");
                        }
                        Err(e) => {
                            stats.failed += 1;
                            error!("Failed to process trip request: {e}");
                        }
                    }
                }
            }
        }

        info!(?stats, "Trip plan worker stopped");
        stats
    }

    /// Runs the worker on a background task.
    #[must_use]
    pub fn spawn(self, consumer: TripRequestConsumer) -> WorkerHandle {
        let shutdown = Arc::new(Notify::new());
        let join = tokio::spawn(self.run(consumer, Arc::clone(&shutdown)));
        WorkerHandle { shutdown, join }
    }
}

/// Handle to a spawned worker.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: Arc<Notify>,
    join: JoinHandle<WorkerStats>,
}

impl WorkerHandle {
    /// Stops the worker after its current message and returns its counters.
    pub async fn shutdown(self) -> Result<WorkerStats> {
        self.shutdown.notify_one();
        self.join.await.map_err(|e| Error::Dispatch {
            message: format!("trip plan worker task failed: {e}"),
        })
    }

    /// Waits for the worker to stop on its own, which happens once the queue closes.
    pub async fn join(self) -> Result<WorkerStats> {
        self.join.await.map_err(|e| Error::Dispatch {
            message: format!("trip plan worker task failed: {e}"),
        })
    }
}
