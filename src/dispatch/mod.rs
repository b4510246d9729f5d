//! Background dispatch - hands newly created trips to a worker that plans them out of band.

/// Trip request wire format
pub mod message;
/// Bounded in-process trip request queue
pub mod queue;
/// Sequential trip plan consumer
pub mod worker;

pub use message::TripRequestMessage;
pub use queue::{TripRequestConsumer, TripRequestPublisher, trip_request_queue};
pub use worker::{TripPlanWorker, WorkerHandle, WorkerStats};
