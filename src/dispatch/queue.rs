//! Bounded in-process queue carrying encoded trip requests from publishers to one consumer.
//!
//! Delivery is at most once: a publish that finds the queue full or closed fails
//! immediately and is never retried.

use crate::{
    dispatch::message::TripRequestMessage,
    errors::{Error, Result},
};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::info;

/// Creates a queue holding at most `capacity` undelivered messages.
#[must_use]
pub fn trip_request_queue(capacity: usize) -> (TripRequestPublisher, TripRequestConsumer) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        TripRequestPublisher { sender },
        TripRequestConsumer { receiver },
    )
}

/// Sending half of the queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TripRequestPublisher {
    sender: mpsc::Sender<Vec<u8>>,
}

impl TripRequestPublisher {
    /// Encodes and enqueues a message without waiting for room.
    ///
    /// # Errors
    /// Returns [`Error::Dispatch`] when the queue is full or the consumer is gone, and
    /// [`Error::Serialization`] when the message cannot be encoded.
    pub fn publish(&self, message: &TripRequestMessage) -> Result<()> {
        let payload = message.encode()?;
        self.sender.try_send(payload).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => "queue is full",
                TrySendError::Closed(_) => "queue is closed",
            };
            Error::Dispatch {
                message: format!("could not publish trip {}: {reason}", message.trip_id),
            }
        })?;

        info!(trip_id = message.trip_id, "Trip request published");
        Ok(())
    }
}

/// Receiving half of the queue. There is exactly one per queue.
#[derive(Debug)]
pub struct TripRequestConsumer {
    receiver: mpsc::Receiver<Vec<u8>>,
}

impl TripRequestConsumer {
    /// Waits for the next payload; `None` once every publisher is dropped and the queue
    /// is drained.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.receiver.recv().await
    }
}
