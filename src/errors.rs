//! Unified error type for the trip planner.
//!
//! Variants are split into caller mistakes (validation, unknown ids, budgets that fit no
//! tier, repeated finalization) and internal failures (database, queue, serialization).
//! [`Error::is_client_error`] exposes that split to whatever surface sits on top.

use thiserror::Error;

/// Errors produced by trip planning operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Input rejected before anything was persisted
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// No trip with this id (or not owned by the requesting user)
    #[error("Trip not found: {id}")]
    TripNotFound {
        /// Trip id that was looked up
        id: i64,
    },

    /// A referenced record does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record, e.g. `"hotel"`
        entity: &'static str,
        /// Id that was looked up
        id: i64,
    },

    /// Every tier was dropped during option generation
    #[error("could not generate any trip options within your budget")]
    NoOptions,

    /// The trip already left the `Planned` state
    #[error("Trip {id} is already finalized")]
    AlreadyFinalized {
        /// Trip id
        id: i64,
    },

    /// Publishing to or consuming from the trip request queue failed
    #[error("Dispatch error: {message}")]
    Dispatch {
        /// What went wrong
        message: String,
    },

    /// An itinerary activity could not be written while finalizing
    #[error("Failed to insert {activity_type} activity at slot {order} for day {day_id}: {source}")]
    ActivityInsert {
        /// Itinerary day the activity belonged to
        day_id: i64,
        /// Activity type tag
        activity_type: &'static str,
        /// Slot index within the day
        order: i32,
        /// Underlying database error
        source: sea_orm::DbErr,
    },

    /// Database or transaction failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Message encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns true when the error was caused by the caller's input rather than
    /// by the system (the 4xx/5xx split).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::TripNotFound { .. }
                | Self::NotFound { .. }
                | Self::NoOptions
                | Self::AlreadyFinalized { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
