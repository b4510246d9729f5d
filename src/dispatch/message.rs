//! Wire format of the "plan this trip" message.

use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message type tag for itinerary generation requests.
pub const GENERATE_ITINERARY: &str = "generate_itinerary";

/// Request for a worker to pick options for a trip and finalize it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequestMessage {
    /// Always [`GENERATE_ITINERARY`]
    #[serde(rename = "type")]
    pub kind: String,
    /// Trip to plan
    pub trip_id: i64,
    /// Owner of the trip
    pub user_id: i64,
    /// Destination city of the trip
    pub city_id: i64,
    /// When the request was published
    pub created_at: DateTime<Utc>,
}

impl TripRequestMessage {
    /// Builds a new request stamped with the current time.
    #[must_use]
    pub fn new(trip_id: i64, user_id: i64, city_id: i64) -> Self {
        Self {
            kind: GENERATE_ITINERARY.to_string(),
            trip_id,
            user_id,
            city_id,
            created_at: Utc::now(),
        }
    }

    /// Serializes the message to JSON bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Into::into)
    }

    /// Parses a message from JSON bytes.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_wire_field_names() {
        let message = TripRequestMessage::new(3, 9, 27);
        let value: serde_json::Value = serde_json::from_slice(&message.encode().unwrap()).unwrap();

        assert_eq!(value["type"], "generate_itinerary");
        assert_eq!(value["trip_id"], 3);
        assert_eq!(value["user_id"], 9);
        assert_eq!(value["city_id"], 27);
        assert!(value["created_at"].is_string());
    }

    #[test]
    fn test_decode_external_payload() {
        let payload = br#"{"type":"generate_itinerary","trip_id":12,"user_id":4,"city_id":8,
            "created_at":"2025-05-01T10:00:00Z"}"#;
        let message = TripRequestMessage::decode(payload).unwrap();
        assert_eq!(message.trip_id, 12);
        assert_eq!(message.kind, GENERATE_ITINERARY);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            TripRequestMessage::decode(b"not json"),
            Err(Error::Serialization(_))
        ));
        assert!(matches!(
            TripRequestMessage::decode(br#"{"trip_id":"twelve"}"#),
            Err(Error::Serialization(_))
        ));
    }
}
