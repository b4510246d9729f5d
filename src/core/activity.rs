//! Itinerary activity building blocks - activity kinds, entity references, and time slots.

use crate::entities::itinerary_activity;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::Serialize;

/// Kind of an itinerary activity, stored as its lowercase tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    /// Outbound or inbound flight
    Flight,
    /// Hotel check-in or return
    Hotel,
    /// Attraction visit or free placeholder event
    Attraction,
    /// Meal
    Restaurant,
}

impl ActivityKind {
    /// Tag stored in the `activity_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Hotel => "hotel",
            Self::Attraction => "attraction",
            Self::Restaurant => "restaurant",
        }
    }

    /// Parses a stored tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "flight" => Some(Self::Flight),
            "hotel" => Some(Self::Hotel),
            "attraction" => Some(Self::Attraction),
            "restaurant" => Some(Self::Restaurant),
            _ => None,
        }
    }
}

/// The single catalog entity an activity points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityRef {
    /// A flight id
    Flight(i64),
    /// A hotel id
    Hotel(i64),
    /// An attraction id
    Attraction(i64),
    /// A restaurant id
    Restaurant(i64),
    /// Placeholder event without a catalog entity
    None,
}

impl ActivityRef {
    /// Activity kind implied by the reference. Placeholder events are attractions.
    #[must_use]
    pub const fn kind(self) -> ActivityKind {
        match self {
            Self::Flight(_) => ActivityKind::Flight,
            Self::Hotel(_) => ActivityKind::Hotel,
            Self::Attraction(_) | Self::None => ActivityKind::Attraction,
            Self::Restaurant(_) => ActivityKind::Restaurant,
        }
    }

    /// Splits the reference into the `(flight, hotel, attraction, restaurant)` columns.
    #[must_use]
    pub const fn columns(self) -> (Option<i64>, Option<i64>, Option<i64>, Option<i64>) {
        match self {
            Self::Flight(id) => (Some(id), None, None, None),
            Self::Hotel(id) => (None, Some(id), None, None),
            Self::Attraction(id) => (None, None, Some(id), None),
            Self::Restaurant(id) => (None, None, None, Some(id)),
            Self::None => (None, None, None, None),
        }
    }

    /// Rebuilds the reference from a stored row, reading only the column its type selects.
    #[must_use]
    pub fn from_model(model: &itinerary_activity::Model) -> Self {
        let id = match ActivityKind::from_tag(&model.activity_type) {
            Some(ActivityKind::Flight) => model.flight_id.map(Self::Flight),
            Some(ActivityKind::Hotel) => model.hotel_id.map(Self::Hotel),
            Some(ActivityKind::Attraction) => model.attraction_id.map(Self::Attraction),
            Some(ActivityKind::Restaurant) => model.restaurant_id.map(Self::Restaurant),
            None => None,
        };
        id.unwrap_or(Self::None)
    }
}

/// A fixed time window within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    /// Slot start
    pub start: NaiveTime,
    /// Slot length
    pub duration: TimeDelta,
}

const fn slot(hour: u32, minute: u32, duration_minutes: i64) -> (u32, u32, i64) {
    (hour, minute, duration_minutes)
}

/// Start time and length per order number; anything past the table uses [`LATE_SLOT`].
const SLOT_TABLE: [(u32, u32, i64); 5] = [
    slot(9, 0, 120),
    slot(11, 30, 90),
    slot(14, 0, 60),
    slot(16, 0, 120),
    slot(19, 0, 120),
];

const LATE_SLOT: (u32, u32, i64) = slot(21, 0, 60);

impl TimeSlot {
    /// Looks up the slot for an order number.
    #[must_use]
    pub fn for_order(order: i32) -> Self {
        let (hour, minute, minutes) = usize::try_from(order)
            .ok()
            .and_then(|i| SLOT_TABLE.get(i).copied())
            .unwrap_or(LATE_SLOT);

        Self {
            start: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN),
            duration: TimeDelta::minutes(minutes),
        }
    }

    /// Start and end of the slot on `date`.
    #[must_use]
    pub fn on(self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        let start = date.and_time(self.start);
        (start, start + self.duration)
    }
}

/// Note attached to flight activities.
pub const FLIGHT_NOTE: &str = "Please arrive at the airport 3 hours before departure.";
/// Note attached to hotel activities.
pub const HOTEL_NOTE: &str = "Accommodation check-in/stay.";
/// Note attached to restaurant activities.
pub const RESTAURANT_NOTE: &str = "Enjoy your meal. Local alternatives are available if busy.";
/// Note for the free event on the arrival day.
pub const ARRIVAL_EVENT_NOTE: &str =
    "Welcome. Enjoy a relaxing walk in a nearby park after your flight.";
/// Note for the free event on the departure day.
pub const DEPARTURE_EVENT_NOTE: &str =
    "Last day. Perfect time for souvenir shopping and a final city stroll.";

/// Fallback suggestion for an attraction whose nearest alternative is `alternative`.
#[must_use]
pub fn fallback_note(alternative: &str) -> String {
    format!("If this place is closed, the best nearby alternative is {alternative}.")
}
