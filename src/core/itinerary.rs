//! Activity assignment - Fills itinerary days with flights, hotel stays, attractions, and meals.
//!
//! The first day is arrival (outbound flight, check-in, a free event), the last day is
//! departure (a free event, inbound flight), and every day in between gets up to two
//! attractions and the restaurant nearest to the first one, followed by the return to the
//! hotel. Attractions are taken greedily in ranking order and never repeat within a trip.
//! A middle day that cannot fit any attraction stays empty.

use crate::{
    core::{
        activity::{
            ARRIVAL_EVENT_NOTE, ActivityRef, DEPARTURE_EVENT_NOTE, FLIGHT_NOTE, HOTEL_NOTE,
            RESTAURANT_NOTE, fallback_note,
        },
        geo::GeoPoint,
        tier::Tier,
    },
    entities::{attraction, itinerary_day, restaurant},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The logistics a traveler picked from the generated options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsSelection {
    /// Chosen tier, which also ranks attractions and restaurants
    pub tier: Tier,
    /// Hotel for the whole stay
    pub hotel_id: i64,
    /// Home city to destination
    pub outbound_flight_id: i64,
    /// Destination back home
    pub inbound_flight_id: i64,
}

/// One activity to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedActivity {
    /// What the activity points at
    pub entity: ActivityRef,
    /// Slot index within the day
    pub order: i32,
    /// Notes shown to the traveler
    pub notes: String,
}

/// Activities planned for one itinerary day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    /// Itinerary day id
    pub day_id: i64,
    /// Calendar date of the day
    pub date: NaiveDate,
    /// Activities in slot order
    pub activities: Vec<PlannedActivity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayRole {
    Arrival,
    Departure,
    Sightseeing,
}

impl DayRole {
    const fn of(day_number: usize, total_days: usize) -> Self {
        if day_number == 1 {
            Self::Arrival
        } else if day_number == total_days {
            Self::Departure
        } else {
            Self::Sightseeing
        }
    }
}

fn point_of(a: &attraction::Model) -> GeoPoint {
    GeoPoint::new(a.latitude, a.longitude)
}

/// Name of the attraction closest to `target`, excluding `target` itself.
fn nearest_alternative<'a>(
    target: &attraction::Model,
    attractions: &'a [attraction::Model],
) -> Option<&'a attraction::Model> {
    let origin = point_of(target);
    attractions
        .iter()
        .filter(|a| a.id != target.id)
        .min_by(|a, b| {
            origin
                .distance_km(point_of(a))
                .total_cmp(&origin.distance_km(point_of(b)))
        })
}

/// Restaurant closest to `near`.
fn nearest_restaurant<'a>(
    near: GeoPoint,
    restaurants: &'a [restaurant::Model],
) -> Option<&'a restaurant::Model> {
    let distance = |r: &restaurant::Model| near.distance_km(GeoPoint::new(r.latitude, r.longitude));
    restaurants
        .iter()
        .min_by(|a, b| distance(a).total_cmp(&distance(b)))
}

fn attraction_activity(
    chosen: &attraction::Model,
    attractions: &[attraction::Model],
    order: i32,
) -> PlannedActivity {
    let notes = nearest_alternative(chosen, attractions)
        .map(|alt| fallback_note(&alt.name))
        .unwrap_or_default();

    PlannedActivity {
        entity: ActivityRef::Attraction(chosen.id),
        order,
        notes,
    }
}

fn fixed_activity(entity: ActivityRef, order: i32, notes: &str) -> PlannedActivity {
    PlannedActivity {
        entity,
        order,
        notes: notes.to_string(),
    }
}

/// Builds the activities of every day.
///
/// `days` must be ordered by day number. `attractions` must already be ranked for the tier
/// and capped at `daily_attraction_limit`; the cap is still checked here so a day's two
/// attractions together never exceed it.
#[must_use]
pub fn plan_day_activities(
    days: &[itinerary_day::Model],
    selection: &LogisticsSelection,
    attractions: &[attraction::Model],
    restaurants: &[restaurant::Model],
    daily_attraction_limit: f64,
) -> Vec<DayPlan> {
    let total_days = days.len();
    let mut used_attractions: HashSet<i64> = HashSet::new();
    let mut plans = Vec::with_capacity(total_days);

    for (index, day) in days.iter().enumerate() {
        let mut activities = Vec::new();

        match DayRole::of(index + 1, total_days) {
            DayRole::Arrival => {
                activities.push(fixed_activity(
                    ActivityRef::Flight(selection.outbound_flight_id),
                    0,
                    FLIGHT_NOTE,
                ));
                activities.push(fixed_activity(
                    ActivityRef::Hotel(selection.hotel_id),
                    1,
                    HOTEL_NOTE,
                ));
                activities.push(fixed_activity(ActivityRef::None, 2, ARRIVAL_EVENT_NOTE));
            }
            DayRole::Departure => {
                activities.push(fixed_activity(ActivityRef::None, 1, DEPARTURE_EVENT_NOTE));
                activities.push(fixed_activity(
                    ActivityRef::Flight(selection.inbound_flight_id),
                    2,
                    FLIGHT_NOTE,
                ));
            }
            DayRole::Sightseeing => {
                let first = attractions.iter().find(|a| {
                    !used_attractions.contains(&a.id) && a.entry_fee <= daily_attraction_limit
                });

                if let Some(first) = first {
                    used_attractions.insert(first.id);
                    activities.push(attraction_activity(first, attractions, 1));

                    if let Some(meal) = nearest_restaurant(point_of(first), restaurants) {
                        activities.push(fixed_activity(
                            ActivityRef::Restaurant(meal.id),
                            2,
                            RESTAURANT_NOTE,
                        ));
                    }

                    let remaining = daily_attraction_limit - first.entry_fee;
                    let second = attractions
                        .iter()
                        .find(|a| !used_attractions.contains(&a.id) && a.entry_fee <= remaining);
                    if let Some(second) = second {
                        used_attractions.insert(second.id);
                        activities.push(attraction_activity(second, attractions, 3));
                    }

                    activities.push(fixed_activity(
                        ActivityRef::Hotel(selection.hotel_id),
                        4,
                        HOTEL_NOTE,
                    ));
                }
            }
        }

        plans.push(DayPlan {
            day_id: day.id,
            date: day.date,
            activities,
        });
    }

    plans
}
