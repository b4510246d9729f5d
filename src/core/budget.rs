//! Budget allocation - Splits a trip budget into logistics, activities, and buffer.
//!
//! The split is fixed: half of the budget goes to logistics (flights and hotel), 30% to
//! activities, and the remaining 20% is kept as a buffer. Each flight leg may use 30% of
//! the logistics budget. The nightly hotel ceiling depends on what the flights actually
//! cost, so it is computed per tier after flight selection.

use crate::errors::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Share of the total budget reserved for flights and hotel.
pub const LOGISTICS_SHARE: f64 = 0.50;
/// Share of the total budget reserved for attractions and meals.
pub const ACTIVITIES_SHARE: f64 = 0.30;
/// Share of the total budget kept as slack.
pub const BUFFER_SHARE: f64 = 0.20;
/// Share of the logistics budget available to both flight legs together.
pub const FLIGHTS_SHARE_OF_LOGISTICS: f64 = 0.60;

/// Fixed allocation of a trip budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetAllocation {
    /// Total trip budget
    pub total: f64,
    /// Nights of hotel stay
    pub nights: u32,
    /// Nominal budget for flights and hotel
    pub logistics: f64,
    /// Budget for attractions and meals
    pub activities: f64,
    /// Unallocated slack
    pub buffer: f64,
    /// Price cap for a single flight leg
    pub one_way_flight: f64,
}

impl BudgetAllocation {
    /// Allocates `total` for a stay of `nights` nights.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the budget is not a positive finite number or the
    /// stay is shorter than one night.
    pub fn new(total: f64, nights: i64) -> Result<Self> {
        validate_budget(total)?;
        let nights = u32::try_from(nights)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| Error::validation("trip must be at least 1 night"))?;

        let logistics = total * LOGISTICS_SHARE;
        Ok(Self {
            total,
            nights,
            logistics,
            activities: total * ACTIVITIES_SHARE,
            buffer: total * BUFFER_SHARE,
            one_way_flight: logistics * FLIGHTS_SHARE_OF_LOGISTICS / 2.0,
        })
    }

    /// Allocates `total` for a trip running from `start` to `end`.
    pub fn for_dates(total: f64, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(total, stay_nights(start, end))
    }

    /// Highest nightly hotel rate that still fits once `flight_cost` has been paid, or
    /// `None` when nothing is left for the hotel.
    #[must_use]
    pub fn hotel_nightly_ceiling(&self, flight_cost: f64) -> Option<f64> {
        let per_night = (self.logistics - flight_cost) / f64::from(self.nights);
        (per_night > 0.0).then_some(per_night)
    }

    /// Budget for attractions on one day of a trip lasting `days` calendar days.
    #[must_use]
    pub fn daily_attraction_limit(&self, days: usize) -> f64 {
        daily_attraction_limit(self.activities, days)
    }
}

/// Share of a day's activities budget that attractions may use.
pub const DAILY_ATTRACTION_SHARE: f64 = 0.70;

/// Splits an activities budget evenly over `days` and keeps the attraction share.
#[must_use]
pub fn daily_attraction_limit(activities_budget: f64, days: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let days = days.max(1) as f64;
    activities_budget / days * DAILY_ATTRACTION_SHARE
}

/// Whole nights between two calendar dates. Negative when `end` is before `start`.
#[must_use]
pub fn stay_nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Checks that a budget amount is a positive finite number.
pub fn validate_budget(total: f64) -> Result<()> {
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::validation(format!(
            "budget must be a positive amount, got {total}"
        )));
    }
    Ok(())
}
