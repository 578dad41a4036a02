//! Combined status report for a planning form.
//!
//! Answers, in one call, how many days are left today and whether a planned
//! trip fits. Unlike [`plan_trip`](crate::plan_trip), a planned exit here counts
//! the planned trip itself: it is merged into the history before the window at
//! the exit date is evaluated.

use chrono::NaiveDate;
use serde::Serialize;

use crate::interval::Stay;
use crate::normalize::DisjointStays;
use crate::rule::{remaining_allowance, ALLOWANCE_DAYS};
use crate::simulate::latest_safe_exit;
use crate::window::days_used_in_window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripStatus {
    /// Days still available in the window ending today.
    pub days_left: i64,
    pub trip_valid: bool,
    pub days_used_on_entry: i64,
    pub days_remaining_on_entry: i64,
    pub latest_safe_exit: NaiveDate,
    /// Set when an entry is planned without an exit: the latest safe exit.
    pub required_exit_date: Option<NaiveDate>,
    /// Set when both entry and exit are planned and in order.
    pub days_remaining_after_trip: Option<i64>,
}

/// Build a [`TripStatus`] for the form state.
///
/// Without `planned_entry` the trip is not valid and the entry figures describe
/// a clean slate anchored on `today`. A `planned_exit` before `planned_entry`
/// makes the trip invalid.
pub fn trip_status(
    stays: &DisjointStays,
    today: NaiveDate,
    planned_entry: Option<NaiveDate>,
    planned_exit: Option<NaiveDate>,
) -> TripStatus {
    let days_left = remaining_allowance(days_used_in_window(stays, today));

    let Some(entry) = planned_entry else {
        return TripStatus {
            days_left,
            trip_valid: false,
            days_used_on_entry: 0,
            days_remaining_on_entry: ALLOWANCE_DAYS,
            latest_safe_exit: today,
            required_exit_date: None,
            days_remaining_after_trip: None,
        };
    };

    let days_used_on_entry = days_used_in_window(stays, entry);
    let latest = latest_safe_exit(stays, entry);

    let (trip_valid, required_exit_date, days_remaining_after_trip) = match planned_exit {
        None => (true, Some(latest), None),
        Some(exit) => match Stay::new(entry, exit) {
            Ok(trip) => {
                let used_on_exit = days_used_in_window(&stays.with_stay(trip), exit);
                (
                    used_on_exit <= ALLOWANCE_DAYS,
                    None,
                    Some(remaining_allowance(used_on_exit)),
                )
            }
            Err(_) => (false, None, None),
        },
    };

    TripStatus {
        days_left,
        trip_valid,
        days_used_on_entry,
        days_remaining_on_entry: remaining_allowance(days_used_on_entry),
        latest_safe_exit: latest,
        required_exit_date,
        days_remaining_after_trip,
    }
}
