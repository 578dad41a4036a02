//! Forward simulation of the latest safe exit date.
//!
//! The used-day count is not monotonic as the reference date advances: old
//! stays age out while nothing new ages in. No closed form covers every history,
//! so the simulator steps one day at a time, at most [`ALLOWANCE_DAYS`] steps.

use chrono::NaiveDate;
use tracing::debug;

use crate::interval::add_days;
use crate::normalize::DisjointStays;
use crate::rule::ALLOWANCE_DAYS;
use crate::window::days_used_in_window;

/// Last date a stay starting on `entry` can end without the window reaching the
/// allowance.
///
/// Each candidate day is evaluated against the existing stays only. On the
/// first day whose window count reaches [`ALLOWANCE_DAYS`] the previous day is
/// returned. If the allowance is already used up on `entry` itself, that is
/// `entry - 1`, meaning there is no safe day at all. If no day in the walk
/// reaches the limit, the whole allowance is available and the result is
/// `entry + ALLOWANCE_DAYS - 1`.
pub fn latest_safe_exit(stays: &DisjointStays, entry: NaiveDate) -> NaiveDate {
    // A single continuous stay can never exceed the allowance, so the walk is
    // bounded by it.
    for offset in 0..ALLOWANCE_DAYS {
        let candidate = add_days(entry, offset);
        let used = days_used_in_window(stays, candidate);
        if used >= ALLOWANCE_DAYS {
            debug!(%entry, %candidate, used, "allowance reached during simulation");
            return add_days(candidate, -1);
        }
    }
    add_days(entry, ALLOWANCE_DAYS - 1)
}
