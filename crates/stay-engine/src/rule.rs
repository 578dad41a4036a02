//! Rule constants for the 90/180 rolling-window allowance.

/// Maximum days permitted inside any trailing window.
pub const ALLOWANCE_DAYS: i64 = 90;

/// Length of the trailing window, reference date included.
pub const WINDOW_DAYS: i64 = 180;

/// How many aging-out events the trip planner reports.
pub const AGING_OUT_PREVIEW: usize = 10;

/// Days still available given a used-day count. Never negative.
pub fn remaining_allowance(used: i64) -> i64 {
    (ALLOWANCE_DAYS - used).max(0)
}
