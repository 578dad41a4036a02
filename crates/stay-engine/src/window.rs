//! Rolling-window day accounting.
//!
//! The window for a reference date `r` is `[r - 179, r]`. It is derived on every
//! query and never cached, since each call brings its own reference date.

use chrono::NaiveDate;
use serde::Serialize;

use crate::interval::{add_days, inclusive_day_count, Stay};
use crate::normalize::DisjointStays;
use crate::rule::WINDOW_DAYS;

/// The trailing window ending on (and including) a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl RollingWindow {
    pub fn ending_on(reference: NaiveDate) -> Self {
        Self {
            start: add_days(reference, -(WINDOW_DAYS - 1)),
            end: reference,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The part of `stay` inside the window, if any.
    pub fn clip(&self, stay: &Stay) -> Option<Stay> {
        let start = stay.entry.max(self.start);
        let end = stay.exit.min(self.end);
        (start <= end).then_some(Stay {
            entry: start,
            exit: end,
        })
    }
}

/// Days of `stays` that fall inside the window ending on `reference`.
///
/// Sums the clipped length of each stay. The set is disjoint, so no day can be
/// counted twice and no per-day bookkeeping is needed.
pub fn days_used_in_window(stays: &DisjointStays, reference: NaiveDate) -> i64 {
    let window = RollingWindow::ending_on(reference);
    stays
        .iter()
        .filter_map(|stay| window.clip(stay))
        .map(|clipped| inclusive_day_count(clipped.entry, clipped.exit))
        .sum()
}
