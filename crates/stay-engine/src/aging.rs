//! Schedule of dates on which consumed days leave the rolling window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::interval::add_days;
use crate::normalize::DisjointStays;
use crate::rule::WINDOW_DAYS;

/// Days regained on a given date as earlier stay days age out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgingOutEvent {
    pub drop_date: NaiveDate,
    pub days_regained: i64,
}

/// Every future drop date for the days in `stays`, ascending.
///
/// A day `d` stops counting against any window from `d + 180` on. Days sharing
/// a drop date are aggregated into one event. The cost is proportional to the
/// total number of stay days, so callers wanting a preview should truncate the
/// result rather than pass a shorter history.
#[tracing::instrument(level = "debug", skip(stays), fields(stays = stays.len()))]
pub fn aging_out_schedule(stays: &DisjointStays, reference: NaiveDate) -> Vec<AgingOutEvent> {
    let mut drops: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for stay in stays {
        for day in stay.iter_days() {
            *drops.entry(add_days(day, WINDOW_DAYS)).or_insert(0) += 1;
        }
    }

    drops
        .into_iter()
        .map(|(drop_date, days_regained)| AgingOutEvent {
            drop_date,
            days_regained,
        })
        .collect()
}
