//! Trip planning and "already inside" status.
//!
//! Both entry points are pure: "today" is a parameter, never read from a clock.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::aging::{aging_out_schedule, AgingOutEvent};
use crate::interval::{parse_iso_date, Stay};
use crate::normalize::DisjointStays;
use crate::rule::{remaining_allowance, AGING_OUT_PREVIEW, ALLOWANCE_DAYS};
use crate::simulate::latest_safe_exit;
use crate::window::days_used_in_window;

/// Outcome of checking a proposed exit date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ProposalVerdict {
    /// Every day from entry to the proposed exit stays under the allowance.
    Compliant,
    /// The allowance is reached on `first_illegal`.
    Violation { first_illegal: NaiveDate },
    /// The proposed exit did not parse or lies before the entry. `value` is
    /// the caller's input, unchanged.
    Rejected { value: String },
}

impl ProposalVerdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProposalVerdict::Compliant)
    }

    /// The offending date (or raw input) when the proposal is not ok.
    pub fn first_illegal(&self) -> Option<String> {
        match self {
            ProposalVerdict::Compliant => None,
            ProposalVerdict::Violation { first_illegal } => Some(first_illegal.to_string()),
            ProposalVerdict::Rejected { value } => Some(value.clone()),
        }
    }
}

/// Result of [`plan_trip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanResult {
    pub used_on_entry: i64,
    pub remaining_on_entry: i64,
    pub latest_exit: NaiveDate,
    /// First [`AGING_OUT_PREVIEW`] events of the aging-out schedule.
    pub aging_out: Vec<AgingOutEvent>,
    /// Present only when a proposed exit was supplied.
    pub proposed: Option<ProposalVerdict>,
}

/// Result of [`already_inside`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsideResult {
    pub used_today: i64,
    pub days_left: i64,
    pub latest_exit: NaiveDate,
}

/// Evaluate a trip starting on `entry`, optionally ending on `proposed_exit`.
///
/// `proposed_exit` is taken as text because it is checked here: an unparsable
/// value or one before `entry` yields [`ProposalVerdict::Rejected`] carrying the
/// input verbatim rather than an error. A blank `proposed_exit` (an empty form
/// field) counts as not supplied.
#[tracing::instrument(level = "debug", skip(stays), fields(stays = stays.len()))]
pub fn plan_trip(
    stays: &DisjointStays,
    entry: NaiveDate,
    proposed_exit: Option<&str>,
) -> PlanResult {
    let used_on_entry = days_used_in_window(stays, entry);
    let latest_exit = latest_safe_exit(stays, entry);

    let mut aging_out = aging_out_schedule(stays, entry);
    aging_out.truncate(AGING_OUT_PREVIEW);

    let proposed = proposed_exit
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| check_proposed_exit(stays, entry, raw));
    debug!(used_on_entry, %latest_exit, ?proposed, "planned trip");

    PlanResult {
        used_on_entry,
        remaining_on_entry: remaining_allowance(used_on_entry),
        latest_exit,
        aging_out,
        proposed,
    }
}

/// Status for someone who entered on `actual_entry` and is still present.
///
/// `today` is the caller's wall-clock date.
pub fn already_inside(
    stays: &DisjointStays,
    actual_entry: NaiveDate,
    today: NaiveDate,
) -> InsideResult {
    let used_today = days_used_in_window(stays, today);
    InsideResult {
        used_today,
        days_left: remaining_allowance(used_today),
        latest_exit: latest_safe_exit(stays, actual_entry),
    }
}

fn check_proposed_exit(stays: &DisjointStays, entry: NaiveDate, raw: &str) -> ProposalVerdict {
    let exit = match parse_iso_date(raw) {
        Ok(exit) if exit >= entry => exit,
        _ => {
            return ProposalVerdict::Rejected {
                value: raw.to_string(),
            }
        }
    };

    let first_illegal = Stay { entry, exit }
        .iter_days()
        .find(|day| days_used_in_window(stays, *day) >= ALLOWANCE_DAYS);

    match first_illegal {
        Some(first_illegal) => ProposalVerdict::Violation { first_illegal },
        None => ProposalVerdict::Compliant,
    }
}
