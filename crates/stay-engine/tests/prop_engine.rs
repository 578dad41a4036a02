//! Property-based tests for the engine using proptest.
//!
//! These check invariants that must hold for *any* stay history, not just the
//! hand-picked cases in the other test files.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stay_engine::{
    aging_out_schedule, days_used_in_window, latest_safe_exit, normalize_stays, plan_trip,
    ProposalVerdict, RawStay, ALLOWANCE_DAYS, WINDOW_DAYS,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    base() + Duration::days(offset)
}

/// Up to eight stays of up to 60 days, starting within roughly a year.
fn arb_stays() -> impl Strategy<Value = Vec<RawStay>> {
    prop::collection::vec((0i64..400, 0i64..60), 0..8).prop_map(|ranges| {
        ranges
            .into_iter()
            .map(|(start, len)| {
                RawStay::new(day(start).to_string(), day(start + len).to_string())
            })
            .collect()
    })
}

fn arb_reference() -> impl Strategy<Value = NaiveDate> {
    (-30i64..700).prop_map(day)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

/// Day-by-day reference count, used only to cross-check the interval sum.
fn used_by_membership(raw: &[RawStay], reference: NaiveDate) -> i64 {
    let window_start = reference - Duration::days(WINDOW_DAYS - 1);
    let mut days = HashSet::new();
    for stay in raw {
        let entry: NaiveDate = stay.entry.parse().unwrap();
        let exit: NaiveDate = stay.exit.parse().unwrap();
        let mut current = entry;
        while current <= exit {
            if current >= window_start && current <= reference {
                days.insert(current);
            }
            current += Duration::days(1);
        }
    }
    days.len() as i64
}

// ---------------------------------------------------------------------------
// Property 1: Normalization is idempotent
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn normalization_is_idempotent(raw in arb_stays()) {
        let once = normalize_stays(&raw).stays;
        let twice = normalize_stays(&once.to_raw()).stays;
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Output is sorted with a gap of at least one day between stays
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn output_is_disjoint_and_non_adjacent(raw in arb_stays()) {
        let stays = normalize_stays(&raw).stays;
        for pair in stays.as_slice().windows(2) {
            prop_assert!(
                pair[1].entry > pair[0].exit + Duration::days(1),
                "stays touch or overlap: {:?} / {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Interval sum matches per-day membership count
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn window_sum_matches_membership_count(raw in arb_stays(), reference in arb_reference()) {
        let stays = normalize_stays(&raw).stays;
        let used = days_used_in_window(&stays, reference);

        prop_assert_eq!(used, used_by_membership(&raw, reference));
        prop_assert!(used <= WINDOW_DAYS);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Aging-out totals equal total stay days
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn aging_out_totals_match(raw in arb_stays(), reference in arb_reference()) {
        let stays = normalize_stays(&raw).stays;
        let schedule = aging_out_schedule(&stays, reference);

        let regained: i64 = schedule.iter().map(|e| e.days_regained).sum();
        prop_assert_eq!(regained, stays.total_days());
        for pair in schedule.windows(2) {
            prop_assert!(pair[0].drop_date < pair[1].drop_date);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Latest safe exit is safe and maximal
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn latest_safe_exit_is_safe_and_maximal(raw in arb_stays(), entry in arb_reference()) {
        let stays = normalize_stays(&raw).stays;
        let exit = latest_safe_exit(&stays, entry);

        if days_used_in_window(&stays, entry) >= ALLOWANCE_DAYS {
            prop_assert_eq!(exit, entry - Duration::days(1));
            return Ok(());
        }

        prop_assert!(exit >= entry);
        prop_assert!((exit - entry).num_days() < ALLOWANCE_DAYS);

        let mut current = entry;
        while current <= exit {
            prop_assert!(days_used_in_window(&stays, current) < ALLOWANCE_DAYS);
            current += Duration::days(1);
        }

        if (exit - entry).num_days() < ALLOWANCE_DAYS - 1 {
            let next = exit + Duration::days(1);
            prop_assert!(days_used_in_window(&stays, next) >= ALLOWANCE_DAYS);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: A proposed exit up to the latest safe exit is compliant
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn proposal_up_to_latest_exit_is_compliant(raw in arb_stays(), entry in arb_reference()) {
        let stays = normalize_stays(&raw).stays;
        let latest = latest_safe_exit(&stays, entry);
        prop_assume!(latest >= entry);

        let plan = plan_trip(&stays, entry, Some(&latest.to_string()));
        prop_assert_eq!(plan.proposed, Some(ProposalVerdict::Compliant));
        prop_assert_eq!(plan.latest_exit, latest);
    }
}
