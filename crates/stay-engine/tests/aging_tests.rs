//! Tests for the aging-out schedule.

use chrono::NaiveDate;
use stay_engine::{aging_out_schedule, normalize_stays, AgingOutEvent, DisjointStays, RawStay};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn set(ranges: &[(&str, &str)]) -> DisjointStays {
    let raw: Vec<RawStay> = ranges.iter().map(|(a, b)| RawStay::new(*a, *b)).collect();
    normalize_stays(&raw).stays
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[test]
fn single_day_drops_out_180_days_later() {
    let schedule = aging_out_schedule(&set(&[("2024-01-01", "2024-01-01")]), d("2024-01-15"));

    assert_eq!(
        schedule,
        vec![AgingOutEvent {
            drop_date: d("2024-06-29"),
            days_regained: 1,
        }]
    );
}

#[test]
fn empty_set_has_no_events() {
    assert!(aging_out_schedule(&DisjointStays::default(), d("2024-01-15")).is_empty());
}

#[test]
fn events_are_ascending_and_cover_every_day() {
    let stays = set(&[("2024-03-01", "2024-03-03"), ("2024-01-10", "2024-01-11")]);
    let schedule = aging_out_schedule(&stays, d("2024-04-01"));

    let dates: Vec<String> = schedule.iter().map(|e| e.drop_date.to_string()).collect();
    assert_eq!(
        dates,
        vec!["2024-07-08", "2024-07-09", "2024-08-28", "2024-08-29", "2024-08-30"]
    );
}

#[test]
fn regained_days_sum_to_total_stay_days() {
    let stays = set(&[
        ("2023-11-15", "2023-12-31"),
        ("2024-02-01", "2024-02-29"),
        ("2024-04-10", "2024-04-10"),
    ]);
    let schedule = aging_out_schedule(&stays, d("2024-05-01"));

    let regained: i64 = schedule.iter().map(|e| e.days_regained).sum();
    assert_eq!(regained, stays.total_days());
    assert_eq!(regained, 47 + 29 + 1);
}

#[test]
fn schedule_does_not_depend_on_reference_date() {
    let stays = set(&[("2024-01-01", "2024-01-20")]);
    assert_eq!(
        aging_out_schedule(&stays, d("2024-01-01")),
        aging_out_schedule(&stays, d("2030-01-01"))
    );
}
