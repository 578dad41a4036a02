//! Tests for the combined trip status report.

use chrono::NaiveDate;
use stay_engine::{normalize_stays, trip_status, DisjointStays, RawStay};

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
fn no_planned_entry_reports_clean_slate() {
    let status = trip_status(&DisjointStays::default(), d("2024-05-01"), None, None);

    assert_eq!(status.days_left, 90);
    assert!(!status.trip_valid);
    assert_eq!(status.days_used_on_entry, 0);
    assert_eq!(status.days_remaining_on_entry, 90);
    assert_eq!(status.latest_safe_exit, d("2024-05-01"));
    assert_eq!(status.required_exit_date, None);
}

#[test]
fn planned_entry_without_exit_requires_latest_safe_exit() {
    let status = trip_status(
        &DisjointStays::default(),
        d("2024-05-01"),
        Some(d("2024-06-01")),
        None,
    );

    assert!(status.trip_valid);
    assert_eq!(status.days_used_on_entry, 0);
    assert_eq!(status.days_remaining_on_entry, 90);
    assert_eq!(status.required_exit_date, Some(status.latest_safe_exit));
    assert_eq!(status.days_remaining_after_trip, None);
}

#[test]
fn history_older_than_window_is_ignored() {
    let stays = set(&[("2023-01-01", "2023-01-10")]);
    let status = trip_status(&stays, d("2024-05-01"), Some(d("2024-06-01")), None);

    assert_eq!(status.days_used_on_entry, 0);
    assert_eq!(status.days_remaining_on_entry, 90);
}

#[test]
fn planned_trip_counts_towards_its_own_exit() {
    let stays = set(&[("2024-01-01", "2024-01-30")]);
    let status = trip_status(
        &stays,
        d("2024-05-01"),
        Some(d("2024-06-01")),
        Some(d("2024-06-30")),
    );

    // Window ending 2024-06-30 starts 2024-01-03: 28 old days + 30 planned.
    assert!(status.trip_valid);
    assert_eq!(status.days_remaining_after_trip, Some(32));
    assert_eq!(status.required_exit_date, None);
}

#[test]
fn planned_trip_over_the_limit_is_invalid() {
    let stays = set(&[("2024-03-01", "2024-03-29")]);
    let status = trip_status(
        &stays,
        d("2024-03-30"),
        Some(d("2024-04-01")),
        Some(d("2024-06-04")),
    );

    // 29 + 65 = 94 days in the window ending on the planned exit.
    assert!(!status.trip_valid);
    assert_eq!(status.days_remaining_after_trip, Some(0));
}

#[test]
fn planned_exit_before_entry_is_invalid() {
    let status = trip_status(
        &DisjointStays::default(),
        d("2024-03-30"),
        Some(d("2024-04-10")),
        Some(d("2024-04-01")),
    );

    assert!(!status.trip_valid);
    assert_eq!(status.days_remaining_after_trip, None);
}

#[test]
fn single_day_history_uses_one_day() {
    let stays = set(&[("2024-01-01", "2024-01-01")]);
    let status = trip_status(&stays, d("2024-01-02"), Some(d("2024-01-15")), None);

    assert_eq!(status.days_used_on_entry, 1);
    assert_eq!(status.days_remaining_on_entry, 89);
    assert_eq!(status.days_left, 89);
}
