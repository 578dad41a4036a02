//! # stay-engine
//!
//! Compliance engine for the rolling-window day-count rule: at most 90 days
//! inside any trailing 180-day window.
//!
//! Every function is pure. Stays come in as values, results go out as new
//! values, and the reference dates (including "today") are always passed in.
//!
//! ## Quick start
//!
//! ```rust
//! use stay_engine::{days_used_in_window, normalize_stays, RawStay};
//!
//! let normalized = normalize_stays(&[
//!     RawStay::new("2024-01-01", "2024-01-05"),
//!     RawStay::new("2024-01-03", "2024-01-10"),
//! ]);
//! assert_eq!(normalized.stays.len(), 1);
//!
//! let reference = "2024-01-15".parse().unwrap();
//! assert_eq!(days_used_in_window(&normalized.stays, reference), 10);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `Stay`, inclusive day counts, adjacency, ISO date parsing
//! - [`normalize`] — validate and merge raw stays into a disjoint set
//! - [`window`] — days used inside the trailing window
//! - [`simulate`] — latest safe exit by forward simulation
//! - [`aging`] — when consumed days age out of the window
//! - [`planner`] — plan a trip / report status when already inside
//! - [`status`] — combined form status, counting the planned trip itself
//! - [`area`] — which countries the rule applies to
//! - [`rule`] — the 90/180 constants
//! - [`error`] — Error types

pub mod aging;
pub mod area;
pub mod error;
pub mod interval;
pub mod normalize;
pub mod planner;
pub mod rule;
pub mod simulate;
pub mod status;
pub mod window;

pub use aging::{aging_out_schedule, AgingOutEvent};
pub use area::is_member_country;
pub use error::StayError;
pub use interval::{
    are_adjacent_or_overlapping, inclusive_day_count, parse_iso_date, RawStay, Stay,
};
pub use normalize::{normalize_parsed, normalize_stays, DisjointStays, NormalizeResult};
pub use planner::{already_inside, plan_trip, InsideResult, PlanResult, ProposalVerdict};
pub use rule::{ALLOWANCE_DAYS, WINDOW_DAYS};
pub use simulate::latest_safe_exit;
pub use status::{trip_status, TripStatus};
pub use window::{days_used_in_window, RollingWindow};
