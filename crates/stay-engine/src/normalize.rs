//! Validate raw stays and merge them into a disjoint, sorted set.
//!
//! Malformed records are dropped with a diagnostic instead of failing the whole
//! batch, so a history with one typo still yields a usable result for the rest.

use serde::Serialize;
use tracing::{debug, warn};

use crate::interval::{are_adjacent_or_overlapping, RawStay, Stay};

/// Stays sorted by entry date with no two overlapping or adjacent.
///
/// Only the normalizer builds this type, so every function taking a
/// `&DisjointStays` can rely on the ordering and disjointness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DisjointStays(Vec<Stay>);

/// Output of [`normalize_stays`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeResult {
    pub stays: DisjointStays,
    /// One message per dropped record, in input order.
    pub diagnostics: Vec<String>,
}

impl DisjointStays {
    pub fn as_slice(&self) -> &[Stay] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stay> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of inclusive day counts. Exact, since no two stays share a day.
    pub fn total_days(&self) -> i64 {
        self.0.iter().map(Stay::days).sum()
    }

    pub fn to_raw(&self) -> Vec<RawStay> {
        self.0.iter().map(Stay::to_raw).collect()
    }

    /// A copy of this set with `extra` merged in.
    pub fn with_stay(&self, extra: Stay) -> DisjointStays {
        let mut stays = self.0.clone();
        stays.push(extra);
        merge_sorted(sorted(stays))
    }
}

impl<'a> IntoIterator for &'a DisjointStays {
    type Item = &'a Stay;
    type IntoIter = std::slice::Iter<'a, Stay>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse, validate, sort and merge raw stay records.
///
/// Records with an unparsable date or an exit before the entry are dropped and
/// reported in `diagnostics`. Survivors are merged whenever the next stay starts
/// no later than the day after the current one ends.
pub fn normalize_stays(input: &[RawStay]) -> NormalizeResult {
    let mut valid = Vec::with_capacity(input.len());
    let mut diagnostics = Vec::new();

    for raw in input {
        match Stay::parse(&raw.entry, &raw.exit) {
            Ok(stay) => valid.push(stay),
            Err(err) => {
                warn!(entry = %raw.entry, exit = %raw.exit, "dropping stay: {err}");
                diagnostics.push(err.to_string());
            }
        }
    }

    let stays = merge_sorted(sorted(valid));
    debug!(
        input = input.len(),
        merged = stays.len(),
        dropped = diagnostics.len(),
        "normalized stays"
    );

    NormalizeResult { stays, diagnostics }
}

/// Same as [`normalize_stays`] for stays that are already typed.
///
/// `Stay` fields are public, so the `entry <= exit` check still runs here.
pub fn normalize_parsed(input: &[Stay]) -> NormalizeResult {
    let mut valid = Vec::with_capacity(input.len());
    let mut diagnostics = Vec::new();

    for stay in input {
        match Stay::new(stay.entry, stay.exit) {
            Ok(stay) => valid.push(stay),
            Err(err) => {
                warn!(entry = %stay.entry, exit = %stay.exit, "dropping stay: {err}");
                diagnostics.push(err.to_string());
            }
        }
    }

    NormalizeResult {
        stays: merge_sorted(sorted(valid)),
        diagnostics,
    }
}

// Stable: equal entries keep their input order.
fn sorted(mut stays: Vec<Stay>) -> Vec<Stay> {
    stays.sort_by_key(|stay| stay.entry);
    stays
}

fn merge_sorted(stays: Vec<Stay>) -> DisjointStays {
    let mut merged: Vec<Stay> = Vec::with_capacity(stays.len());
    for stay in stays {
        if let Some(current) = merged.last_mut() {
            if are_adjacent_or_overlapping(current, &stay) {
                current.exit = current.exit.max(stay.exit);
                continue;
            }
        }
        merged.push(stay);
    }
    DisjointStays(merged)
}
