//! Free-text bulk import: one `<date><separator><date>` stay per line.
//!
//! Lines that do not yield two ISO dates are skipped without a report; only a
//! debug log records them. Range checks are left to the normalizer.

use stay_engine::{parse_iso_date, RawStay};
use tracing::debug;

pub const DEFAULT_SEPARATORS: &[&str] = &[" to ", "→", "–", " - ", ",", ";", "\t"];

/// Parse every importable line of `text`.
pub fn parse_text<S: AsRef<str>>(text: &str, separators: &[S]) -> Vec<RawStay> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let parsed = parse_line(line, separators);
            if parsed.is_none() {
                debug!(line = index + 1, text = line, "skipping unparsable import line");
            }
            parsed
        })
        .collect()
}

fn parse_line<S: AsRef<str>>(line: &str, separators: &[S]) -> Option<RawStay> {
    separators.iter().find_map(|sep| {
        let (entry, exit) = line.split_once(sep.as_ref())?;
        let (entry, exit) = (entry.trim(), exit.trim());
        parse_iso_date(entry).ok()?;
        parse_iso_date(exit).ok()?;
        Some(RawStay::new(entry, exit))
    })
}
