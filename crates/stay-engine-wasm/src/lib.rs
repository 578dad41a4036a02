//! WASM bindings for stay-engine.
//!
//! Exposes normalization, window accounting, exit simulation, the aging-out
//! schedule and trip planning to JavaScript via `wasm-bindgen`. Stay lists and
//! results cross the boundary as JSON strings; single dates as `YYYY-MM-DD`
//! strings. Output keys are camelCase to match the front end's types.
//!
//! Every export takes the raw stay list and normalizes it first, so the caller
//! never has to hold a disjoint set itself.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p stay-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/stay_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use stay_engine::{
    AgingOutEvent, DisjointStays, InsideResult, PlanResult, ProposalVerdict, RawStay, TripStatus,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct NormalizeDto {
    stays: Vec<RawStay>,
    diagnostics: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgingOutEventDto {
    drop_date: String,
    days_regained: i64,
}

impl From<&AgingOutEvent> for AgingOutEventDto {
    fn from(e: &AgingOutEvent) -> Self {
        Self {
            drop_date: e.drop_date.to_string(),
            days_regained: e.days_regained,
        }
    }
}

/// Aging-out preview entry as shown in the planner.
#[derive(Serialize)]
struct AgingPreviewDto {
    date: String,
    days: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposedDto {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_illegal: Option<String>,
}

impl From<&ProposalVerdict> for ProposedDto {
    fn from(v: &ProposalVerdict) -> Self {
        Self {
            ok: v.is_ok(),
            first_illegal: v.first_illegal(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanResultDto {
    used_on_entry: i64,
    remaining_on_entry: i64,
    latest_exit: String,
    aging_out: Vec<AgingPreviewDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    proposed: Option<ProposedDto>,
}

impl From<&PlanResult> for PlanResultDto {
    fn from(p: &PlanResult) -> Self {
        Self {
            used_on_entry: p.used_on_entry,
            remaining_on_entry: p.remaining_on_entry,
            latest_exit: p.latest_exit.to_string(),
            aging_out: p
                .aging_out
                .iter()
                .map(|e| AgingPreviewDto {
                    date: e.drop_date.to_string(),
                    days: e.days_regained,
                })
                .collect(),
            proposed: p.proposed.as_ref().map(ProposedDto::from),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsideResultDto {
    used_today: i64,
    days_left: i64,
    latest_exit: String,
}

impl From<&InsideResult> for InsideResultDto {
    fn from(r: &InsideResult) -> Self {
        Self {
            used_today: r.used_today,
            days_left: r.days_left,
            latest_exit: r.latest_exit.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TripStatusDto {
    days_left: i64,
    trip_valid: bool,
    days_used_on_entry: i64,
    days_remaining_on_entry: i64,
    latest_safe_exit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_exit_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    days_remaining_after_trip: Option<i64>,
}

impl From<&TripStatus> for TripStatusDto {
    fn from(s: &TripStatus) -> Self {
        Self {
            days_left: s.days_left,
            trip_valid: s.trip_valid,
            days_used_on_entry: s.days_used_on_entry,
            days_remaining_on_entry: s.days_remaining_on_entry,
            latest_safe_exit: s.latest_safe_exit.to_string(),
            required_exit_date: s.required_exit_date.map(|d| d.to_string()),
            days_remaining_after_trip: s.days_remaining_after_trip,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: JSON/date parsing shared by the exports
// ---------------------------------------------------------------------------

/// Parse a JSON array of `{entry, exit}` records and normalize it.
///
/// Malformed records are dropped by the normalizer; only malformed JSON fails.
fn parse_stays_json(json: &str) -> Result<(DisjointStays, Vec<String>), String> {
    let raw: Vec<RawStay> =
        serde_json::from_str(json).map_err(|e| format!("Invalid stays JSON: {}", e))?;
    let normalized = stay_engine::normalize_stays(&raw);
    Ok((normalized.stays, normalized.diagnostics))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    stay_engine::parse_iso_date(s).map_err(|e| e.to_string())
}

fn parse_optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, String> {
    s.map(parse_date).transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// Native implementations (testable without a JS host)
// ---------------------------------------------------------------------------

fn normalize_impl(stays_json: &str) -> Result<String, String> {
    let (stays, diagnostics) = parse_stays_json(stays_json)?;
    to_json(&NormalizeDto {
        stays: stays.to_raw(),
        diagnostics,
    })
}

fn days_used_impl(stays_json: &str, reference: &str) -> Result<u32, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    let used = stay_engine::days_used_in_window(&stays, parse_date(reference)?);
    // Bounded by the window length.
    Ok(used as u32)
}

fn latest_safe_exit_impl(stays_json: &str, entry: &str) -> Result<String, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    Ok(stay_engine::latest_safe_exit(&stays, parse_date(entry)?).to_string())
}

fn aging_out_impl(stays_json: &str, reference: &str) -> Result<String, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    let events = stay_engine::aging_out_schedule(&stays, parse_date(reference)?);
    let dtos: Vec<AgingOutEventDto> = events.iter().map(AgingOutEventDto::from).collect();
    to_json(&dtos)
}

fn plan_trip_impl(
    stays_json: &str,
    entry: &str,
    proposed_exit: Option<&str>,
) -> Result<String, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    let plan = stay_engine::plan_trip(&stays, parse_date(entry)?, proposed_exit);
    to_json(&PlanResultDto::from(&plan))
}

fn already_inside_impl(
    stays_json: &str,
    actual_entry: &str,
    today: &str,
) -> Result<String, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    let (actual_entry, today) = (parse_date(actual_entry)?, parse_date(today)?);
    let status = stay_engine::already_inside(&stays, actual_entry, today);
    to_json(&InsideResultDto::from(&status))
}

fn trip_status_impl(
    stays_json: &str,
    today: &str,
    planned_entry: Option<&str>,
    planned_exit: Option<&str>,
) -> Result<String, String> {
    let (stays, _) = parse_stays_json(stays_json)?;
    let status = stay_engine::trip_status(
        &stays,
        parse_date(today)?,
        parse_optional_date(planned_entry)?,
        parse_optional_date(planned_exit)?,
    );
    to_json(&TripStatusDto::from(&status))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Validate and merge a stay list.
///
/// Returns `{stays, diagnostics}` where `stays` is the disjoint set and
/// `diagnostics` lists one message per dropped record.
#[wasm_bindgen(js_name = "normalizeStays")]
pub fn normalize_stays(stays_json: &str) -> Result<String, JsValue> {
    normalize_impl(stays_json).map_err(|e| JsValue::from_str(&e))
}

/// Days used in the 180-day window ending on `reference`.
#[wasm_bindgen(js_name = "daysUsedInWindow")]
pub fn days_used_in_window(stays_json: &str, reference: &str) -> Result<u32, JsValue> {
    days_used_impl(stays_json, reference).map_err(|e| JsValue::from_str(&e))
}

/// Latest safe exit date (`YYYY-MM-DD`) for a stay starting on `entry`.
#[wasm_bindgen(js_name = "latestSafeExit")]
pub fn latest_safe_exit(stays_json: &str, entry: &str) -> Result<String, JsValue> {
    latest_safe_exit_impl(stays_json, entry).map_err(|e| JsValue::from_str(&e))
}

/// Full aging-out schedule as `[{dropDate, daysRegained}]`.
#[wasm_bindgen(js_name = "agingOutSchedule")]
pub fn aging_out_schedule(stays_json: &str, reference: &str) -> Result<String, JsValue> {
    aging_out_impl(stays_json, reference).map_err(|e| JsValue::from_str(&e))
}

/// Plan a trip from `entry`, optionally checking `proposed_exit`.
///
/// An invalid `proposed_exit` is not an error: it comes back as
/// `proposed: {ok: false, firstIllegal: <input>}`.
#[wasm_bindgen(js_name = "planTrip")]
pub fn plan_trip(
    stays_json: &str,
    entry: &str,
    proposed_exit: Option<String>,
) -> Result<String, JsValue> {
    plan_trip_impl(stays_json, entry, proposed_exit.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Status while already inside. `today` is supplied by the caller.
#[wasm_bindgen(js_name = "alreadyInside")]
pub fn already_inside(
    stays_json: &str,
    actual_entry: &str,
    today: &str,
) -> Result<String, JsValue> {
    already_inside_impl(stays_json, actual_entry, today).map_err(|e| JsValue::from_str(&e))
}

/// Combined form status; the planned trip counts towards its own exit date.
#[wasm_bindgen(js_name = "tripStatus")]
pub fn trip_status(
    stays_json: &str,
    today: &str,
    planned_entry: Option<String>,
    planned_exit: Option<String>,
) -> Result<String, JsValue> {
    trip_status_impl(
        stays_json,
        today,
        planned_entry.as_deref(),
        planned_exit.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Whether stays in `country_code` count against the allowance.
#[wasm_bindgen(js_name = "isMemberCountry")]
pub fn is_member_country(country_code: &str) -> bool {
    stay_engine::is_member_country(country_code)
}
