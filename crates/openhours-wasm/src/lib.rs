//! WASM bindings for openhours.
//!
//! Exposes schedule membership, next transition, duration fit and window
//! listing to JavaScript via `wasm-bindgen`. Structured results cross the
//! boundary as JSON strings; timestamps are RFC 3339 strings, or naive local
//! `YYYY-MM-DDTHH:MM[:SS]` read in the given IANA timezone.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p openhours-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/openhours-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/openhours_wasm.wasm
//! ```

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use openhours::{parse_local_datetime, parse_timezone, OpenHoursError, Schedule};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TransitionDto {
    open: bool,
    next_change: Option<String>,
    minutes: Option<i64>,
}

#[derive(Serialize)]
struct WhenDto {
    start: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers shared by the exports
// ---------------------------------------------------------------------------

fn load(hours: &str, timezone: &str, at: &str) -> Result<(Schedule, DateTime<Tz>), OpenHoursError> {
    let schedule = Schedule::parse(hours)?;
    let tz = parse_timezone(timezone)?;
    let t = parse_local_datetime(at, &tz)?;
    Ok((schedule, t))
}

fn to_js(e: OpenHoursError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether the schedule is open at `at`.
///
/// # Arguments
/// - `hours` -- schedule definition (e.g., "mo-fr 09:00-17:00")
/// - `timezone` -- IANA timezone (e.g., "Europe/London")
/// - `at` -- RFC 3339 or local datetime string
#[wasm_bindgen(js_name = "isOpen")]
pub fn is_open(hours: &str, timezone: &str, at: &str) -> Result<bool, JsValue> {
    let (schedule, t) = load(hours, timezone, at).map_err(to_js)?;
    Ok(schedule.is_open(&t))
}

/// Current state and next change.
///
/// Returns a JSON string `{open, next_change, minutes}`; `next_change` and
/// `minutes` are null when the schedule never changes state.
#[wasm_bindgen(js_name = "nextTransition")]
pub fn next_transition(hours: &str, timezone: &str, at: &str) -> Result<String, JsValue> {
    let (schedule, t) = load(hours, timezone, at).map_err(to_js)?;
    let change = schedule.next_transition(&t);

    to_json(&TransitionDto {
        open: schedule.is_open(&t),
        next_change: change.map(|c| (t + c.after).to_rfc3339()),
        minutes: change.map(|c| c.after.num_minutes()),
    })
}

/// Earliest start at or after `at` that fits `minutes` in one open window.
///
/// Returns a JSON string `{start}` with `start` null when nothing fits.
#[wasm_bindgen(js_name = "when")]
pub fn when(hours: &str, timezone: &str, at: &str, minutes: u32) -> Result<String, JsValue> {
    let (schedule, t) = load(hours, timezone, at).map_err(to_js)?;
    let start = schedule.when(&t, TimeDelta::minutes(i64::from(minutes)));

    to_json(&WhenDto {
        start: start.map(|s| s.to_rfc3339()),
    })
}

/// Canonical windows as a JSON array of `{open, close}` strings such as
/// `"Monday 10:00"`.
#[wasm_bindgen(js_name = "describe")]
pub fn describe(hours: &str) -> Result<String, JsValue> {
    let schedule = Schedule::parse(hours).map_err(to_js)?;
    to_json(&schedule.windows())
}
