//! WASM bindings for slot-engine.
//!
//! Exposes start/end candidate generation and working-hours translation to the
//! browser booking forms via `wasm-bindgen`. Settings, hours and free-slot
//! lists cross the boundary as JSON strings; dates as `YYYY-MM-DD`, times as
//! `HH:MM`, and `now` as a local `YYYY-MM-DDTHH:MM[:SS]` wall-clock string.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use slot_engine::{
    clock, ClinicHours, FreeSlotSet, SchedulerSettings, TimeCandidate, WorkingHoursWindow,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TimeCandidateDto {
    time: String,
    is_available: bool,
    label: String,
}

impl From<&TimeCandidate> for TimeCandidateDto {
    fn from(c: &TimeCandidate) -> Self {
        Self {
            time: clock::format_hhmm(c.time),
            is_available: c.is_available,
            label: c.label.clone(),
        }
    }
}

#[derive(Serialize)]
struct WindowDto {
    start: String,
    end: String,
}

impl From<&WorkingHoursWindow> for WindowDto {
    fn from(w: &WorkingHoursWindow) -> Self {
        Self {
            start: clock::format_hhmm(clock::time_from_minute(w.start_minute())),
            end: clock::format_hhmm(clock::time_from_minute(w.end_minute())),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary strings
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

/// Parse a local wall-clock string, with or without seconds.
fn parse_now(s: &str) -> Result<NaiveDateTime, JsValue> {
    let trimmed = s.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map_err(|e| JsValue::from_str(&format!("Invalid now '{}': {}", s, e)))
}

fn parse_free_slots(date: NaiveDate, json: &str) -> Result<FreeSlotSet, JsValue> {
    let timestamps: Vec<String> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid free slots JSON: {}", e)))?;
    FreeSlotSet::parse(date, timestamps.as_slice()).map_err(js_err)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn candidates_json(candidates: &[TimeCandidate]) -> Result<String, JsValue> {
    let dtos: Vec<TimeCandidateDto> = candidates.iter().map(TimeCandidateDto::from).collect();
    to_json(&dtos)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Selectable start times for a date.
///
/// Returns a JSON array of `{time, is_available, label}` objects in ascending
/// order. An empty `free_slots_json` array marks every start unavailable.
///
/// # Arguments
/// - `settings_json` -- Scheduler settings document (granularity, windows or clinic hours, policies)
/// - `date` -- Date being scheduled (`YYYY-MM-DD`)
/// - `free_slots_json` -- JSON array of free-slot start timestamps for that date
/// - `now` -- Current local wall clock (`YYYY-MM-DDTHH:MM[:SS]`)
#[wasm_bindgen(js_name = "generateStartCandidates")]
pub fn generate_start_candidates(
    settings_json: &str,
    date: &str,
    free_slots_json: &str,
    now: &str,
) -> Result<String, JsValue> {
    let settings = SchedulerSettings::from_json(settings_json).map_err(js_err)?;
    let date = parse_date(date)?;
    let free = parse_free_slots(date, free_slots_json)?;
    let now = parse_now(now)?;

    let config = settings.engine_config_for(date);
    candidates_json(&slot_engine::generate_start_candidates(&config, date, &free, now))
}

/// Selectable end times for an appointment starting at `start` (`HH:MM`).
///
/// Arguments as for [`generate_start_candidates`]. An end is available only
/// when every slot from `start` up to it is free.
#[wasm_bindgen(js_name = "generateEndCandidates")]
pub fn generate_end_candidates(
    settings_json: &str,
    date: &str,
    free_slots_json: &str,
    now: &str,
    start: &str,
) -> Result<String, JsValue> {
    let settings = SchedulerSettings::from_json(settings_json).map_err(js_err)?;
    let date = parse_date(date)?;
    let free = parse_free_slots(date, free_slots_json)?;
    let now = parse_now(now)?;
    let start = clock::parse_hhmm(start).map_err(js_err)?;

    let config = settings.engine_config_for(date);
    candidates_json(&slot_engine::generate_end_candidates(
        &config, date, &free, now, start,
    ))
}

/// Working-hours windows for a date from a clinic hours document.
///
/// Returns a JSON array of `{start, end}` objects; empty when the clinic is
/// closed that day.
#[wasm_bindgen(js_name = "windowsForDate")]
pub fn windows_for_date(hours_json: &str, date: &str) -> Result<String, JsValue> {
    let hours = ClinicHours::from_json(hours_json).map_err(js_err)?;
    let date = parse_date(date)?;

    let dtos: Vec<WindowDto> = hours.windows_for(date).iter().map(WindowDto::from).collect();
    to_json(&dtos)
}

/// Current wall clock in an IANA timezone, as `YYYY-MM-DDTHH:MM:SS`.
///
/// Feed the result to the `now` argument of the generators.
#[wasm_bindgen(js_name = "localNow")]
pub fn local_now(timezone: &str) -> Result<String, JsValue> {
    let now = clock::local_now(Utc::now(), timezone).map_err(js_err)?;
    Ok(now.format("%Y-%m-%dT%H:%M:%S").to_string())
}
