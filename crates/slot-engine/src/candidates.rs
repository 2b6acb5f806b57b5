//! Start and end time candidates for a booking form.
//!
//! Both generators walk the same grid: every multiple of the granularity whose
//! full slot fits in the day, that falls inside a working-hours window, and
//! (when scheduling today) that is strictly later than `now`. They differ only
//! in which grid points they keep and how availability is decided:
//!
//! - starts are available on an exact free-slot match, or by gap
//!   interpolation when [`InterpolationPolicy::BetweenFreeSlots`] is active;
//! - ends are available only when the chosen start and every slot up to the
//!   end are free (no interpolation).

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{self, hhmm, MINUTES_PER_DAY};
use crate::config::{EngineConfig, InterpolationPolicy, WindowCrossing};
use crate::free_slots::FreeSlotSet;

/// Marker appended to the label of an available candidate.
pub const AVAILABLE_MARKER: &str = " ✓";

/// One selectable time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeCandidate {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub minute_of_day: u32,
    pub is_available: bool,
    /// `HH:MM`, followed by [`AVAILABLE_MARKER`] when available.
    pub label: String,
}

impl TimeCandidate {
    fn new(minute: u32, is_available: bool) -> Self {
        let time = clock::time_from_minute(minute);
        let mut label = clock::format_hhmm(time);
        if is_available {
            label.push_str(AVAILABLE_MARKER);
        }
        Self {
            time,
            minute_of_day: minute,
            is_available,
            label,
        }
    }
}

/// Grid points that pass the step, window and today-cutoff filters, ascending.
fn slot_grid(
    config: &EngineConfig,
    date: NaiveDate,
    now: NaiveDateTime,
) -> impl Iterator<Item = u32> + '_ {
    let step = config.granularity.minutes();
    // Seconds since midnight at or before which today's slots are past.
    let cutoff = (config.today_cutoff && date == now.date())
        .then(|| now.time().num_seconds_from_midnight());

    (0..MINUTES_PER_DAY)
        .step_by(step as usize)
        .take_while(move |m| m + step <= MINUTES_PER_DAY)
        .filter(move |&m| config.window_containing(m).is_some())
        .filter(move |&m| cutoff.is_none_or(|secs| m * 60 > secs))
}

/// Selectable start times for `date`, ascending.
///
/// With an empty `free_slots` every candidate is unavailable. With no
/// windows the result is empty.
pub fn generate_start_candidates(
    config: &EngineConfig,
    date: NaiveDate,
    free_slots: &FreeSlotSet,
    now: NaiveDateTime,
) -> Vec<TimeCandidate> {
    let interpolate = config.interpolation == InterpolationPolicy::BetweenFreeSlots;

    let candidates: Vec<TimeCandidate> = slot_grid(config, date, now)
        .map(|m| {
            let is_available = !free_slots.is_empty()
                && (free_slots.contains(m) || (interpolate && free_slots.is_between(m)));
            TimeCandidate::new(m, is_available)
        })
        .collect();

    debug!(
        %date,
        granularity = config.granularity.minutes(),
        generated = candidates.len(),
        available = candidates.iter().filter(|c| c.is_available).count(),
        "generated start candidates"
    );
    candidates
}

/// Selectable end times for an appointment starting at `start`, ascending.
///
/// Ends lie at least one slot (or the configured minimum) after `start` and
/// no more than the configured maximum duration after it. An end is available
/// only when `start` and every slot up to the end are exact free-slot matches.
pub fn generate_end_candidates(
    config: &EngineConfig,
    date: NaiveDate,
    free_slots: &FreeSlotSet,
    now: NaiveDateTime,
    start: NaiveTime,
) -> Vec<TimeCandidate> {
    let step = config.granularity.minutes();
    let start_minute = clock::minute_of_day(start);
    // Durations are unbounded u32s from settings; saturate instead of wrapping.
    let min_end = start_minute.saturating_add(config.min_duration());
    let max_end = start_minute.saturating_add(config.max_duration_minutes);
    let start_window = config.window_containing(start_minute).copied();
    let start_free = free_slots.contains(start_minute);

    let candidates: Vec<TimeCandidate> = slot_grid(config, date, now)
        .filter(|&m| m >= min_end && m <= max_end)
        .filter(|&m| match config.window_crossing {
            WindowCrossing::MarkUnavailable => true,
            WindowCrossing::Suppress => start_window.is_some_and(|w| w.contains(m)),
        })
        .map(|m| {
            let is_available = start_free && free_slots.covers_run(start_minute, m, step);
            TimeCandidate::new(m, is_available)
        })
        .collect();

    debug!(
        %date,
        start = %clock::format_hhmm(start),
        granularity = step,
        generated = candidates.len(),
        available = candidates.iter().filter(|c| c.is_available).count(),
        "generated end candidates"
    );
    candidates
}
