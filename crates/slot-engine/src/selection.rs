//! Two-phase booking selection: date, then start, then end.
//!
//! The form owns this state; the engine only reads it. Changing anything
//! upstream resets what depends on it:
//!
//! - a new date clears start and end;
//! - a new doctor clears start and end (the free slots are different);
//! - a new start clears the end when `end <= start + granularity`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::booking::BookingInterval;
use crate::clock;
use crate::config::SlotGranularity;
use crate::error::{Result, SlotError};

/// Where the form is in the selection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPhase {
    NoDateSelected,
    NoStartChosen,
    NoEndChosen,
    Complete,
}

/// The form's current date, start and end picks.
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use slot_engine::{SelectionPhase, SelectionState, SlotGranularity};
///
/// let g = SlotGranularity::new(30).unwrap();
/// let mut form = SelectionState::new();
/// form.select_date(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
/// form.select_start(NaiveTime::from_hms_opt(11, 0, 0).unwrap(), g).unwrap();
/// form.select_end(NaiveTime::from_hms_opt(12, 0, 0).unwrap(), g).unwrap();
/// assert_eq!(form.phase(), SelectionPhase::Complete);
///
/// form.change_doctor();
/// assert_eq!(form.phase(), SelectionPhase::NoStartChosen);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl SelectionState {
    /// Nothing selected yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step of the selection flow.
    pub fn phase(&self) -> SelectionPhase {
        match (self.date, self.start, self.end) {
            (None, _, _) => SelectionPhase::NoDateSelected,
            (Some(_), None, _) => SelectionPhase::NoStartChosen,
            (Some(_), Some(_), None) => SelectionPhase::NoEndChosen,
            (Some(_), Some(_), Some(_)) => SelectionPhase::Complete,
        }
    }

    /// Pick a date. A different date clears start and end.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.date != Some(date) {
            self.start = None;
            self.end = None;
        }
        self.date = Some(date);
    }

    /// Switch doctor, keeping the date but clearing start and end.
    pub fn change_doctor(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Pick a start time, dropping an end that no longer leaves a full slot.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSelection` if no date is selected.
    pub fn select_start(&mut self, start: NaiveTime, granularity: SlotGranularity) -> Result<()> {
        if self.date.is_none() {
            return Err(SlotError::InvalidSelection(
                "a date must be selected before a start time".to_string(),
            ));
        }
        if let Some(end) = self.end {
            let min_gap_end = clock::minute_of_day(start) + granularity.minutes();
            if clock::minute_of_day(end) <= min_gap_end {
                self.end = None;
            }
        }
        self.start = Some(start);
        Ok(())
    }

    /// Pick an end time for the chosen start.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSelection` if no start is chosen or `end` is
    /// less than one slot after it.
    pub fn select_end(&mut self, end: NaiveTime, granularity: SlotGranularity) -> Result<()> {
        let Some(start) = self.start else {
            return Err(SlotError::InvalidSelection(
                "a start time must be chosen before an end time".to_string(),
            ));
        };
        if clock::minute_of_day(end) < clock::minute_of_day(start) + granularity.minutes() {
            return Err(SlotError::InvalidSelection(format!(
                "end {} is less than {} minutes after start {}",
                clock::format_hhmm(end),
                granularity.minutes(),
                clock::format_hhmm(start)
            )));
        }
        self.end = Some(end);
        Ok(())
    }

    /// Reset to [`SelectionPhase::NoDateSelected`].
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The booking interval for a complete selection.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSelection` unless the phase is `Complete`.
    pub fn booking(&self) -> Result<BookingInterval> {
        match (self.date, self.start, self.end) {
            (Some(date), Some(start), Some(end)) => BookingInterval::from_local(date, start, end),
            _ => Err(SlotError::InvalidSelection(format!(
                "selection incomplete: {:?}",
                self.phase()
            ))),
        }
    }
}
