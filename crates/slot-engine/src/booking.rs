//! Final booking interval handed to the appointment-creation flow.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::error::{Result, SlotError};

/// A confirmed appointment interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl BookingInterval {
    /// Join the selected date with start and end times of day.
    ///
    /// Date and time are concatenated as written and read as UTC, which is
    /// how the appointment-creation endpoint expects them.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidSelection` when `end` is not after `start`.
    pub fn from_local(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if end <= start {
            return Err(SlotError::InvalidSelection(format!(
                "end {} is not after start {}",
                clock::format_hhmm(end),
                clock::format_hhmm(start)
            )));
        }
        let start = date.and_time(start).and_utc();
        let end = date.and_time(end).and_utc();
        Ok(Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        })
    }
}
