//! Translate clinic opening hours into per-date working-hours windows.
//!
//! Clinics report one open/close pair for weekdays and an optional pair for
//! weekends. A missing weekend pair means the clinic is closed on Saturday and
//! Sunday. Breaks are cut out of the open period, so a lunch break turns one
//! opening into a morning and an afternoon window.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::{self, hhmm, MINUTES_PER_DAY};
use crate::config::WorkingHoursWindow;
use crate::error::Result;

/// Opening hours as returned by the clinic settings source.
///
/// A close time of `"00:00"` means midnight: the day stays open up to the
/// last minute, so a 30-minute grid still offers 23:30.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicHours {
    #[serde(with = "hhmm")]
    pub weekday_open: NaiveTime,
    #[serde(with = "hhmm")]
    pub weekday_close: NaiveTime,
    #[serde(default, with = "hhmm::option")]
    pub weekend_open: Option<NaiveTime>,
    #[serde(default, with = "hhmm::option")]
    pub weekend_close: Option<NaiveTime>,
    /// Closed periods inside the opening hours, applied every open day.
    #[serde(default)]
    pub breaks: Vec<WorkingHoursWindow>,
}

impl ClinicHours {
    /// Weekday-only hours, closed on weekends.
    pub fn weekdays(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            weekday_open: open,
            weekday_close: close,
            weekend_open: None,
            weekend_close: None,
            breaks: Vec::new(),
        }
    }

    /// Open on Saturday and Sunday with the given hours.
    pub fn with_weekend(mut self, open: NaiveTime, close: NaiveTime) -> Self {
        self.weekend_open = Some(open);
        self.weekend_close = Some(close);
        self
    }

    /// Add a closed period applied on every open day.
    pub fn with_break(mut self, closed: WorkingHoursWindow) -> Self {
        self.breaks.push(closed);
        self
    }

    /// Parse an hours document.
    ///
    /// # Errors
    /// Returns `SlotError::Config` on malformed JSON or bad times.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Open and close times for the date's weekday, or `None` when closed.
    pub fn opening_for(&self, date: NaiveDate) -> Option<(NaiveTime, NaiveTime)> {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => self.weekend_open.zip(self.weekend_close),
            _ => Some((self.weekday_open, self.weekday_close)),
        }
    }

    /// Working-hours windows for `date`, sorted and pairwise disjoint.
    ///
    /// Returns an empty list when the clinic is closed that day or the close
    /// time does not come after the open time. A `00:00` close is read as
    /// midnight.
    pub fn windows_for(&self, date: NaiveDate) -> Vec<WorkingHoursWindow> {
        let Some((open, close)) = self.opening_for(date) else {
            debug!(%date, "clinic closed");
            return Vec::new();
        };
        let close_minute = match clock::minute_of_day(close) {
            0 => MINUTES_PER_DAY - 1,
            minute => minute,
        };
        let Ok(opening) = WorkingHoursWindow::from_minutes(clock::minute_of_day(open), close_minute)
        else {
            warn!(%date, open = %clock::format_hhmm(open), close = %clock::format_hhmm(close), "empty opening hours");
            return Vec::new();
        };

        let mut breaks = self.breaks.clone();
        breaks.sort_by_key(|b| b.start_minute());

        let mut windows = Vec::new();
        let mut cursor = opening.start_minute();
        for closed in &breaks {
            if closed.end_minute() <= cursor || closed.start_minute() >= opening.end_minute() {
                continue;
            }
            if cursor < closed.start_minute() {
                windows.extend(WorkingHoursWindow::from_minutes(cursor, closed.start_minute()));
            }
            cursor = cursor.max(closed.end_minute());
        }
        if cursor < opening.end_minute() {
            windows.extend(WorkingHoursWindow::from_minutes(cursor, opening.end_minute()));
        }

        debug!(%date, windows = windows.len(), "resolved working hours");
        windows
    }
}
