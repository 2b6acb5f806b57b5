//! Free micro-slot starts for one doctor on one date.
//!
//! The availability source reports each free slot as a local timestamp. An
//! empty set means "no data", never "everything free": every query on an empty
//! set answers `false`.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock;
use crate::error::{Result, SlotError};

/// Sorted set of free slot starts, as minutes since local midnight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlotSet {
    minutes: BTreeSet<u32>,
}

impl FreeSlotSet {
    /// An empty set: no availability data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from times of day on the query date.
    pub fn from_times(times: impl IntoIterator<Item = NaiveTime>) -> Self {
        Self {
            minutes: times.into_iter().map(clock::minute_of_day).collect(),
        }
    }

    /// Build from local instants, keeping only those on `date`.
    pub fn from_instants(date: NaiveDate, instants: impl IntoIterator<Item = NaiveDateTime>) -> Self {
        let mut minutes = BTreeSet::new();
        let mut dropped = 0usize;
        for instant in instants {
            if instant.date() == date {
                minutes.insert(clock::minute_of_day(instant.time()));
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(%date, dropped, "ignored free slots reported for another date");
        }
        Self { minutes }
    }

    /// Parse timestamps as returned by the free-slot source.
    ///
    /// Accepts `YYYY-MM-DDTHH:MM[:SS]` local timestamps and RFC 3339 strings;
    /// for the latter the wall-clock part is used as written.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimestamp` for the first unparseable entry.
    pub fn parse<S: AsRef<str>>(date: NaiveDate, timestamps: &[S]) -> Result<Self> {
        let instants = timestamps
            .iter()
            .map(|s| parse_local_timestamp(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_instants(date, instants))
    }

    /// Add a free slot start; returns `false` if it was already present.
    pub fn insert(&mut self, time: NaiveTime) -> bool {
        self.minutes.insert(clock::minute_of_day(time))
    }

    /// Whether no free slots are known.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Number of distinct free slot starts.
    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    /// Free slot starts in ascending order.
    pub fn times(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        self.minutes.iter().map(|&m| clock::time_from_minute(m))
    }

    /// Exact match on a free slot start.
    pub fn contains(&self, minute: u32) -> bool {
        self.minutes.contains(&minute)
    }

    /// Whether `minute` lies strictly between two consecutive free slot
    /// starts.
    pub fn is_between(&self, minute: u32) -> bool {
        self.minutes.range(..minute).next_back().is_some()
            && self.minutes.range(minute.saturating_add(1)..).next().is_some()
    }

    /// Contiguous-run check: every `granularity`-sized slot from `start` up to
    /// (not including) `end` is free. A partial trailing slot must be free too.
    pub fn covers_run(&self, start: u32, end: u32, granularity: u32) -> bool {
        if end <= start || granularity == 0 {
            return false;
        }
        let slots_needed = (end - start).div_ceil(granularity);
        (0..slots_needed).all(|i| self.contains(start + i * granularity))
    }
}

fn parse_local_timestamp(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
        .map_err(|_| SlotError::InvalidTimestamp(s.to_string()))
}
