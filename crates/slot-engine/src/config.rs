//! Engine configuration: slot granularity, working-hours windows, and the
//! policies that govern how free-slot data is reconciled.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::{self, MINUTES_PER_DAY};
use crate::error::{Result, SlotError};
use crate::hours::ClinicHours;

/// Longest appointment offered as an end candidate, in minutes.
pub const DEFAULT_MAX_DURATION_MINUTES: u32 = 180;

/// Fixed length, in minutes, of one schedulable micro-slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct SlotGranularity(u32);

impl SlotGranularity {
    /// # Errors
    /// Returns `SlotError::InvalidGranularity` unless `1 <= minutes <= 1440`.
    pub fn new(minutes: u32) -> Result<Self> {
        if (1..=MINUTES_PER_DAY).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(SlotError::InvalidGranularity(minutes))
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for SlotGranularity {
    type Error = SlotError;

    fn try_from(minutes: u32) -> Result<Self> {
        Self::new(minutes)
    }
}

impl From<SlotGranularity> for u32 {
    fn from(granularity: SlotGranularity) -> Self {
        granularity.0
    }
}

/// A half-open `[start, end)` minute-of-day interval during which booking is
/// structurally permitted.
///
/// Serialized as `{"start": "HH:MM", "end": "HH:MM"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowRepr", into = "WindowRepr")]
pub struct WorkingHoursWindow {
    start_minute: u32,
    end_minute: u32,
}

impl WorkingHoursWindow {
    /// # Errors
    /// Returns `SlotError::InvalidWindow` unless `start < end < 1440`.
    pub fn from_minutes(start_minute: u32, end_minute: u32) -> Result<Self> {
        if start_minute < end_minute && end_minute < MINUTES_PER_DAY {
            Ok(Self {
                start_minute,
                end_minute,
            })
        } else {
            Err(SlotError::InvalidWindow {
                start: start_minute,
                end: end_minute,
            })
        }
    }

    /// # Errors
    /// Returns `SlotError::InvalidWindow` unless `start < end`.
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        Self::from_minutes(clock::minute_of_day(start), clock::minute_of_day(end))
    }

    pub fn start_minute(&self) -> u32 {
        self.start_minute
    }

    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }

    /// Half-open containment: `start <= minute < end`.
    pub fn contains(&self, minute: u32) -> bool {
        self.start_minute <= minute && minute < self.end_minute
    }
}

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    #[serde(with = "clock::hhmm")]
    start: NaiveTime,
    #[serde(with = "clock::hhmm")]
    end: NaiveTime,
}

impl TryFrom<WindowRepr> for WorkingHoursWindow {
    type Error = SlotError;

    fn try_from(repr: WindowRepr) -> Result<Self> {
        Self::from_times(repr.start, repr.end)
    }
}

impl From<WorkingHoursWindow> for WindowRepr {
    fn from(window: WorkingHoursWindow) -> Self {
        Self {
            start: clock::time_from_minute(window.start_minute),
            end: clock::time_from_minute(window.end_minute),
        }
    }
}

/// How start candidates without an exact free-slot record are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationPolicy {
    /// A start lying strictly between two known-free instants counts as
    /// available even without its own record. Tolerates backends whose slot
    /// boundaries do not line up with the display granularity.
    #[default]
    BetweenFreeSlots,
    /// Only starts with an exact free-slot record are available.
    ExactOnly,
}

/// How end candidates outside the start's working-hours window are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowCrossing {
    /// Generate them; the contiguous-run check marks them unavailable.
    #[default]
    MarkUnavailable,
    /// Drop ends that do not share the start's window.
    Suppress,
}

/// Everything the candidate generators need besides the date, the free-slot
/// set and `now`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Working-hours windows for the date being scheduled. May be empty.
    pub windows: Vec<WorkingHoursWindow>,
    pub granularity: SlotGranularity,
    /// Shortest appointment offered. `None` means one granularity slot;
    /// values below the granularity are raised to it.
    pub min_duration_minutes: Option<u32>,
    pub max_duration_minutes: u32,
    /// Suppress starts and ends at or before `now` when scheduling today.
    pub today_cutoff: bool,
    pub interpolation: InterpolationPolicy,
    pub window_crossing: WindowCrossing,
}

impl EngineConfig {
    pub fn new(windows: Vec<WorkingHoursWindow>, granularity: SlotGranularity) -> Self {
        Self {
            windows,
            granularity,
            min_duration_minutes: None,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            today_cutoff: true,
            interpolation: InterpolationPolicy::default(),
            window_crossing: WindowCrossing::default(),
        }
    }

    pub fn with_min_duration(mut self, minutes: u32) -> Self {
        self.min_duration_minutes = Some(minutes);
        self
    }

    pub fn with_max_duration(mut self, minutes: u32) -> Self {
        self.max_duration_minutes = minutes;
        self
    }

    pub fn with_today_cutoff(mut self, enabled: bool) -> Self {
        self.today_cutoff = enabled;
        self
    }

    pub fn with_interpolation(mut self, policy: InterpolationPolicy) -> Self {
        self.interpolation = policy;
        self
    }

    pub fn with_window_crossing(mut self, policy: WindowCrossing) -> Self {
        self.window_crossing = policy;
        self
    }

    /// The first window containing `minute`, if any.
    pub fn window_containing(&self, minute: u32) -> Option<&WorkingHoursWindow> {
        self.windows.iter().find(|w| w.contains(minute))
    }

    /// Effective minimum appointment length, never shorter than one slot.
    pub fn min_duration(&self) -> u32 {
        let slot = self.granularity.minutes();
        self.min_duration_minutes.map_or(slot, |m| m.max(slot))
    }
}

fn default_max_duration() -> u32 {
    DEFAULT_MAX_DURATION_MINUTES
}

fn default_true() -> bool {
    true
}

/// Loadable scheduler settings: the JSON shape read by the CLI and the WASM
/// bindings.
///
/// Working hours come either from a fixed `windows` list applied to every
/// date, or from `clinic_hours`, which is translated per date (weekday vs
/// weekend, breaks). When both are present `clinic_hours` wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    pub granularity_minutes: SlotGranularity,
    #[serde(default)]
    pub windows: Vec<WorkingHoursWindow>,
    #[serde(default)]
    pub clinic_hours: Option<ClinicHours>,
    #[serde(default)]
    pub min_duration_minutes: Option<u32>,
    #[serde(default = "default_max_duration")]
    pub max_duration_minutes: u32,
    #[serde(default = "default_true")]
    pub today_cutoff: bool,
    #[serde(default)]
    pub interpolation: InterpolationPolicy,
    #[serde(default)]
    pub window_crossing: WindowCrossing,
}

impl SchedulerSettings {
    /// Settings with fixed windows and default policies.
    pub fn new(granularity: SlotGranularity, windows: Vec<WorkingHoursWindow>) -> Self {
        Self {
            granularity_minutes: granularity,
            windows,
            clinic_hours: None,
            min_duration_minutes: None,
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            today_cutoff: true,
            interpolation: InterpolationPolicy::default(),
            window_crossing: WindowCrossing::default(),
        }
    }

    /// Calendar view preset: 30-minute slots, 08:00–17:00.
    pub fn scheduler() -> Self {
        Self::fixed_day(30, 8 * 60, 17 * 60)
    }

    /// Create/edit appointment dialog preset: 5-minute slots, 07:00–20:00.
    pub fn booking_dialog() -> Self {
        Self::fixed_day(5, 7 * 60, 20 * 60)
    }

    fn fixed_day(granularity: u32, start_minute: u32, end_minute: u32) -> Self {
        let window = WorkingHoursWindow {
            start_minute,
            end_minute,
        };
        Self::new(SlotGranularity(granularity), vec![window])
    }

    /// Parse a settings document.
    ///
    /// # Errors
    /// Returns `SlotError::Config` on malformed JSON, an out-of-range
    /// granularity, or an invalid window.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the engine configuration for one date.
    pub fn engine_config_for(&self, date: NaiveDate) -> EngineConfig {
        let windows = match &self.clinic_hours {
            Some(hours) => hours.windows_for(date),
            None => self.windows.clone(),
        };
        EngineConfig {
            windows,
            granularity: self.granularity_minutes,
            min_duration_minutes: self.min_duration_minutes,
            max_duration_minutes: self.max_duration_minutes,
            today_cutoff: self.today_cutoff,
            interpolation: self.interpolation,
            window_crossing: self.window_crossing,
        }
    }
}
