//! # slot-engine
//!
//! Appointment time-slot computation and availability reconciliation for
//! clinic booking forms.
//!
//! Given a clinic's working-hours windows, a slot granularity, the free-slot
//! starts reported for a doctor on a date, and the current wall-clock time, the
//! engine produces the selectable start times for a booking and, once a start
//! is chosen, the selectable end times whose whole span is covered by
//! contiguous free slots. Generation is pure: no I/O, no clock reads, and the
//! same inputs always produce the same output.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime};
//! use slot_engine::{
//!     generate_end_candidates, generate_start_candidates, EngineConfig, FreeSlotSet,
//!     SlotGranularity, WorkingHoursWindow,
//! };
//!
//! let config = EngineConfig::new(
//!     vec![WorkingHoursWindow::from_minutes(8 * 60, 12 * 60).unwrap()],
//!     SlotGranularity::new(30).unwrap(),
//! );
//! let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let now = date.and_hms_opt(10, 0, 0).unwrap();
//! let free = FreeSlotSet::from_times([
//!     NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
//! ]);
//!
//! let starts = generate_start_candidates(&config, date, &free, now);
//! assert_eq!(starts[1].label, "11:00 ✓");
//!
//! let start = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
//! let ends = generate_end_candidates(&config, date, &free, now, start);
//! assert!(ends[0].is_available);
//! ```
//!
//! ## Modules
//!
//! - [`candidates`] — start/end candidate generation (the engine proper)
//! - [`config`] — granularity, working-hours windows, policies, settings files
//! - [`free_slots`] — free-slot set with exact, interpolated and run queries
//! - [`hours`] — clinic opening hours → per-date working-hours windows
//! - [`selection`] — date → start → end selection state machine
//! - [`booking`] — final (date, start, end) → UTC booking interval
//! - [`cache`] — TTL cache for free-slot responses held by callers
//! - [`clock`] — minute-of-day arithmetic, `HH:MM` formatting, local "now"
//! - [`error`] — Error types

pub mod booking;
pub mod cache;
pub mod candidates;
pub mod clock;
pub mod config;
pub mod error;
pub mod free_slots;
pub mod hours;
pub mod selection;

pub use booking::BookingInterval;
pub use cache::{FreeSlotKey, TtlCache};
pub use candidates::{generate_end_candidates, generate_start_candidates, TimeCandidate};
pub use config::{
    EngineConfig, InterpolationPolicy, SchedulerSettings, SlotGranularity, WindowCrossing,
    WorkingHoursWindow,
};
pub use error::SlotError;
pub use free_slots::FreeSlotSet;
pub use hours::ClinicHours;
pub use selection::{SelectionPhase, SelectionState};
