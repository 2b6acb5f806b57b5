//! Error types for slot-engine input construction and parsing.
//!
//! Candidate generation itself never fails; these errors come from building
//! configurations, parsing caller-supplied strings, and selection transitions.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid slot granularity: {0} minutes (expected 1..=1440)")]
    InvalidGranularity(u32),

    #[error("Invalid working-hours window: [{start}, {end}) minutes")]
    InvalidWindow { start: u32, end: u32 },

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid free-slot timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A settings or hours document was not valid JSON for its shape.
    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
