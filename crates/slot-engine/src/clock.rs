//! Minute-of-day arithmetic and wall-clock helpers.
//!
//! The engine works in whole minutes since local midnight. Callers hand it a
//! naive local `now`; [`local_now`] converts a UTC instant into that form for
//! the clinic's IANA timezone.

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Minutes since midnight, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Time of day for a minute offset. Offsets of a full day or more wrap.
pub fn time_from_minute(minute: u32) -> NaiveTime {
    NaiveTime::MIN + Duration::minutes(i64::from(minute % MINUTES_PER_DAY))
}

/// Render a time of day as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse `HH:MM` (or `HH:MM:SS`) into a time of day.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Convert a UTC instant into the wall clock of `timezone`.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
pub fn local_now(instant: DateTime<Utc>, timezone: &str) -> Result<NaiveDateTime> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// Serde adapter storing a [`NaiveTime`] as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(de::Error::custom)
    }

    /// Same as the parent adapter, for optional fields.
    pub mod option {
        use chrono::NaiveTime;
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => serializer.serialize_some(&crate::clock::format_hhmm(*t)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveTime>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| crate::clock::parse_hhmm(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }
}
