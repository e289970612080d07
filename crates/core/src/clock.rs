//! Wall-clock times of day used by the shot plan (`HH:MM`, 24h).
//!
//! A [`ClockTime`] is stored as minutes since midnight. Arithmetic on the
//! schedule happens on plain `i64` minute totals; [`ClockTime::wrapping`]
//! folds any total back onto the 24-hour dial, so a day that runs past
//! midnight simply shows the wrapped clock time.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Build a clock time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, CoreError> {
        if hour > 23 || minute > 59 {
            return Err(CoreError::Validation(format!(
                "invalid clock time {hour}:{minute:02}"
            )));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Build a clock time from any minute total, wrapping around midnight.
    ///
    /// `hour = floor(total / 60) mod 24`, `minute = total mod 60`. Negative
    /// totals wrap backwards onto the previous day.
    pub fn wrapping(total_minutes: i64) -> Self {
        Self(total_minutes.rem_euclid(MINUTES_PER_DAY) as u16)
    }

    /// Minutes since midnight, `0..1440`.
    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0) / 60
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0) % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = CoreError;

    /// Parse `HH:MM` or `H:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| {
            CoreError::Validation(format!("time must be formatted HH:MM, got '{s}'"))
        })?;
        Self::from_hm(parsed.hour(), parsed.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
