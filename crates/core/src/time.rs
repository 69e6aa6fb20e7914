//! # Time Arithmetic
//!
//! Time-of-day values as used by branch operating hours. Times travel over
//! the wire and through forms as strict `HH:MM` strings (24-hour, two digits
//! each), so parsing is deliberately narrow: nothing is padded, trimmed or
//! clamped.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{TimeError, TimeResult};

/// Minutes in a single day
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision
///
/// Ordering is by `(hour, minute)`, which is what the derived `Ord` gives us
/// thanks to the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00`
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Builds a time from its components, returning `None` when out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Builds a time from literal components
    ///
    /// Meant for constants: an out-of-range literal fails const evaluation.
    pub const fn hm(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self { hour, minute }
    }

    /// Builds a time from minutes since midnight, returning `None` past the end of the day
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self {
                hour: (minutes / 60) as u8,
                minute: (minutes % 60) as u8,
            })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight
    pub const fn minutes_since_midnight(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Adds `minutes`, wrapping around within a single day
    pub fn add_minutes(self, minutes: u32) -> Self {
        let day = u32::from(MINUTES_PER_DAY);
        let total = (u32::from(self.minutes_since_midnight()) + minutes % day) % day;
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// Adds `minutes`, returning `None` instead of crossing midnight
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = minutes.checked_add(u32::from(self.minutes_since_midnight()))?;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }
}

/// Parses a strict `HH:MM` string
///
/// # Errors
///
/// Returns `TimeError::InvalidTimeFormat` for anything that is not exactly two
/// digits, a colon and two digits, or whose hour/minute is out of range.
///
/// # Example
///
/// ```
/// use clinicdesk_core::time::parse_time;
///
/// let t = parse_time("09:30").unwrap();
/// assert_eq!((t.hour(), t.minute()), (9, 30));
/// assert!(parse_time("9:30").is_err());
/// assert!(parse_time("24:00").is_err());
/// ```
pub fn parse_time(s: &str) -> TimeResult<TimeOfDay> {
    let invalid = || TimeError::InvalidTimeFormat(s.to_string());

    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let two_digits = |hi: u8, lo: u8| -> Option<u8> {
        if hi.is_ascii_digit() && lo.is_ascii_digit() {
            Some((hi - b'0') * 10 + (lo - b'0'))
        } else {
            None
        }
    };

    let hour = two_digits(bytes[0], bytes[1]).ok_or_else(invalid)?;
    let minute = two_digits(bytes[3], bytes[4]).ok_or_else(invalid)?;

    TimeOfDay::new(hour, minute).ok_or_else(invalid)
}

/// Compares two times of day by `(hour, minute)`
pub fn compare_time(a: TimeOfDay, b: TimeOfDay) -> Ordering {
    a.cmp(&b)
}

/// Adds minutes to a time of day, wrapping within a single day
pub fn add_minutes(time: TimeOfDay, minutes: u32) -> TimeOfDay {
    time.add_minutes(minutes)
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
