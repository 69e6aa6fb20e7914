//! # Slot Generator
//!
//! Turns operating hours into the list of bookable times of day. The walk is
//! half-open everywhere: the closing time is never offered, an exclusion
//! blocks its start but not its end.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{TimeError, TimeResult},
    time::TimeOfDay,
};

/// A blocked stretch of the day such as a lunch break, covering `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExcludedRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl ExcludedRange {
    /// Builds a range, rejecting empty or inverted ones
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> TimeResult<Self> {
        if start >= end {
            return Err(TimeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// True when `time` falls inside `[start, end)`
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }
}

/// Generates the bookable times between `start` (inclusive) and `end` (exclusive)
///
/// Returns an empty list, rather than an error, when `start >= end` or
/// `interval_minutes` is zero: a template being edited is allowed to be
/// transiently incomplete. Exclusions may be unsorted and may overlap.
///
/// # Example
///
/// ```
/// use clinicdesk_core::{slots::{generate_slots, ExcludedRange}, time::parse_time};
///
/// let lunch = ExcludedRange::new(parse_time("12:00").unwrap(), parse_time("13:00").unwrap()).unwrap();
/// let slots = generate_slots(
///     parse_time("11:00").unwrap(),
///     parse_time("14:00").unwrap(),
///     30,
///     &[lunch],
/// );
/// let rendered: Vec<String> = slots.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["11:00", "11:30", "13:00", "13:30"]);
/// ```
pub fn generate_slots(
    start: TimeOfDay,
    end: TimeOfDay,
    interval_minutes: u32,
    excluded: &[ExcludedRange],
) -> Vec<TimeOfDay> {
    if start >= end || interval_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = start;

    while current < end {
        if !excluded.iter().any(|range| range.contains(current)) {
            slots.push(current);
        }

        // end is on the same day, so running off midnight also means we are past it
        match current.checked_add_minutes(interval_minutes) {
            Some(next) => current = next,
            None => break,
        }
    }

    slots
}
