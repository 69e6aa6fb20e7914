use std::{collections::BTreeSet, fmt};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{TimeError, TimeResult},
    slots::{generate_slots, ExcludedRange},
    time::{TimeOfDay, MINUTES_PER_DAY},
};

/// Day of the week as stored by the backend: 0 = Sunday through 6 = Saturday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Stored/wire number of this day
    pub const fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(number as usize).copied()
    }

    /// Weekday of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    pub const fn short_name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sun",
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        Self::ALL[weekday.num_days_from_sunday() as usize]
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> Self {
        day.number()
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = TimeError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| {
            TimeError::Validation(format!("Weekday must be between 0 and 6, got {}", number))
        })
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Recurring operating hours of a branch
///
/// One template exists per branch and is replaced wholesale on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTemplate {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub interval_minutes: u32,
    #[serde(default)]
    pub excluded_times: Vec<ExcludedRange>,
    #[serde(default)]
    pub weekly_holidays: BTreeSet<DayOfWeek>,
}

impl ScheduleTemplate {
    pub fn new(start_time: TimeOfDay, end_time: TimeOfDay, interval_minutes: u32) -> Self {
        Self {
            start_time,
            end_time,
            interval_minutes,
            excluded_times: Vec::new(),
            weekly_holidays: BTreeSet::new(),
        }
    }

    pub fn with_excluded(mut self, range: ExcludedRange) -> Self {
        self.excluded_times.push(range);
        self
    }

    pub fn with_weekly_holiday(mut self, day: DayOfWeek) -> Self {
        self.weekly_holidays.insert(day);
        self
    }

    pub fn is_weekly_holiday(&self, day: DayOfWeek) -> bool {
        self.weekly_holidays.contains(&day)
    }

    /// Bookable times on a regular (non-holiday, non-overridden) day
    pub fn slots(&self) -> Vec<TimeOfDay> {
        generate_slots(
            self.start_time,
            self.end_time,
            self.interval_minutes,
            &self.excluded_times,
        )
    }

    /// Checks that the template can be saved
    ///
    /// # Errors
    ///
    /// * `TimeError::InvalidRange` - opening time is not before closing time
    /// * `TimeError::Validation` - interval is zero or longer than a day, or an exclusion is empty/inverted
    pub fn validate(&self) -> TimeResult<()> {
        if self.start_time >= self.end_time {
            return Err(TimeError::InvalidRange {
                start: self.start_time,
                end: self.end_time,
            });
        }

        if self.interval_minutes == 0 {
            return Err(TimeError::Validation(
                "Interval must be a positive number of minutes".to_string(),
            ));
        }

        if self.interval_minutes > u32::from(MINUTES_PER_DAY) {
            return Err(TimeError::Validation(format!(
                "Interval must be at most {} minutes, got {}",
                MINUTES_PER_DAY, self.interval_minutes
            )));
        }

        if let Some(bad) = self.excluded_times.iter().find(|r| r.start >= r.end) {
            return Err(TimeError::Validation(format!(
                "Excluded time {}-{} must start before it ends",
                bad.start, bad.end
            )));
        }

        Ok(())
    }
}

const DEFAULT_OPENING: TimeOfDay = TimeOfDay::hm(9, 0);
const DEFAULT_CLOSING: TimeOfDay = TimeOfDay::hm(18, 0);
const DEFAULT_INTERVAL_MINUTES: u32 = 30;

/// Form prefill for a branch that has not configured a template yet
impl Default for ScheduleTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_OPENING, DEFAULT_CLOSING, DEFAULT_INTERVAL_MINUTES)
    }
}
