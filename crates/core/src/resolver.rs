//! # Daily Override Resolver
//!
//! Decides which slots are bookable on a concrete date. Exactly one source
//! applies, in priority order:
//!
//! 1. a [`DailyOverride`] for that date, verbatim (an empty list means closed)
//! 2. nothing, when the weekday is one of the template's weekly holidays
//! 3. the slots generated from the [`ScheduleTemplate`]
//!
//! Everything here is a pure function of its arguments. Callers pass the
//! branch's template and that branch's overrides explicitly; fetching them
//! (typically one displayed month at a time) is the caller's job.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    models::{
        daily_override::{iso_date, DailyOverride},
        template::{DayOfWeek, ScheduleTemplate},
    },
    month::YearMonth,
    time::TimeOfDay,
};

/// Where a day's effective slots came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotSource {
    Override,
    WeeklyHoliday,
    Template,
}

/// Effective slots of one date together with their source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub source: SlotSource,
    pub slots: Vec<TimeOfDay>,
}

impl DaySchedule {
    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek::of(self.date)
    }

    pub fn is_closed(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Overrides keyed by calendar date
///
/// If the input carries more than one override for a date, the last one wins,
/// matching the backend's upsert semantics.
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex<'a> {
    by_date: BTreeMap<NaiveDate, &'a DailyOverride>,
}

impl<'a> OverrideIndex<'a> {
    pub fn new(overrides: impl IntoIterator<Item = &'a DailyOverride>) -> Self {
        let by_date = overrides.into_iter().map(|o| (o.date, o)).collect();
        Self { by_date }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&'a DailyOverride> {
        self.by_date.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

/// Resolves a date against an already indexed set of overrides
pub fn resolve_indexed(
    date: NaiveDate,
    template: &ScheduleTemplate,
    overrides: &OverrideIndex<'_>,
) -> DaySchedule {
    if let Some(found) = overrides.get(date) {
        return DaySchedule {
            date,
            source: SlotSource::Override,
            slots: found.time_slots.clone(),
        };
    }

    if template.is_weekly_holiday(DayOfWeek::of(date)) {
        return DaySchedule {
            date,
            source: SlotSource::WeeklyHoliday,
            slots: Vec::new(),
        };
    }

    DaySchedule {
        date,
        source: SlotSource::Template,
        slots: template.slots(),
    }
}

/// Resolves one date, reporting which rule produced the slots
pub fn resolve_day(
    date: NaiveDate,
    template: &ScheduleTemplate,
    overrides: &[DailyOverride],
) -> DaySchedule {
    resolve_indexed(date, template, &OverrideIndex::new(overrides))
}

/// Effective bookable slots of a branch on `date`
///
/// Use [`crate::models::daily_override::date_key`] to turn a timestamp into
/// the UTC calendar date expected here.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use clinicdesk_core::{
///     models::{daily_override::DailyOverride, template::{DayOfWeek, ScheduleTemplate}},
///     resolver::resolve_slots_for_date,
///     time::parse_time,
/// };
///
/// let template = ScheduleTemplate::new(parse_time("09:00").unwrap(), parse_time("10:00").unwrap(), 30)
///     .with_weekly_holiday(DayOfWeek::Sunday);
/// let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let overrides = [DailyOverride::closed(monday)];
///
/// assert!(resolve_slots_for_date(sunday, &template, &overrides).is_empty());
/// assert!(resolve_slots_for_date(monday, &template, &overrides).is_empty());
/// assert_eq!(resolve_slots_for_date(monday.succ_opt().unwrap(), &template, &overrides).len(), 2);
/// ```
pub fn resolve_slots_for_date(
    date: NaiveDate,
    template: &ScheduleTemplate,
    overrides: &[DailyOverride],
) -> Vec<TimeOfDay> {
    resolve_day(date, template, overrides).slots
}

/// Resolves every day of `month`
pub fn resolve_month(
    month: YearMonth,
    template: &ScheduleTemplate,
    overrides: &[DailyOverride],
) -> Vec<DaySchedule> {
    let index = OverrideIndex::new(overrides);
    month
        .days()
        .map(|date| resolve_indexed(date, template, &index))
        .collect()
}
