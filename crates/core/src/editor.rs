//! # Schedule editors
//!
//! Local, unsaved editing state behind the two scheduling pages:
//!
//! - [`TemplateDraft`] backs the bulk editor. It keeps the form's values and
//!   offers a live slot preview that is defined even while the form is
//!   half-filled.
//! - [`DayEditor`] backs the per-day dialog of the calendar. It is seeded
//!   from an override or from the template, collects edits, and turns into
//!   the [`DailyOverride`] that gets saved.
//!
//! Neither type talks to the backend. A failed save leaves them untouched so
//! the user can retry.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{
    errors::TimeResult,
    models::{
        daily_override::DailyOverride,
        template::{DayOfWeek, ScheduleTemplate},
    },
    resolver::{resolve_day, SlotSource},
    slots::{generate_slots, ExcludedRange},
    time::{parse_time, TimeOfDay},
};

/// Editable form state of a branch's weekly template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    start_time: TimeOfDay,
    end_time: TimeOfDay,
    interval_minutes: u32,
    excluded_times: Vec<ExcludedRange>,
    weekly_holidays: BTreeSet<DayOfWeek>,
}

impl TemplateDraft {
    /// Prefills the form from a saved template, or from defaults when the
    /// branch has none yet
    pub fn from_template(template: Option<&ScheduleTemplate>) -> Self {
        let template = template.cloned().unwrap_or_default();
        Self {
            start_time: template.start_time,
            end_time: template.end_time,
            interval_minutes: template.interval_minutes,
            excluded_times: template.excluded_times,
            weekly_holidays: template.weekly_holidays,
        }
    }

    pub fn set_start_time(&mut self, raw: &str) -> TimeResult<()> {
        self.start_time = parse_time(raw)?;
        Ok(())
    }

    pub fn set_end_time(&mut self, raw: &str) -> TimeResult<()> {
        self.end_time = parse_time(raw)?;
        Ok(())
    }

    pub fn set_interval_minutes(&mut self, minutes: u32) {
        self.interval_minutes = minutes;
    }

    /// Adds an excluded range such as a lunch break
    ///
    /// Both ends must parse and the range must not be empty; on error the
    /// draft is unchanged.
    pub fn add_excluded(&mut self, start: &str, end: &str) -> TimeResult<()> {
        let range = ExcludedRange::new(parse_time(start)?, parse_time(end)?)?;
        if !self.excluded_times.contains(&range) {
            self.excluded_times.push(range);
        }
        Ok(())
    }

    pub fn remove_excluded(&mut self, index: usize) -> Option<ExcludedRange> {
        (index < self.excluded_times.len()).then(|| self.excluded_times.remove(index))
    }

    pub fn toggle_weekly_holiday(&mut self, day: DayOfWeek) {
        if !self.weekly_holidays.remove(&day) {
            self.weekly_holidays.insert(day);
        }
    }

    pub fn excluded_times(&self) -> &[ExcludedRange] {
        &self.excluded_times
    }

    pub fn weekly_holidays(&self) -> &BTreeSet<DayOfWeek> {
        &self.weekly_holidays
    }

    /// Slots a regular day would get with the current form values
    ///
    /// Empty while the range is inverted or the interval is zero.
    pub fn preview(&self) -> Vec<TimeOfDay> {
        generate_slots(
            self.start_time,
            self.end_time,
            self.interval_minutes,
            &self.excluded_times,
        )
    }

    /// Validates the draft into a template ready to be saved
    pub fn build(&self) -> TimeResult<ScheduleTemplate> {
        let template = ScheduleTemplate {
            start_time: self.start_time,
            end_time: self.end_time,
            interval_minutes: self.interval_minutes,
            excluded_times: self.excluded_times.clone(),
            weekly_holidays: self.weekly_holidays.clone(),
        };
        template.validate()?;
        Ok(template)
    }
}

/// Where a [`DayEditor`]'s initial slot list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOrigin {
    /// An override already existed for the date
    Override,
    /// No override existed; seeded from the template (empty on a weekly holiday)
    Template,
}

/// Unsaved slot list of a single date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEditor {
    date: NaiveDate,
    origin: DayOrigin,
    template_slots: Vec<TimeOfDay>,
    slots: BTreeSet<TimeOfDay>,
    dirty: bool,
}

impl DayEditor {
    /// Seeds the editor for `date` from its override if one exists,
    /// otherwise from what the template yields on that date
    pub fn open(date: NaiveDate, template: &ScheduleTemplate, overrides: &[DailyOverride]) -> Self {
        let resolved = resolve_day(date, template, overrides);
        let origin = match resolved.source {
            SlotSource::Override => DayOrigin::Override,
            SlotSource::WeeklyHoliday | SlotSource::Template => DayOrigin::Template,
        };

        Self {
            date,
            origin,
            template_slots: template.slots(),
            slots: resolved.slots.into_iter().collect(),
            dirty: false,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn origin(&self) -> DayOrigin {
        self.origin
    }

    /// Current slots in ascending order
    pub fn slots(&self) -> Vec<TimeOfDay> {
        self.slots.iter().copied().collect()
    }

    /// True when there are local edits that have not been saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Adds a manually typed slot
    ///
    /// # Errors
    ///
    /// `TimeError::InvalidTimeFormat` when `raw` is not `HH:MM`; the slot list
    /// is left unchanged.
    pub fn add_slot(&mut self, raw: &str) -> TimeResult<TimeOfDay> {
        let time = parse_time(raw)?;
        if self.slots.insert(time) {
            self.dirty = true;
        }
        Ok(time)
    }

    /// Removes a slot, returning whether it was present
    pub fn remove_slot(&mut self, time: TimeOfDay) -> bool {
        let removed = self.slots.remove(&time);
        self.dirty |= removed;
        removed
    }

    /// Closes the day: no bookable slots
    pub fn clear(&mut self) {
        if !self.slots.is_empty() {
            self.slots.clear();
            self.dirty = true;
        }
    }

    /// Replaces the list with the template's slots
    ///
    /// The weekly holiday is not applied here: resetting asks for the
    /// template's hours on this date. Saving afterwards still writes an
    /// override; only deleting the override returns the date to pure
    /// template behavior.
    pub fn reset_to_template(&mut self) {
        let template: BTreeSet<TimeOfDay> = self.template_slots.iter().copied().collect();
        if template != self.slots {
            self.slots = template;
            self.dirty = true;
        }
    }

    /// The override this editor would save
    pub fn to_override(&self) -> DailyOverride {
        DailyOverride::new(self.date, self.slots.iter().copied())
    }

    /// Records a successful save
    pub fn mark_saved(&mut self) {
        self.origin = DayOrigin::Override;
        self.dirty = false;
    }
}
