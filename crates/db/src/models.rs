use chrono::{DateTime, NaiveDate, Utc};
use clinicdesk_core::{
    errors::{TimeError, TimeResult},
    models::{
        daily_override::DailyOverride,
        template::{DayOfWeek, ScheduleTemplate},
    },
    slots::ExcludedRange,
    time::parse_time,
};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleTemplate {
    pub branch_slug: String,
    pub start_time: String,
    pub end_time: String,
    pub interval_minutes: i32,
    pub excluded_times: Json<Vec<ExcludedRange>>,
    pub weekly_holidays: Vec<i16>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDailyOverride {
    pub branch_slug: String,
    pub date: NaiveDate,
    pub time_slots: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbScheduleTemplate> for ScheduleTemplate {
    type Error = TimeError;

    fn try_from(row: DbScheduleTemplate) -> TimeResult<Self> {
        let interval_minutes = u32::try_from(row.interval_minutes).map_err(|_| {
            TimeError::Validation(format!(
                "Stored interval for branch {} is negative: {}",
                row.branch_slug, row.interval_minutes
            ))
        })?;

        let weekly_holidays = row
            .weekly_holidays
            .iter()
            .map(|&day| {
                u8::try_from(day)
                    .ok()
                    .and_then(DayOfWeek::from_number)
                    .ok_or_else(|| {
                        TimeError::Validation(format!(
                            "Stored weekday for branch {} is out of range: {}",
                            row.branch_slug, day
                        ))
                    })
            })
            .collect::<TimeResult<_>>()?;

        Ok(ScheduleTemplate {
            start_time: parse_time(&row.start_time)?,
            end_time: parse_time(&row.end_time)?,
            interval_minutes,
            excluded_times: row.excluded_times.0,
            weekly_holidays,
        })
    }
}

impl TryFrom<DbDailyOverride> for DailyOverride {
    type Error = TimeError;

    fn try_from(row: DbDailyOverride) -> TimeResult<Self> {
        let slots = row
            .time_slots
            .iter()
            .map(|slot| parse_time(slot))
            .collect::<TimeResult<Vec<_>>>()?;

        Ok(DailyOverride::new(row.date, slots))
    }
}

/// Column values of a template, in the shape the repositories bind
pub(crate) struct TemplateColumns {
    pub start_time: String,
    pub end_time: String,
    pub interval_minutes: i32,
    pub excluded_times: Json<Vec<ExcludedRange>>,
    pub weekly_holidays: Vec<i16>,
}

impl TryFrom<&ScheduleTemplate> for TemplateColumns {
    type Error = TimeError;

    fn try_from(template: &ScheduleTemplate) -> TimeResult<Self> {
        let interval_minutes = i32::try_from(template.interval_minutes).map_err(|_| {
            TimeError::Validation(format!(
                "Interval of {} minutes cannot be stored",
                template.interval_minutes
            ))
        })?;

        Ok(Self {
            start_time: template.start_time.to_string(),
            end_time: template.end_time.to_string(),
            interval_minutes,
            excluded_times: Json(template.excluded_times.clone()),
            weekly_holidays: template
                .weekly_holidays
                .iter()
                .map(|day| i16::from(day.number()))
                .collect(),
        })
    }
}
