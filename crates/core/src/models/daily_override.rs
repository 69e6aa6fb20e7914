use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::{TimeError, TimeResult},
    time::TimeOfDay,
};

/// Replacement slot list for one branch on one calendar date
///
/// An empty `time_slots` list means the branch is closed that day, regardless
/// of its template or weekly holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOverride {
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub time_slots: Vec<TimeOfDay>,
}

impl DailyOverride {
    /// Builds an override, sorting the slots and dropping duplicates
    pub fn new(date: NaiveDate, time_slots: impl IntoIterator<Item = TimeOfDay>) -> Self {
        let mut time_slots: Vec<TimeOfDay> = time_slots.into_iter().collect();
        time_slots.sort_unstable();
        time_slots.dedup();
        Self { date, time_slots }
    }

    /// An explicit "closed all day" override
    pub fn closed(date: NaiveDate) -> Self {
        Self {
            date,
            time_slots: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.time_slots.is_empty()
    }

    /// Re-establishes the ordered, duplicate-free slot invariant after deserialization
    pub fn normalized(self) -> Self {
        Self::new(self.date, self.time_slots)
    }
}

/// Calendar date of a UTC timestamp, dropping the time of day
pub fn date_key(at: DateTime<Utc>) -> NaiveDate {
    at.date_naive()
}

/// Parses a date as sent by the dashboard
///
/// Accepts an RFC 3339 date-time (converted to UTC before the time of day is
/// dropped) or a bare `YYYY-MM-DD`.
pub fn parse_date_key(raw: &str) -> TimeResult<NaiveDate> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(date_key(at.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| TimeError::Validation(format!("Invalid date: {:?}", raw)))
}

/// Renders a date as midnight UTC, e.g. `2025-03-09T00:00:00.000Z`
pub fn format_date_key(date: NaiveDate) -> String {
    date.and_time(NaiveTime::default())
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for dates stored as midnight-UTC date-times
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date_key(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date_key(&raw).map_err(serde::de::Error::custom)
    }
}
