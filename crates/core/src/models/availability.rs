use serde::{Deserialize, Serialize};

use crate::{month::YearMonth, resolver::DaySchedule};

/// Resolved slots of every day in a month for one branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthAvailability {
    pub branch_slug: String,
    pub month: YearMonth,
    /// False when the branch has no saved template and defaults were used
    pub template_configured: bool,
    pub days: Vec<DaySchedule>,
}
