//! # Calendar month view
//!
//! Loads what the calendar page needs for one branch and month, and saves
//! the results of the template and day editors.
//!
//! Reads fall back instead of failing: a missing or unreadable template is
//! replaced by [`ScheduleTemplate::default`] and unreadable overrides by an
//! empty list, so the calendar can always render. Writes report their error
//! and leave the editor untouched so the user can retry.

use chrono::NaiveDate;
use clinicdesk_core::{
    editor::{DayEditor, TemplateDraft},
    errors::TimeResult,
    models::{daily_override::DailyOverride, template::ScheduleTemplate},
    month::YearMonth,
    resolver::{resolve_month, DaySchedule},
};
use tracing::{info, warn};

use crate::client::ScheduleClient;

/// One branch's month as shown on the calendar page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub branch_slug: String,
    pub month: YearMonth,
    pub template: ScheduleTemplate,
    /// False when `template` is the default because none was saved or it could not be read
    pub template_configured: bool,
    pub overrides: Vec<DailyOverride>,
    pub days: Vec<DaySchedule>,
}

impl MonthView {
    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule> {
        self.days.iter().find(|day| day.date == date)
    }

    /// Day editor seeded from this view's template and overrides
    pub fn open_day(&self, date: NaiveDate) -> DayEditor {
        DayEditor::open(date, &self.template, &self.overrides)
    }

    /// Template form prefilled with the saved template, or defaults
    pub fn template_draft(&self) -> TemplateDraft {
        TemplateDraft::from_template(self.template_configured.then_some(&self.template))
    }
}

/// Reads the template and the month's overrides concurrently and resolves every day
pub async fn load_month_view(
    client: &ScheduleClient,
    branch_slug: &str,
    month: YearMonth,
) -> MonthView {
    let (template, overrides) = tokio::join!(
        client.get_template(branch_slug),
        client.get_overrides(branch_slug, month),
    );

    let (template, template_configured) = match template {
        Ok(Some(template)) => (template, true),
        Ok(None) => (ScheduleTemplate::default(), false),
        Err(err) => {
            warn!(branch = branch_slug, "Falling back to default template: {}", err);
            (ScheduleTemplate::default(), false)
        }
    };

    let overrides = overrides.unwrap_or_else(|err| {
        warn!(branch = branch_slug, %month, "Showing month without overrides: {}", err);
        Vec::new()
    });

    let days = resolve_month(month, &template, &overrides);

    MonthView {
        branch_slug: branch_slug.to_string(),
        month,
        template,
        template_configured,
        overrides,
        days,
    }
}

/// Validates the draft and replaces the branch's template with it
///
/// Nothing is sent when the draft does not build.
pub async fn save_template(
    client: &ScheduleClient,
    branch_slug: &str,
    draft: &TemplateDraft,
) -> TimeResult<ScheduleTemplate> {
    let template = draft.build()?;
    let saved = client.put_template(branch_slug, &template).await?;

    info!(branch = branch_slug, "Saved schedule template");
    Ok(saved)
}

/// Stores the editor's slots as the override of its date
///
/// The editor is marked saved only once the server accepted the write. An
/// empty slot list closes the day.
pub async fn save_day(
    client: &ScheduleClient,
    branch_slug: &str,
    editor: &mut DayEditor,
) -> TimeResult<DailyOverride> {
    let saved = client.put_override(branch_slug, &editor.to_override()).await?;
    editor.mark_saved();

    info!(
        branch = branch_slug,
        date = %saved.date,
        slots = saved.time_slots.len(),
        "Saved day"
    );
    Ok(saved)
}

/// Deletes the override of `date` so the template applies again
pub async fn revert_day(
    client: &ScheduleClient,
    branch_slug: &str,
    date: NaiveDate,
) -> TimeResult<bool> {
    let removed = client.delete_override(branch_slug, date).await?;

    if removed {
        info!(branch = branch_slug, %date, "Reverted day to template");
    }
    Ok(removed)
}
