//! # Schedule store
//!
//! The persistence seam used by the API. Handlers depend on the
//! [`ScheduleStore`] trait so they can be exercised against a mock; the
//! PostgreSQL implementation delegates to the repository functions and
//! converts rows into domain values.

use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::{
    models::{daily_override::DailyOverride, template::ScheduleTemplate},
    month::YearMonth,
};
use eyre::{Result, WrapErr};

use crate::{repositories, DbPool};

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Template of a branch, `None` when the branch has not configured one yet
    async fn get_template(&self, branch_slug: &str) -> Result<Option<ScheduleTemplate>>;

    /// Replaces the branch's template and returns what was stored
    async fn put_template(
        &self,
        branch_slug: &str,
        template: &ScheduleTemplate,
    ) -> Result<ScheduleTemplate>;

    /// Overrides of a branch whose date falls in `month`, ordered by date
    async fn get_overrides(&self, branch_slug: &str, month: YearMonth)
        -> Result<Vec<DailyOverride>>;

    /// Creates or replaces the override for `daily_override.date`
    async fn put_override(
        &self,
        branch_slug: &str,
        daily_override: &DailyOverride,
    ) -> Result<DailyOverride>;

    /// Removes the override of `date`, returning whether one existed
    async fn delete_override(&self, branch_slug: &str, date: NaiveDate) -> Result<bool>;
}

/// [`ScheduleStore`] backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn get_template(&self, branch_slug: &str) -> Result<Option<ScheduleTemplate>> {
        let row = repositories::schedule_template::get_template_by_branch(&self.pool, branch_slug)
            .await?;

        row.map(ScheduleTemplate::try_from)
            .transpose()
            .wrap_err_with(|| format!("Stored template for branch {} is corrupt", branch_slug))
    }

    async fn put_template(
        &self,
        branch_slug: &str,
        template: &ScheduleTemplate,
    ) -> Result<ScheduleTemplate> {
        let row =
            repositories::schedule_template::upsert_template(&self.pool, branch_slug, template)
                .await?;

        Ok(ScheduleTemplate::try_from(row)?)
    }

    async fn get_overrides(
        &self,
        branch_slug: &str,
        month: YearMonth,
    ) -> Result<Vec<DailyOverride>> {
        let rows = repositories::daily_override::get_overrides_between(
            &self.pool,
            branch_slug,
            month.first_day(),
            month.last_day(),
        )
        .await?;

        rows.into_iter()
            .map(|row| DailyOverride::try_from(row).map_err(eyre::Report::from))
            .collect::<Result<Vec<_>>>()
            .wrap_err_with(|| format!("Stored overrides for branch {} are corrupt", branch_slug))
    }

    async fn put_override(
        &self,
        branch_slug: &str,
        daily_override: &DailyOverride,
    ) -> Result<DailyOverride> {
        let row =
            repositories::daily_override::upsert_override(&self.pool, branch_slug, daily_override)
                .await?;

        Ok(DailyOverride::try_from(row)?)
    }

    async fn delete_override(&self, branch_slug: &str, date: NaiveDate) -> Result<bool> {
        repositories::daily_override::delete_override(&self.pool, branch_slug, date).await
    }
}
