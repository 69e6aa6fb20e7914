use async_trait::async_trait;
use chrono::NaiveDate;
use clinicdesk_core::{
    models::{daily_override::DailyOverride, template::ScheduleTemplate},
    month::YearMonth,
};
use mockall::mock;

use crate::store::ScheduleStore;

// Mock store for handler and client tests
mock! {
    pub ScheduleStore {}

    #[async_trait]
    impl ScheduleStore for ScheduleStore {
        async fn get_template(&self, branch_slug: &str) -> eyre::Result<Option<ScheduleTemplate>>;

        async fn put_template(
            &self,
            branch_slug: &str,
            template: &ScheduleTemplate,
        ) -> eyre::Result<ScheduleTemplate>;

        async fn get_overrides(
            &self,
            branch_slug: &str,
            month: YearMonth,
        ) -> eyre::Result<Vec<DailyOverride>>;

        async fn put_override(
            &self,
            branch_slug: &str,
            daily_override: &DailyOverride,
        ) -> eyre::Result<DailyOverride>;

        async fn delete_override(&self, branch_slug: &str, date: NaiveDate) -> eyre::Result<bool>;
    }
}
