use crate::models::{DbScheduleTemplate, TemplateColumns};
use chrono::Utc;
use clinicdesk_core::models::template::ScheduleTemplate;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_template_by_branch(
    pool: &Pool<Postgres>,
    branch_slug: &str,
) -> Result<Option<DbScheduleTemplate>> {
    tracing::debug!("Getting schedule template for branch: {}", branch_slug);

    let template = sqlx::query_as::<_, DbScheduleTemplate>(
        r#"
        SELECT branch_slug, start_time, end_time, interval_minutes,
               excluded_times, weekly_holidays, updated_at
        FROM schedule_templates
        WHERE branch_slug = $1
        "#,
    )
    .bind(branch_slug)
    .fetch_optional(pool)
    .await?;

    if template.is_none() {
        tracing::debug!("No schedule template configured for branch: {}", branch_slug);
    }

    Ok(template)
}

/// Replaces the branch's template wholesale; concurrent saves are last-write-wins
pub async fn upsert_template(
    pool: &Pool<Postgres>,
    branch_slug: &str,
    template: &ScheduleTemplate,
) -> Result<DbScheduleTemplate> {
    let columns = TemplateColumns::try_from(template)?;
    let now = Utc::now();

    tracing::debug!(
        "Saving schedule template: branch={}, hours={}-{}, interval={}",
        branch_slug, columns.start_time, columns.end_time, columns.interval_minutes
    );

    let saved = sqlx::query_as::<_, DbScheduleTemplate>(
        r#"
        INSERT INTO schedule_templates
            (branch_slug, start_time, end_time, interval_minutes,
             excluded_times, weekly_holidays, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (branch_slug)
        DO UPDATE SET start_time = $2, end_time = $3, interval_minutes = $4,
                      excluded_times = $5, weekly_holidays = $6, updated_at = $7
        RETURNING branch_slug, start_time, end_time, interval_minutes,
                  excluded_times, weekly_holidays, updated_at
        "#,
    )
    .bind(branch_slug)
    .bind(&columns.start_time)
    .bind(&columns.end_time)
    .bind(columns.interval_minutes)
    .bind(&columns.excluded_times)
    .bind(&columns.weekly_holidays)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}
