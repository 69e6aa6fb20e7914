use crate::models::DbDailyOverride;
use chrono::{NaiveDate, Utc};
use clinicdesk_core::models::daily_override::DailyOverride;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_overrides_between(
    pool: &Pool<Postgres>,
    branch_slug: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbDailyOverride>> {
    let overrides = sqlx::query_as::<_, DbDailyOverride>(
        r#"
        SELECT branch_slug, date, time_slots, updated_at
        FROM daily_overrides
        WHERE branch_slug = $1 AND date >= $2 AND date <= $3
        ORDER BY date ASC
        "#,
    )
    .bind(branch_slug)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    tracing::debug!(
        "Loaded {} overrides for branch {} between {} and {}",
        overrides.len(), branch_slug, from, to
    );

    Ok(overrides)
}

/// Creates or replaces the override of one date; an empty slot list closes the day
pub async fn upsert_override(
    pool: &Pool<Postgres>,
    branch_slug: &str,
    daily_override: &DailyOverride,
) -> Result<DbDailyOverride> {
    let now = Utc::now();
    let time_slots: Vec<String> = daily_override
        .time_slots
        .iter()
        .map(ToString::to_string)
        .collect();

    let saved = sqlx::query_as::<_, DbDailyOverride>(
        r#"
        INSERT INTO daily_overrides (branch_slug, date, time_slots, updated_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (branch_slug, date)
        DO UPDATE SET time_slots = $3, updated_at = $4
        RETURNING branch_slug, date, time_slots, updated_at
        "#,
    )
    .bind(branch_slug)
    .bind(daily_override.date)
    .bind(&time_slots)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(saved)
}

/// Deletes the override of one date, returning whether one existed
pub async fn delete_override(
    pool: &Pool<Postgres>,
    branch_slug: &str,
    date: NaiveDate,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM daily_overrides
        WHERE branch_slug = $1 AND date = $2
        "#,
    )
    .bind(branch_slug)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
