use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One weekly template per branch, replaced wholesale on save
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_templates (
            branch_slug VARCHAR(255) PRIMARY KEY,
            start_time CHAR(5) NOT NULL,
            end_time CHAR(5) NOT NULL,
            interval_minutes INTEGER NOT NULL,
            excluded_times JSONB NOT NULL DEFAULT '[]'::jsonb,
            weekly_holidays SMALLINT[] NOT NULL DEFAULT '{}',
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_hours CHECK (end_time > start_time),
            CONSTRAINT positive_interval CHECK (interval_minutes BETWEEN 1 AND 1440)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one override per branch and date; empty time_slots = closed
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_overrides (
            branch_slug VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            time_slots TEXT[] NOT NULL DEFAULT '{}',
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (branch_slug, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_daily_overrides_date ON daily_overrides(date);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
