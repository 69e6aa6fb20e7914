//! # Daily Override Handlers
//!
//! Overrides replace the generated slots of a single date. They are listed
//! one month at a time, upserted by date and deleted to fall back to the
//! template again.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use clinicdesk_core::{
    errors::TimeError,
    models::daily_override::{parse_date_key, DailyOverride},
    month::YearMonth,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::{validate_branch_slug, MonthQuery};
use crate::{middleware::error_handling::AppError, ApiState};

/// Lists the overrides of a branch whose date falls in the requested month
pub async fn list_overrides(
    State(state): State<Arc<ApiState>>,
    Path(branch_slug): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<DailyOverride>>, AppError> {
    validate_branch_slug(&branch_slug)?;
    let month: YearMonth = query.month.parse()?;

    let overrides = state.store.get_overrides(&branch_slug, month).await?;

    debug!(branch = %branch_slug, %month, count = overrides.len(), "Loaded overrides");
    Ok(Json(overrides))
}

/// Creates or replaces the override for the date in the body
///
/// Slots are sorted and deduplicated before they are stored. An empty slot
/// list is stored as is and means the branch is closed that day.
pub async fn put_override(
    State(state): State<Arc<ApiState>>,
    Path(branch_slug): Path<String>,
    Json(daily_override): Json<DailyOverride>,
) -> Result<Json<DailyOverride>, AppError> {
    validate_branch_slug(&branch_slug)?;
    let daily_override = daily_override.normalized();

    let saved = state.store.put_override(&branch_slug, &daily_override).await?;

    info!(
        branch = %branch_slug,
        date = %saved.date,
        slots = saved.time_slots.len(),
        "Saved daily override"
    );
    Ok(Json(saved))
}

/// Removes the override of a date so the template applies again
///
/// The `date` segment accepts a bare `YYYY-MM-DD` or any RFC 3339 date-time.
pub async fn delete_override(
    State(state): State<Arc<ApiState>>,
    Path((branch_slug, date)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    validate_branch_slug(&branch_slug)?;
    let date = parse_date_key(&date)?;

    if !state.store.delete_override(&branch_slug, date).await? {
        return Err(TimeError::NotFound(format!(
            "Override for branch {} on {}",
            branch_slug, date
        ))
        .into());
    }

    info!(branch = %branch_slug, %date, "Deleted daily override");
    Ok(StatusCode::NO_CONTENT)
}
