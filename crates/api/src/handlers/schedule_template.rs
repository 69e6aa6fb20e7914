//! # Schedule Template Handlers
//!
//! A branch owns at most one weekly template. It is replaced wholesale on
//! every save and a branch that never saved one answers 404, which the
//! dashboard treats as "prefill the defaults".

use axum::{
    extract::{Path, State},
    Json,
};
use clinicdesk_core::{errors::TimeError, models::template::ScheduleTemplate};
use std::sync::Arc;
use tracing::{debug, info};

use super::validate_branch_slug;
use crate::{middleware::error_handling::AppError, ApiState};

/// Returns the weekly template of a branch
///
/// # Errors
///
/// * `TimeError::NotFound` - The branch has not saved a template yet
/// * `TimeError::Persistence` - The store could not be read
pub async fn get_schedule_template(
    State(state): State<Arc<ApiState>>,
    Path(branch_slug): Path<String>,
) -> Result<Json<ScheduleTemplate>, AppError> {
    validate_branch_slug(&branch_slug)?;

    let template = state
        .store
        .get_template(&branch_slug)
        .await?
        .ok_or_else(|| {
            TimeError::NotFound(format!("Schedule template for branch {}", branch_slug))
        })?;

    debug!(branch = %branch_slug, "Loaded schedule template");
    Ok(Json(template))
}

/// Replaces the weekly template of a branch
///
/// The template is validated before it reaches the store, so an inverted
/// range or a zero interval is rejected with 400 and nothing is written.
pub async fn put_schedule_template(
    State(state): State<Arc<ApiState>>,
    Path(branch_slug): Path<String>,
    Json(template): Json<ScheduleTemplate>,
) -> Result<Json<ScheduleTemplate>, AppError> {
    validate_branch_slug(&branch_slug)?;
    template.validate()?;

    let saved = state.store.put_template(&branch_slug, &template).await?;

    info!(
        branch = %branch_slug,
        start = %saved.start_time,
        end = %saved.end_time,
        interval = saved.interval_minutes,
        "Saved schedule template"
    );
    Ok(Json(saved))
}
