//! # Availability Handlers
//!
//! Resolves the bookable slots of every day in a month for one branch.
//!
//! The template and the month's overrides are read concurrently, then each
//! date is resolved in priority order:
//!
//! 1. An override for the date wins, even when its slot list is empty
//! 2. A weekly holiday yields no slots
//! 3. Otherwise the template's generated slots apply
//!
//! A branch without a saved template is resolved against the default
//! template and reported with `templateConfigured: false`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use clinicdesk_core::{
    models::availability::MonthAvailability,
    month::YearMonth,
    resolver::resolve_month,
};
use std::sync::Arc;
use tracing::debug;

use super::{validate_branch_slug, MonthQuery};
use crate::{middleware::error_handling::AppError, ApiState};

/// Computes the month availability of a branch
pub async fn month_availability(
    State(state): State<Arc<ApiState>>,
    Path(branch_slug): Path<String>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthAvailability>, AppError> {
    validate_branch_slug(&branch_slug)?;
    let month: YearMonth = query.month.parse()?;

    let (template, overrides) = tokio::try_join!(
        state.store.get_template(&branch_slug),
        state.store.get_overrides(&branch_slug, month),
    )?;

    let template_configured = template.is_some();
    let template = template.unwrap_or_default();
    let days = resolve_month(month, &template, &overrides);

    debug!(
        branch = %branch_slug,
        %month,
        overrides = overrides.len(),
        template_configured,
        "Resolved month availability"
    );

    Ok(Json(MonthAvailability {
        branch_slug,
        month,
        template_configured,
        days,
    }))
}

