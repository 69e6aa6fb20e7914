use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/branches/:slug/schedule-template",
            get(handlers::schedule_template::get_schedule_template)
                .put(handlers::schedule_template::put_schedule_template),
        )
        .route(
            "/api/branches/:slug/schedule-overrides",
            get(handlers::daily_override::list_overrides)
                .put(handlers::daily_override::put_override),
        )
        .route(
            "/api/branches/:slug/schedule-overrides/:date",
            delete(handlers::daily_override::delete_override),
        )
        .route(
            "/api/branches/:slug/availability",
            get(handlers::availability::month_availability),
        )
}
