//! # ClinicDesk API
//!
//! The API crate provides the web server for ClinicDesk branch scheduling.
//! It exposes the schedule template and daily override resources that the
//! administration dashboard edits, plus a computed month availability view.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping and request timeouts
//! - **Config**: Handle environment and application configuration
//!
//! Handlers talk to persistence only through [`ScheduleStore`], so the
//! router can be served against PostgreSQL or a mock.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling and timeouts
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use clinicdesk_db::ScheduleStore;
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::error_handling::handle_timeout_error;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(PgScheduleStore::new(pool));
/// let app = clinicdesk_api::app(Arc::new(ApiState { store }));
/// ```
pub struct ApiState {
    /// Where templates and overrides are read from and written to
    pub store: Arc<dyn ScheduleStore>,
}

/// Builds the application router with all routes and the shared state
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Template, override and availability endpoints
        .merge(routes::schedule::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// This function sets up logging, builds the router, applies the CORS,
/// timeout and trace layers, and serves until the listener fails.
///
/// # Example
///
/// ```rust,ignore
/// let config = ApiConfig::from_env()?;
/// let pool = clinicdesk_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// start_server(config, Arc::new(PgScheduleStore::new(pool))).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn ScheduleStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = app(Arc::new(ApiState { store }));

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)),
        None => app,
    };

    // Add request timeout and tracing middleware
    let app = app
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(config.request_timeout)),
        )
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}
