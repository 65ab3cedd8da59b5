//! # Clinicare API
//!
//! The API crate provides the web server for the Clinicare clinic-management
//! backend. It exposes RESTful endpoints for user accounts, patients,
//! appointments, doctor availability, inventory, prescriptions and reports.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Path and query extractors with JSON rejections
pub mod extract;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration as StdDuration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use chrono::Duration;
use clinicare_core::availability::AvailabilityCalculator;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::TokenSettings;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use clinicare_api::{ApiState, build_router, middleware::auth::TokenSettings};
/// # use clinicare_core::availability::AvailabilityCalculator;
/// # async fn example(db_pool: sqlx::PgPool) {
/// let state = Arc::new(ApiState {
///     db_pool,
///     tokens: TokenSettings::new("secret", chrono::Duration::hours(1), chrono::Duration::days(1)),
///     availability: AvailabilityCalculator::default(),
/// });
/// let app = build_router(state);
/// # }
/// ```
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Token signing secret and lifetimes
    pub tokens: TokenSettings,

    /// Slot calculator configured with the clinic's working window
    pub availability: AvailabilityCalculator,
}

impl ApiState {
    pub fn from_config(config: &config::ApiConfig, db_pool: PgPool) -> Self {
        Self {
            db_pool,
            tokens: TokenSettings::new(
                config.jwt_secret.clone(),
                Duration::minutes(config.access_token_ttl_minutes),
                Duration::hours(config.refresh_token_ttl_hours),
            ),
            availability: AvailabilityCalculator::new(config.working_window),
        }
    }
}

/// Builds the application router
///
/// Health, version, module listing and token endpoints are public; every
/// other route sits behind [`middleware::auth::require_auth`].
pub fn build_router(state: Arc<ApiState>) -> Router {
    let protected = Router::new()
        // User account management
        .merge(routes::users::routes())
        // Patient records
        .merge(routes::patients::routes())
        // Appointment scheduling
        .merge(routes::appointments::routes())
        // Doctor availability
        .merge(routes::doctors::routes())
        // Medicine stock
        .merge(routes::inventory::routes())
        // Prescriptions
        .merge(routes::prescriptions::routes())
        // Aggregate reports
        .merge(routes::reports::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Health check and module listing endpoints
        .merge(routes::health::routes())
        // Token issuing endpoints
        .merge(routes::auth::routes())
        .merge(protected)
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState::from_config(&config, db_pool));

    info!(
        "Availability window {}-{} every {} minutes",
        config.working_window.start().format("%H:%M"),
        config.working_window.end().format("%H:%M"),
        config.working_window.step().num_minutes()
    );

    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(StdDuration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
