//! # SalonBook API
//!
//! The API crate provides the web server for the SalonBook booking service.
//! It exposes the appointment listing, booking creation, cancellation and
//! confirmation-notification endpoints.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate input, call the store and the notification dispatcher
//! - **Middleware**: Error to HTTP response mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence goes through
//! [`salonbook_db::store::AppointmentStore`] and notifications through
//! [`salonbook_notify::dispatcher::Dispatcher`].

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use eyre::Result;
use salonbook_db::store::{AppointmentStore, PgAppointmentStore};
use salonbook_notify::{config::NotifyConfig, dispatcher::Dispatcher};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Everything a handler needs is in here, including the configuration, so
/// no handler reads ambient process state.
pub struct ApiState {
    /// Appointment persistence
    pub store: Arc<dyn AppointmentStore>,
    /// Email / push / WhatsApp fan-out
    pub dispatcher: Dispatcher,
    /// Server configuration, including the development-mode flag
    pub config: config::ApiConfig,
}

/// Builds the application router with all routes and layers attached.
pub fn app(state: Arc<ApiState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout);
    let cors_origins = state.config.cors_origins.clone();

    let app = Router::new()
        // Day listing, creation and lookup
        .merge(routes::appointment::routes())
        // Cancellation and confirmation notifications
        .merge(routes::booking::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = match cors_origins {
        Some(origins) => {
            let origins = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect::<Vec<_>>();

            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(origins)
                .allow_credentials(true);

            app.layer(cors)
        }
        None => app,
    };

    app.layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes logging, builds the notification dispatcher,
/// configures routes, and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `notify_config` - Provider settings for the notification channels
/// * `db_pool` - PostgreSQL connection pool for database operations
pub async fn start_server(
    config: config::ApiConfig,
    notify_config: NotifyConfig,
    db_pool: PgPool,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if config.dev_mode {
        info!("Running in development mode");
    }

    let dispatcher =
        Dispatcher::from_config(&notify_config, config.dev_mode, config.provider_timeout())?;
    let addr = config.server_addr();

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        store: Arc::new(PgAppointmentStore::new(db_pool)),
        dispatcher,
        config,
    });

    // Start the HTTP server
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
