//! # RoomSync API
//!
//! The API crate provides the web server implementation for the RoomSync
//! room-reservation service. It defines RESTful endpoints for managing
//! meeting rooms and the bookable time slots they expose.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework; persistence is reached through
//! the repository traits of `roomsync-db`, so handlers never touch SQL.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for logging and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use roomsync_db::repositories::{PgRoomRepository, PgSlotRepository, RoomRepository, SlotRepository};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// Handlers reach the store exclusively through these trait objects, so
/// tests can swap in the in-memory or mock repositories without touching
/// any route wiring.
pub struct ApiState {
    /// Room lookup and lifecycle store
    pub rooms: Arc<dyn RoomRepository>,
    /// Slot query and mutation store
    pub slots: Arc<dyn SlotRepository>,
}

impl ApiState {
    /// Builds the production state backed by the Postgres repositories.
    pub fn with_pool(db_pool: PgPool) -> Self {
        Self {
            rooms: Arc::new(PgRoomRepository::new(db_pool.clone())),
            slots: Arc::new(PgSlotRepository::new(db_pool)),
        }
    }
}

/// Builds the application router with all routes attached to the given
/// state.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Room management endpoints
        .merge(routes::room::routes())
        // Slot management and availability endpoints
        .merge(routes::slot::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes the application, sets up logging, configures routes,
/// and starts the HTTP server.
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool for database operations
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let db_pool = create_pool(&config.database_url).await?;
/// start_server(config, db_pool).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with the Postgres-backed repositories
    let app = app(Arc::new(ApiState::with_pool(db_pool)));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<axum::http::HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            ))
            .into_inner(),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
