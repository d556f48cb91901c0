//! # Cabinet API
//!
//! The API crate provides the web server behind the admin area of the cabinet
//! site. It exposes the appointment schedule, the site content editor, the
//! contact inbox and the dashboard to the admin holding the configured token.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Turn requests into commands and run them
//! - **Forms**: Read multipart content forms into validated commands
//! - **Images**: Store and remove uploaded images
//! - **Middleware**: Authentication and error mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Multipart form parsing for the content editor
pub mod forms;
/// Request handlers
pub mod handlers;
/// Uploaded image storage
pub mod images;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{http::HeaderValue, Router};
use cabinet_core::{
    gateway::{ContactGateway, ContentGateway, SlotGateway},
    planner::SlotPlanner,
};
use cabinet_db::repositories::{
    contact::PgContactGateway, content::PgContentGateway, slot::PgSlotGateway,
};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::images::{ImageStore, LocalImageStore, PUBLIC_PREFIX};

/// Shared application state that is accessible to all request handlers
///
/// Holds the database pool, the collaborators the admin operations talk to
/// and the settings they need. Tests swap the gateways for mocks and keep
/// images in a temporary directory.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Storage behind slot planning and deletion
    pub slots: Arc<dyn SlotGateway + Send + Sync>,
    /// Storage of the site texts and content lists
    pub content: Arc<dyn ContentGateway + Send + Sync>,
    /// Storage of the contact inbox
    pub contacts: Arc<dyn ContactGateway + Send + Sync>,
    /// Storage for uploaded images
    pub images: Arc<dyn ImageStore>,
    pub planner: SlotPlanner,
    /// Directory served under `/uploads`
    pub upload_dir: PathBuf,
    pub admin_token: String,
    pub admin_name: String,
}

impl ApiState {
    /// Builds the production state from the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configured slot duration is out of range.
    pub fn from_config(config: &config::ApiConfig, db_pool: PgPool) -> Result<Self> {
        let planner = SlotPlanner::new(config.slot_duration_minutes)?;

        Ok(Self {
            slots: Arc::new(PgSlotGateway::new(db_pool.clone())),
            content: Arc::new(PgContentGateway::new(db_pool.clone())),
            contacts: Arc::new(PgContactGateway::new(db_pool.clone())),
            images: Arc::new(LocalImageStore::new(config.upload_dir.clone())),
            db_pool,
            planner,
            upload_dir: config.upload_dir.clone(),
            admin_token: config.admin_token.clone(),
            admin_name: config.admin_name.clone(),
        })
    }
}

/// Builds the application router with all routes attached to the shared state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Admin dashboard
        .merge(routes::dashboard::routes())
        // Appointment slot management
        .merge(routes::schedule::routes())
        // Site content editor
        .merge(routes::content::routes())
        // Contact inbox
        .merge(routes::contacts::routes())
        // Uploaded images
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the API server with the provided configuration and database connection
///
/// This function prepares the upload directory, configures routes and
/// middleware, and serves HTTP until the process stops. The caller installs
/// the tracing subscriber.
///
/// # Example
///
/// ```rust,no_run
/// # async fn run() -> eyre::Result<()> {
/// let config = cabinet_api::config::ApiConfig::from_env()?;
/// let db_pool = cabinet_db::create_pool(&config.database_url).await?;
/// cabinet_api::start_server(config, db_pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = Arc::new(ApiState::from_config(&config, db_pool)?);
    let app = build_router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin {}", origin);
                    None
                }
            })
            .collect();

        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(allowed)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
