//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Cabinet API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `ADMIN_TOKEN`: Bearer token expected on every admin request (required)
//! - `ADMIN_NAME`: Name recorded for the admin in logs (default: "admin")
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `UPLOAD_DIR`: Directory where uploaded images are stored (default: "./public/uploads")
//! - `SLOT_DURATION_MINUTES`: Length of generated appointment slots (default: 30)

use std::{env, path::PathBuf};

use cabinet_core::planner::DEFAULT_SLOT_MINUTES;
use eyre::{eyre, Result, WrapErr};
use tracing::Level;

/// Configuration for the Cabinet API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use cabinet_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Bearer token protecting the admin endpoints
    pub admin_token: String,

    /// Name of the admin the token belongs to
    pub admin_name: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Root directory for uploaded images
    pub upload_dir: PathBuf,

    /// Length of a generated appointment slot, in minutes
    pub slot_duration_minutes: i64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `ADMIN_TOKEN` is not set
    /// - `API_PORT` cannot be parsed as a u16
    /// - `SLOT_DURATION_MINUTES` cannot be parsed as an integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("API_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Security settings
        let admin_token = lookup("ADMIN_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| eyre!("ADMIN_TOKEN environment variable must be set"))?;
        let admin_name = lookup("ADMIN_NAME").unwrap_or_else(|| "admin".to_string());

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        // Content settings
        let upload_dir = lookup("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./public/uploads"));

        // Scheduling settings
        let slot_duration_minutes = match lookup("SLOT_DURATION_MINUTES") {
            Some(value) => value
                .parse()
                .wrap_err("Invalid SLOT_DURATION_MINUTES value")?,
            None => DEFAULT_SLOT_MINUTES,
        };

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            admin_token,
            admin_name,
            request_timeout,
            upload_dir,
            slot_duration_minutes,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
