//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SalonBook API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `APP_ENV`: `development` turns on development mode (notifications are only logged)
//! - `CANCEL_REDIRECT_PATH`: Where clients go after cancelling (default: "/booking/cancelled")

use eyre::{Result, WrapErr};
use salonbook_notify::dispatcher::DEFAULT_PROVIDER_TIMEOUT;
use std::{env, time::Duration};
use tracing::Level;
use uuid::Uuid;

pub const DEFAULT_CANCEL_REDIRECT_PATH: &str = "/booking/cancelled";

/// Configuration for the SalonBook API server
///
/// Loaded once at startup and handed to the request handlers through
/// [`crate::ApiState`]; handlers never read the process environment.
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use salonbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
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

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Development mode: notifications are logged instead of delivered
    pub dev_mode: bool,

    /// Redirect target returned after a cancellation
    pub cancel_redirect_path: String,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL environment variable is not set
    /// - The API_PORT value cannot be parsed as a u16
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reads variables through `lookup`.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
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
            .ok_or_else(|| eyre::eyre!("DATABASE_URL environment variable must be set"))?;

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
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

        // Performance settings
        let request_timeout = lookup("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .ok()
            .filter(|seconds| *seconds > 0)
            .unwrap_or(30);

        // Environment
        let dev_mode = lookup("APP_ENV")
            .map(|env| env.trim().eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let cancel_redirect_path = lookup("CANCEL_REDIRECT_PATH")
            .map(|path| path.trim().to_string())
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_CANCEL_REDIRECT_PATH.to_string());

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            dev_mode,
            cancel_redirect_path,
        })
    }

    /// Returns the server address as a string
    ///
    /// # Returns
    ///
    /// * `String` - Formatted server address (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Where a client is sent after cancelling `id`.
    ///
    /// The id is appended as the `appointmentId` query parameter, after any
    /// query the configured path already carries.
    pub fn cancel_redirect_url(&self, id: Uuid) -> String {
        let separator = if self.cancel_redirect_path.contains('?') { '&' } else { '?' };
        format!("{}{}appointmentId={}", self.cancel_redirect_path, separator, id)
    }

    /// Timeout for each notification provider request.
    ///
    /// Kept to three quarters of the request timeout (and never above
    /// [`DEFAULT_PROVIDER_TIMEOUT`]) so a hanging provider is reported as a
    /// failed channel before the request itself times out.
    pub fn provider_timeout(&self) -> Duration {
        let budget = Duration::from_millis(self.request_timeout.saturating_mul(750));
        budget.min(DEFAULT_PROVIDER_TIMEOUT)
    }
}
