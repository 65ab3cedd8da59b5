//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Clinicare API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 8000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `JWT_SECRET`: Secret key used to sign access and refresh tokens (required)
//! - `JWT_ACCESS_TTL_MINUTES`: Access token lifetime (default: 60)
//! - `JWT_REFRESH_TTL_HOURS`: Refresh token lifetime (default: 24)
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//! - `WORKING_DAY_START`: First appointment slot of the day (default: "09:00")
//! - `WORKING_DAY_END`: End of the working day, exclusive (default: "17:00")
//! - `SLOT_MINUTES`: Appointment slot length (default: 30)

use clinicare_core::availability::{WorkingWindow, parse_time_of_day};
use eyre::{Result, WrapErr, eyre};
use std::env;
use tracing::Level;

/// Configuration for the Clinicare API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use clinicare_api::config::ApiConfig;
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

    /// HS256 secret for signing tokens
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub access_token_ttl_minutes: i64,

    /// Refresh token lifetime in hours
    pub refresh_token_ttl_hours: i64,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Daily window used to compute doctor availability
    pub working_window: WorkingWindow,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `JWT_SECRET` is not set
    /// - `API_PORT` cannot be parsed as a u16
    /// - the working window variables do not describe a valid window
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Security settings
        let jwt_secret =
            env::var("JWT_SECRET").wrap_err("JWT_SECRET environment variable must be set")?;
        if jwt_secret.is_empty() {
            return Err(eyre!("JWT_SECRET must not be empty"));
        }
        let access_token_ttl_minutes = env::var("JWT_ACCESS_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .wrap_err("Invalid JWT_ACCESS_TTL_MINUTES value")?;
        let refresh_token_ttl_hours = env::var("JWT_REFRESH_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .wrap_err("Invalid JWT_REFRESH_TTL_HOURS value")?;

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Scheduling settings
        let working_window = parse_working_window(
            &env::var("WORKING_DAY_START").unwrap_or_else(|_| "09:00".to_string()),
            &env::var("WORKING_DAY_END").unwrap_or_else(|_| "17:00".to_string()),
            &env::var("SLOT_MINUTES").unwrap_or_else(|_| "30".to_string()),
        )?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            jwt_secret,
            access_token_ttl_minutes,
            refresh_token_ttl_hours,
            request_timeout,
            working_window,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Maps a `LOG_LEVEL` value to a tracing level, defaulting to INFO
pub fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Builds the availability window from its textual settings
pub fn parse_working_window(start: &str, end: &str, slot_minutes: &str) -> Result<WorkingWindow> {
    let start = parse_time_of_day(start).wrap_err("Invalid WORKING_DAY_START value")?;
    let end = parse_time_of_day(end).wrap_err("Invalid WORKING_DAY_END value")?;
    let slot_minutes = slot_minutes
        .trim()
        .parse()
        .wrap_err("Invalid SLOT_MINUTES value")?;

    let window = WorkingWindow::new(start, end, slot_minutes)?;
    Ok(window)
}
