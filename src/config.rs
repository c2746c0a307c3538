//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `MEDIA_RELAY_BASE_URL` (optional): base URL of the public media relay,
///   used to build stream URLs for live sessions
/// - `LIVE_LINK_BASE_URL` (optional): public base URL of this server, used
///   to build the magic link sent to customers
/// - `NOTIFY_ENDPOINT_URL` (optional): external notification endpoint;
///   when unset, notification dispatch is disabled entirely
/// - `NOTIFY_SECRET` (optional): HMAC key for signing notification payloads
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_media_relay_base_url")]
    pub media_relay_base_url: String,

    #[serde(default = "default_live_link_base_url")]
    pub live_link_base_url: String,

    pub notify_endpoint_url: Option<String>,

    pub notify_secret: Option<String>,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default media relay base when MEDIA_RELAY_BASE_URL is not set.
///
/// Points at a local relay instance, matching the development setup.
/// Production deployments always override this.
fn default_media_relay_base_url() -> String {
    "http://localhost:8888".to_string()
}

/// Default public base for magic links when LIVE_LINK_BASE_URL is not set.
fn default_live_link_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
