//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. The LLM backend credentials end up in an
//! explicit [`ProviderSettings`] value so the provider selector can be
//! constructed (and tested) without touching the environment itself.

use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Credential and model choice for one LLM backend.
#[derive(Clone, Debug)]
pub struct BackendSettings {
    pub api_key: String,
    pub model: String,
}

/// Which LLM backends are enabled, with their settings.
///
/// A `None` means the credential was absent at startup: that backend is
/// not instantiated and never probed. All three absent is a valid (if
/// useless) configuration; generation then always fails with a
/// no-provider error.
#[derive(Clone, Debug, Default)]
pub struct ProviderSettings {
    pub gemini: Option<BackendSettings>,
    pub anthropic: Option<BackendSettings>,
    pub openai: Option<BackendSettings>,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub frontend_origin: String,
    pub identity_api_url: String,
    pub identity_api_key: String,
    pub providers: ProviderSettings,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let frontend_origin = std::env::var("FRONTEND_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());

        // --- Identity Provider Settings ---
        let identity_api_url = std::env::var("IDENTITY_API_URL")
            .unwrap_or_else(|_| "https://api.clerk.com/v1".to_string());
        let identity_api_key = std::env::var("IDENTITY_API_KEY")
            .map_err(|_| ConfigError::MissingVar("IDENTITY_API_KEY".to_string()))?;

        // --- LLM Backend Settings (each key is optional) ---
        let providers = ProviderSettings {
            gemini: backend_from_env("GEMINI_API_KEY", "GEMINI_MODEL", "gemini-2.0-flash"),
            anthropic: backend_from_env(
                "ANTHROPIC_API_KEY",
                "ANTHROPIC_MODEL",
                "claude-3-5-haiku-latest",
            ),
            openai: backend_from_env("OPENAI_API_KEY", "OPENAI_MODEL", "gpt-4o-mini"),
        };

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            frontend_origin,
            identity_api_url,
            identity_api_key,
            providers,
        })
    }
}

/// Reads one backend's settings; an absent API key disables the backend.
fn backend_from_env(key_var: &str, model_var: &str, default_model: &str) -> Option<BackendSettings> {
    let api_key = std::env::var(key_var).ok()?;
    let model = std::env::var(model_var).unwrap_or_else(|_| default_model.to_string());
    Some(BackendSettings { api_key, model })
}
