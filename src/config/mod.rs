//! Runtime configuration.
//!
//! Typed settings loaded from the environment with the `config` and
//! `dotenvy` crates. Variables use the `REVIEW_RITUAL` prefix and `__`
//! between nested keys; a `.env` file is read first when present. Only the
//! session secret has no default.
//!
//! # Example
//!
//! ```no_run
//! use review_ritual::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("listening on {}", config.server.socket_addr()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod auth;
mod database;
mod error;
mod review;
mod server;

pub use auth::AuthConfig;
pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use review::ReviewConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root configuration.
///
/// One section per concern. Load with [`AppConfig::load()`], then check
/// with [`AppConfig::validate()`] before wiring anything up.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener address, environment, log filter, timeouts, CORS.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend: in-memory (default) or PostgreSQL.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token verification and the login redirect.
    pub auth: AuthConfig,

    /// Wizard and dashboard tuning: heatmap size, save timeout, retries.
    #[serde(default)]
    pub review: ReviewConfig,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// 1. Reads `.env` if present
    /// 2. Collects variables prefixed `REVIEW_RITUAL__`
    /// 3. Splits nested keys on `__`
    /// 4. Deserializes into the typed sections, filling defaults
    ///
    /// # Environment Variable Format
    ///
    /// - `REVIEW_RITUAL__SERVER__PORT=3000` -> `server.port = 3000`
    /// - `REVIEW_RITUAL__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - the session secret is missing
    /// - a value cannot be parsed into its field type
    pub fn load() -> Result<Self, ConfigError> {
        // Development convenience; a missing file is fine.
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REVIEW_RITUAL")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section.
    ///
    /// Covers port and timeout ranges, the database URL scheme and pool
    /// size, the secret length in production, and heatmap and retry bounds.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.review.validate()?;
        Ok(())
    }

    /// True when `server.environment` is production.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "REVIEW_RITUAL__AUTH__JWT_SECRET",
        "REVIEW_RITUAL__SERVER__PORT",
        "REVIEW_RITUAL__SERVER__ENVIRONMENT",
        "REVIEW_RITUAL__DATABASE__BACKEND",
        "REVIEW_RITUAL__DATABASE__URL",
        "REVIEW_RITUAL__REVIEW__HEATMAP_WEEKS",
    ];

    fn set_minimal_env() {
        env::set_var("REVIEW_RITUAL__AUTH__JWT_SECRET", "dev-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.review.heatmap_weeks, 21);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("REVIEW_RITUAL__SERVER__PORT", "3000");
        env::set_var("REVIEW_RITUAL__DATABASE__BACKEND", "postgres");
        env::set_var("REVIEW_RITUAL__DATABASE__URL", "postgresql://localhost/reviews");
        env::set_var("REVIEW_RITUAL__REVIEW__HEATMAP_WEEKS", "12");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.database.is_postgres());
        assert_eq!(config.review.heatmap_weeks, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_dev_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("REVIEW_RITUAL__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::JwtSecretTooShort(32))
        );
    }

    #[test]
    fn test_missing_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
