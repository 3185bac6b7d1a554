//! Storage backend selection and PostgreSQL pool settings.

use std::time::Duration;

use serde::Deserialize;

use super::error::ValidationError;

const MAX_POOL_SIZE: u32 = 100;

/// Where reviews, streaks and settings live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps behind a simulated network delay.
    #[default]
    Memory,
    Postgres,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Which repositories `main` wires up
    pub backend: StorageBackend,

    /// PostgreSQL connection URL, only read by the postgres backend
    pub url: String,

    /// Minimum connections to keep open
    pub min_connections: u32,

    /// Maximum connections allowed
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Apply `migrations/` before serving
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            url: String::new(),
            min_connections: 2,
            max_connections: 10,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    pub fn is_postgres(&self) -> bool {
        self.backend == StorageBackend::Postgres
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Validate database configuration
    ///
    /// The memory backend has nothing to check. Postgres needs a
    /// `postgres://` or `postgresql://` URL and a sane pool size.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` naming the first bad value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.is_postgres() {
            return Ok(());
        }
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }
        let scheme_ok = ["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_SIZE {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres(url: &str) -> DatabaseConfig {
        DatabaseConfig {
            backend: StorageBackend::Postgres,
            url: url.to_string(),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn memory_backend_needs_no_url() {
        let config = DatabaseConfig::default();
        assert!(!config.is_postgres());
        assert!(config.url.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pool_timeouts_convert_to_durations() {
        let config = DatabaseConfig::default();
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
        assert_eq!(config.idle_timeout(), Duration::from_secs(600));
        assert_eq!(config.max_lifetime(), Duration::from_secs(1800));
    }

    #[test]
    fn postgres_without_url_is_missing_required() {
        assert_eq!(
            postgres("  ").validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn postgres_accepts_both_schemes() {
        assert!(postgres("postgres://localhost/reviews").validate().is_ok());
        assert!(postgres("postgresql://user:pass@db:5432/reviews").validate().is_ok());
        assert_eq!(
            postgres("mysql://localhost/reviews").validate(),
            Err(ValidationError::InvalidDatabaseUrl)
        );
    }

    #[test]
    fn pool_bounds_are_checked() {
        let mut config = postgres("postgres://localhost/reviews");
        config.min_connections = 12;
        assert_eq!(config.validate(), Err(ValidationError::InvalidPoolSize));

        config.min_connections = 2;
        config.max_connections = 101;
        assert_eq!(config.validate(), Err(ValidationError::PoolSizeTooLarge));
    }
}
