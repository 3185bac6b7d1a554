//! Authentication configuration (session tokens and the route guard)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted outside development.
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: Secret<String>,

    /// Expected `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Where unauthenticated page requests are sent
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Comma-separated paths reachable without a session
    #[serde(default = "default_public_paths")]
    pub public_paths: String,
}

impl AuthConfig {
    pub fn public_paths_list(&self) -> Vec<String> {
        self.public_paths
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }

    /// Validate authentication configuration
    ///
    /// Outside development the signing secret must be long enough for HS256.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment != Environment::Development && secret.len() < MIN_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_BYTES));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }
        for path in std::iter::once(self.login_path.clone()).chain(self.public_paths_list()) {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidPath(path));
            }
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            issuer: default_issuer(),
            audience: default_audience(),
            login_path: default_login_path(),
            public_paths: default_public_paths(),
        }
    }
}

fn default_issuer() -> String {
    "review-ritual".to_string()
}

fn default_audience() -> String {
    "review-ritual-web".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_public_paths() -> String {
    "/login,/health".to_string()
}
