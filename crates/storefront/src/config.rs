//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAYSTACK_PUBLIC_KEY` - Payment processor public key (`pk_...`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront
//!   (default: `http://localhost:3000`)
//! - `CONTENT_API_URL` - Base URL of the headless content API
//!   (default: `http://localhost:1337`)
//! - `CONTENT_API_TOKEN` - Bearer token for content API writes
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Headless content API configuration
    pub content: ContentApiConfig,
    /// Payment processor configuration
    pub paystack: PaystackConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Headless content API configuration.
///
/// Implements `Debug` manually to redact the write token.
#[derive(Clone)]
pub struct ContentApiConfig {
    /// Base URL of the content API (no trailing slash)
    pub base_url: String,
    /// Bearer token for write access (sale records)
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for ContentApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "token",
                &self.token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Payment processor configuration.
///
/// The public key is safe to render into pages; the processor issues
/// per-transaction references and handles card data itself, so the
/// storefront never holds a secret key.
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// Processor public key (rendered into the checkout page)
    pub public_key: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the content API token looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        let content = ContentApiConfig::from_env()?;
        let paystack = PaystackConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            base_url,
            content,
            paystack,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ContentApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("CONTENT_API_URL", "http://localhost:1337")
            .trim_end_matches('/')
            .to_string();

        let token = match get_optional_env("CONTENT_API_TOKEN") {
            Some(value) => {
                validate_secret_strength(&value, "CONTENT_API_TOKEN")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self { base_url, token })
    }
}

impl PaystackConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let public_key = get_required_env("PAYSTACK_PUBLIC_KEY")?;
        if !public_key.starts_with("pk_") {
            return Err(ConfigError::InvalidEnvVar(
                "PAYSTACK_PUBLIC_KEY".to_string(),
                "must be a public key (pk_...)".to_string(),
            ));
        }
        Ok(Self { public_key })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-token-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("f6a1b2c3d4e5061728394a5b6c7d8e9f", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            content: ContentApiConfig {
                base_url: "http://localhost:1337".to_string(),
                token: None,
            },
            paystack: PaystackConfig {
                public_key: "pk_test_1a2b3c".to_string(),
            },
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_content_config_debug_redacts_token() {
        let config = ContentApiConfig {
            base_url: "http://localhost:1337".to_string(),
            token: Some(SecretString::from("super_secret_write_token")),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("http://localhost:1337"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("super_secret_write_token"));
    }
}
