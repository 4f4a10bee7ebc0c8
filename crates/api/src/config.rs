use std::str::FromStr;

use catcollector_storage::{StorageConfig, StorageError};

use crate::auth::session::SessionConfig;

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Default cap on a photo upload body.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and the bucket have defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`). Also bounds photo uploads.
    pub request_timeout_secs: u64,
    /// Largest photo upload body accepted, in bytes (default: 25 MiB).
    pub max_upload_bytes: usize,
    /// Login session signing and cookie settings.
    pub session: SessionConfig,
    /// Photo bucket, key prefix, and public URL base.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `26214400` (25 MiB)        |
    ///
    /// See [`SessionConfig::from_env`] and [`StorageConfig::from_env`] for the
    /// remaining variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = parse_var("PORT", 3000)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", 30)?;
        let max_upload_bytes: usize = parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            session: SessionConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

/// Read `var` and parse it, falling back to `default` when unset.
pub(crate) fn parse_var<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_var_falls_back_to_default() {
        std::env::remove_var("CATCOLLECTOR_TEST_UNSET");
        assert_eq!(parse_var("CATCOLLECTOR_TEST_UNSET", 42u16).unwrap(), 42);
    }

    #[test]
    fn parse_var_reads_value() {
        std::env::set_var("CATCOLLECTOR_TEST_PORT", " 8080 ");
        assert_eq!(parse_var("CATCOLLECTOR_TEST_PORT", 3000u16).unwrap(), 8080);
    }

    #[test]
    fn parse_var_rejects_garbage() {
        std::env::set_var("CATCOLLECTOR_TEST_BOOL", "maybe");
        assert_matches!(
            parse_var("CATCOLLECTOR_TEST_BOOL", false),
            Err(ConfigError::Invalid {
                var: "CATCOLLECTOR_TEST_BOOL",
                ..
            })
        );
    }
}
