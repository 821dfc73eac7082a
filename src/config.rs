//! Environment-backed runtime configuration for the server binary.

use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable naming the `PostgreSQL` connection string.
const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable naming the socket address to bind.
const BIND_ADDR_VAR: &str = "TASKBOARD_ADDR";

/// Bind address used when [`BIND_ADDR_VAR`] is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime settings resolved from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string.
    pub database_url: String,
    /// Socket address the HTTP server binds.
    pub bind_addr: SocketAddr,
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// The bind address could not be parsed.
    #[error("invalid socket address '{value}' in {var}")]
    InvalidBindAddr {
        /// Variable that held the value.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl ServerConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `DATABASE_URL` is unset and
    /// [`ConfigError::InvalidBindAddr`] when the bind address does not
    /// parse as a socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(DATABASE_URL_VAR).map_err(|_| ConfigError::MissingVar(DATABASE_URL_VAR))?;
        let bind_value = env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: bind_value.clone(),
            })?;
        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
