//! # Taskgate Config
//!
//! Configuration structures loaded from environment variables at startup:
//!
//! - [`jwt`]: token signing secret and the fixed token lifetime
//! - [`server`]: listen port and database URL
//! - [`cors`]: allowed CORS origins
//! - [`logging`]: log level, format and optional log directory
//! - [`rate_limit`]: per-client limit on the credential endpoints
//!
//! Every `from_env` constructor delegates to a `from_lookup` variant that takes
//! a key lookup function, so parsing can be tested without touching the
//! process environment.
//!
//! # Example
//!
//! ```ignore
//! use taskgate_config::{CorsConfig, JwtConfig, LogConfig, RateLimitConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! let log_config = LogConfig::from_env();
//! let rate_limit_config = RateLimitConfig::from_env()?;
//! ```

pub mod cors;
pub mod jwt;
pub mod logging;
pub mod rate_limit;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::{JwtConfig, TOKEN_TTL_SECONDS};
pub use logging::{LogConfig, LogFormat};
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Returns the value for `key` unless it is unset or blank.
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}
