//! Rate limiting for the credential endpoints.
//!
//! Registration and login (API and browser form) are limited per client IP
//! and per endpoint with a token bucket from the `governor` crate. The bucket
//! holds `RATE_LIMIT_AUTH_PER_MINUTE` requests (default 5) and refills at the
//! same rate.

use std::env;
use std::num::NonZeroU32;

use governor::Quota;

use crate::{ConfigError, non_empty};

pub const DEFAULT_AUTH_PER_MINUTE: NonZeroU32 = NonZeroU32::MIN.saturating_add(4);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests per minute, and burst size, for each credential endpoint.
    pub auth_per_minute: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            auth_per_minute: DEFAULT_AUTH_PER_MINUTE,
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_per_minute = match non_empty(&lookup, "RATE_LIMIT_AUTH_PER_MINUTE") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "RATE_LIMIT_AUTH_PER_MINUTE",
                value: value.clone(),
            })?,
            None => DEFAULT_AUTH_PER_MINUTE,
        };

        Ok(Self { auth_per_minute })
    }

    /// Quota for one credential endpoint.
    pub fn auth_quota(&self) -> Quota {
        Quota::per_minute(self.auth_per_minute)
    }
}
