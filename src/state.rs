use std::sync::Arc;

use taskgate_auth::TokenCodec;
use taskgate_config::{CorsConfig, JwtConfig, RateLimitConfig};
use taskgate_db::{TaskStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub codec: TokenCodec,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
}

impl AppState {
    /// Builds state from one store serving both users and tasks.
    pub fn new<S>(
        store: Arc<S>,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self
    where
        S: UserStore + TaskStore + 'static,
    {
        Self {
            users: store.clone(),
            tasks: store,
            codec: TokenCodec::new(&jwt_config.secret),
            jwt_config,
            cors_config,
            rate_limit_config,
        }
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.jwt_config.token_ttl_seconds)
    }
}
