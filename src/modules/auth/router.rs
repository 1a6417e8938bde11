use axum::{Router, middleware, routing::post};

use taskgate_config::RateLimitConfig;

use super::controller::{login_user, register_user};
use crate::middleware::rate_limit::{ClientRateLimiter, limit_requests};
use crate::state::AppState;

pub fn init_auth_router(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let register_limiter = ClientRateLimiter::new(rate_limit.auth_quota());
    let login_limiter = ClientRateLimiter::new(rate_limit.auth_quota());

    Router::new()
        .route(
            "/register",
            post(register_user)
                .layer(middleware::from_fn_with_state(register_limiter, limit_requests)),
        )
        .route(
            "/login",
            post(login_user).layer(middleware::from_fn_with_state(login_limiter, limit_requests)),
        )
}
