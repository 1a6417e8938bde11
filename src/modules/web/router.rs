use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::rate_limit::{ClientRateLimiter, limit_requests};
use crate::middleware::session::require_session;
use crate::modules::web::controller::{login, login_page, todos_page};
use crate::state::AppState;

pub fn init_web_router(state: AppState) -> Router<AppState> {
    let login_limiter = ClientRateLimiter::new(state.rate_limit_config.auth_quota());

    Router::new()
        .route(
            "/todos",
            get(todos_page).route_layer(middleware::from_fn_with_state(state, require_session)),
        )
        .route(
            "/login",
            get(login_page)
                .merge(post(login).layer(middleware::from_fn_with_state(login_limiter, limit_requests))),
        )
}
