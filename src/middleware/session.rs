use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use taskgate_auth::attach;

use crate::middleware::auth::verify_token;
use crate::state::AppState;

/// Cookie that carries the raw token for browser sessions.
pub const SESSION_COOKIE: &str = "auth_token";

pub const LOGIN_PATH: &str = "/login";

/// Cookie gate for browser pages.
///
/// A missing cookie or one whose token does not verify redirects to the login
/// page instead of returning 401.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    match verify_token(&state.codec, cookie.value()) {
        Ok(claims) => next.run(attach(req, claims)).await,
        Err(_) => Redirect::to(LOGIN_PATH).into_response(),
    }
}
