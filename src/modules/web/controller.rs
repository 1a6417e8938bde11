use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use taskgate_core::{AppError, ServiceError};

use super::views;
use crate::middleware::auth::AuthUser;
use crate::middleware::session::SESSION_COOKIE;
use crate::modules::auth::service::AuthService;
use crate::modules::tasks::service::TaskService;
use crate::state::AppState;

pub const HX_REDIRECT: &str = "HX-Redirect";
pub const TODOS_PATH: &str = "/todos";

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page())
}

/// Form login for the browser session.
///
/// Success sets the session cookie and tells htmx to navigate to the task
/// list. Bad credentials return a fragment for the form's error slot.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let ttl = state.token_ttl();
    let response = match AuthService::login(
        state.users.as_ref(),
        &state.codec,
        ttl,
        &form.email,
        &form.password,
    )
    .await
    {
        Ok(response) => response,
        Err(ServiceError::InvalidCredentials) => {
            warn!("Browser login failed");
            return Ok(Html(ServiceError::InvalidCredentials.to_string()).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let cookie = Cookie::build((SESSION_COOKIE, response.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::seconds(ttl.num_seconds()))
        .build();

    info!(user_id = %response.user.id, "User logged in via browser session");
    Ok((StatusCode::OK, jar.add(cookie), [(HX_REDIRECT, TODOS_PATH)]).into_response())
}

#[instrument(skip_all)]
pub async fn todos_page(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Html<String>, AppError> {
    let requester = auth_user.requester()?;
    let tasks = TaskService::list_tasks(state.tasks.as_ref(), requester).await?;
    Ok(Html(views::todos_page(auth_user.email(), &tasks)))
}
