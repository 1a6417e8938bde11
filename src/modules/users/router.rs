use axum::{Router, routing::get};

use crate::modules::users::controller::{delete_user, get_user, get_users, update_user};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
}
