use axum::{Router, routing::get};

use crate::modules::tasks::controller::{
    create_task, delete_task, get_task, get_tasks, update_task,
};
use crate::state::AppState;

pub fn init_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tasks).post(create_task))
        .route("/{id}", get(get_task).patch(update_task).delete(delete_task))
}
