use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::{info, instrument};
use uuid::Uuid;

use taskgate_core::AppError;
use taskgate_models::{CreateTaskRequest, TaskResponse, TasksResponse, UpdateTaskRequest};

use super::service::TaskService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

/// Create a task owned by the caller
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Title is required", body = ErrorResponse)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let requester = auth_user.requester()?;
    let task = TaskService::create_task(state.tasks.as_ref(), requester, dto).await?;

    info!(task_id = %task.id, user_id = %requester.id, "Task created");
    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

/// List tasks (own tasks, or all tasks for admins)
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Tasks, newest first", body = TasksResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_tasks(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<TasksResponse>, AppError> {
    let requester = auth_user.requester()?;
    let tasks = TaskService::list_tasks(state.tasks.as_ref(), requester).await?;
    Ok(Json(TasksResponse { tasks }))
}

/// Get a task (owner or admin)
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<Json<TaskResponse>, AppError> {
    let requester = auth_user.requester()?;
    let task = TaskService::get_task(state.tasks.as_ref(), requester, id).await?;
    Ok(Json(TaskResponse { task }))
}

/// Update title, description or completion (owner or admin)
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let requester = auth_user.requester()?;
    let task = TaskService::update_task(state.tasks.as_ref(), requester, id, dto).await?;

    info!(task_id = %task.id, user_id = %requester.id, "Task updated");
    Ok(Json(TaskResponse { task }))
}

/// Delete a task (admin only, even for the owner)
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    tag = "Tasks",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<StatusCode, AppError> {
    let requester = auth_user.requester()?;
    TaskService::delete_task(state.tasks.as_ref(), requester, id).await?;

    info!(task_id = %id, user_id = %requester.id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
