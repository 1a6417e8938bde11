use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use taskgate_models::{
    AuthResponse, CreateTaskRequest, LoginRequest, RegisterRequest, Role, Task, TaskResponse,
    TasksResponse, UpdateTaskRequest, UpdateUserRequest, User, UserResponse, UsersResponse,
};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::tasks::controller::create_task,
        crate::modules::tasks::controller::get_tasks,
        crate::modules::tasks::controller::get_task,
        crate::modules::tasks::controller::update_task,
        crate::modules::tasks::controller::delete_task,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
    ),
    components(
        schemas(
            Role,
            User,
            Task,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CreateTaskRequest,
            UpdateTaskRequest,
            TaskResponse,
            TasksResponse,
            UpdateUserRequest,
            UserResponse,
            UsersResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Tasks", description = "Task endpoints; owners update, admins delete"),
        (name = "Users", description = "User profiles and role management")
    ),
    info(
        title = "Taskgate API",
        version = "0.1.0",
        description = "A task-list API with token authentication and user/admin roles."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
