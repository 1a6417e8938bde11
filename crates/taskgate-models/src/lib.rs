//! # Taskgate Models
//!
//! Domain models and DTOs for the Taskgate API.
//!
//! # Modules
//!
//! - [`auth`]: registration and login payloads
//! - [`tasks`]: the [`Task`] entity and its request/response shapes
//! - [`users`]: the [`User`] entity and profile updates
//!
//! # Example
//!
//! ```ignore
//! use taskgate_models::{CreateTaskRequest, Task};
//! use validator::Validate;
//!
//! let req: CreateTaskRequest = serde_json::from_str(r#"{"title":"Buy milk"}"#)?;
//! req.validate()?;
//! let task = Task::new(owner_id, req.title, req.description);
//! ```

pub mod auth;
pub mod tasks;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use tasks::{CreateTaskRequest, Task, TaskResponse, TasksResponse, UpdateTaskRequest};
pub use users::{UpdateUserRequest, User, UserResponse, UsersResponse};

pub use taskgate_auth::Role;
