//! Store contracts.
//!
//! Both traits are object safe and shared as `Arc<dyn _>`. Lookups return
//! `Ok(None)` for a missing row; mutations of a missing row return the
//! matching NotFound error. Listings are ordered newest first.

use async_trait::async_trait;
use uuid::Uuid;

use taskgate_auth::Role;
use taskgate_core::ServiceError;
use taskgate_models::{Task, User};

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`ServiceError::EmailExists`] if the email is taken.
    async fn create_user(&self, user: &User) -> Result<(), ServiceError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError>;

    async fn list_users(&self) -> Result<Vec<User>, ServiceError>;

    /// Writes email, password digest and role.
    async fn update_user(&self, user: &User) -> Result<(), ServiceError>;

    /// Removes the user and every task they own.
    async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn count_users_by_role(&self, role: Role) -> Result<i64, ServiceError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, task: &Task) -> Result<(), ServiceError>;

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, ServiceError>;

    async fn list_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError>;

    async fn list_all_tasks(&self) -> Result<Vec<Task>, ServiceError>;

    /// Writes title, description, completed and updated_at.
    async fn update_task(&self, task: &Task) -> Result<(), ServiceError>;

    async fn delete_task(&self, id: Uuid) -> Result<(), ServiceError>;
}
