//! In-process stores.
//!
//! `MemoryStore` keeps the same contract as [`crate::PgStore`] (unique emails,
//! cascading task deletion, newest-first listings) without a database. Locks
//! are always taken users first, then tasks.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use taskgate_auth::Role;
use taskgate_core::ServiceError;
use taskgate_models::{Task, User};

use crate::store::{TaskStore, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id) != except)
}

fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), ServiceError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(ServiceError::EmailExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        let users: Vec<User> = self.users.read().await.values().cloned().collect();
        Ok(newest_first(users, |u| u.created_at))
    }

    async fn update_user(&self, user: &User) -> Result<(), ServiceError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(ServiceError::UserNotFound);
        }
        if email_taken(&users, &user.email, Some(user.id)) {
            return Err(ServiceError::EmailExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Err(ServiceError::UserNotFound);
        }
        self.tasks.write().await.retain(|_, task| task.user_id != id);
        Ok(())
    }

    async fn count_users_by_role(&self, role: Role) -> Result<i64, ServiceError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.role == role).count() as i64)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, task: &Task) -> Result<(), ServiceError> {
        // Mirrors the foreign key on tasks.user_id.
        if !self.users.read().await.contains_key(&task.user_id) {
            return Err(ServiceError::UserNotFound);
        }
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(())
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, ServiceError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn list_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, ServiceError> {
        let tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(tasks, |t| t.created_at))
    }

    async fn list_all_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        let tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        Ok(newest_first(tasks, |t| t.created_at))
    }

    async fn update_task(&self, task: &Task) -> Result<(), ServiceError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(existing) => {
                existing.title = task.title.clone();
                existing.description = task.description.clone();
                existing.completed = task.completed;
                existing.updated_at = task.updated_at;
                Ok(())
            }
            None => Err(ServiceError::TaskNotFound),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.tasks.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ServiceError::TaskNotFound),
        }
    }
}
