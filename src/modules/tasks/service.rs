use tracing::instrument;
use uuid::Uuid;

use taskgate_auth::{Requester, policy};
use taskgate_core::ServiceError;
use taskgate_db::TaskStore;
use taskgate_models::{CreateTaskRequest, Task, UpdateTaskRequest};

pub struct TaskService;

impl TaskService {
    /// Creates a task owned by the requester.
    #[instrument(skip(tasks, dto))]
    pub async fn create_task(
        tasks: &dyn TaskStore,
        requester: Requester,
        dto: CreateTaskRequest,
    ) -> Result<Task, ServiceError> {
        let task = Task::new(requester.id, dto.title, dto.description);
        tasks.create_task(&task).await?;
        Ok(task)
    }

    /// Admins see every task; everyone else sees their own.
    #[instrument(skip(tasks))]
    pub async fn list_tasks(
        tasks: &dyn TaskStore,
        requester: Requester,
    ) -> Result<Vec<Task>, ServiceError> {
        if requester.is_admin() {
            tasks.list_all_tasks().await
        } else {
            tasks.list_tasks_by_user(requester.id).await
        }
    }

    #[instrument(skip(tasks))]
    pub async fn get_task(
        tasks: &dyn TaskStore,
        requester: Requester,
        task_id: Uuid,
    ) -> Result<Task, ServiceError> {
        let task = tasks
            .find_task_by_id(task_id)
            .await?
            .ok_or(ServiceError::TaskNotFound)?;

        policy::can_access_own(task.user_id, requester.id, requester.role)?;
        Ok(task)
    }

    #[instrument(skip(tasks, dto))]
    pub async fn update_task(
        tasks: &dyn TaskStore,
        requester: Requester,
        task_id: Uuid,
        dto: UpdateTaskRequest,
    ) -> Result<Task, ServiceError> {
        let mut task = Self::get_task(tasks, requester, task_id).await?;
        task.apply(dto);
        tasks.update_task(&task).await?;
        Ok(task)
    }

    /// Admin only, owners included. The role check runs before the lookup.
    #[instrument(skip(tasks))]
    pub async fn delete_task(
        tasks: &dyn TaskStore,
        requester: Requester,
        task_id: Uuid,
    ) -> Result<(), ServiceError> {
        policy::admin_only(requester.role)?;
        tasks.delete_task(task_id).await
    }
}
