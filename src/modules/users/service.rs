use tracing::{info, instrument};
use uuid::Uuid;

use taskgate_auth::{Requester, Role, policy};
use taskgate_core::{AdminRemoval, ServiceError, ensure_password_policy, hash_password};
use taskgate_db::UserStore;
use taskgate_models::{UpdateUserRequest, User};

pub struct UserService;

impl UserService {
    #[instrument(skip(users))]
    pub async fn list_users(
        users: &dyn UserStore,
        requester: Requester,
    ) -> Result<Vec<User>, ServiceError> {
        policy::admin_only(requester.role)?;
        users.list_users().await
    }

    #[instrument(skip(users))]
    pub async fn get_user(
        users: &dyn UserStore,
        requester: Requester,
        user_id: Uuid,
    ) -> Result<User, ServiceError> {
        policy::can_access_own(user_id, requester.id, requester.role)?;
        users
            .find_user_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    /// Applies a partial profile update.
    ///
    /// Order of checks: self-or-admin, then the role-change guard (any `role`
    /// field from a non-admin is refused), then the last-admin guard for a
    /// demotion. The admin count is read before the write and the two are not
    /// atomic.
    #[instrument(skip(users, dto))]
    pub async fn update_user(
        users: &dyn UserStore,
        requester: Requester,
        user_id: Uuid,
        dto: UpdateUserRequest,
    ) -> Result<User, ServiceError> {
        policy::can_access_own(user_id, requester.id, requester.role)?;
        if dto.role.is_some() {
            policy::can_change_role(requester.role)?;
        }

        let mut user = users
            .find_user_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if let Some(password) = dto.password {
            ensure_password_policy(&password)?;
            user.password_hash = hash_password(&password)?;
        }

        if let Some(email) = dto.email {
            user.email = email;
        }

        if let Some(role) = dto.role {
            if policy::is_demotion(user.role, role) {
                let admin_count = users.count_users_by_role(Role::Admin).await?;
                policy::ensure_not_last_admin(user.role, AdminRemoval::Demote, admin_count)?;
            }
            if user.role != role {
                info!(user_id = %user.id, from = %user.role, to = %role, "User role changed");
            }
            user.role = role;
        }

        users.update_user(&user).await?;
        Ok(user)
    }

    /// Deletes an account and its tasks. Refused when the target is the last admin.
    #[instrument(skip(users))]
    pub async fn delete_user(
        users: &dyn UserStore,
        requester: Requester,
        user_id: Uuid,
    ) -> Result<(), ServiceError> {
        policy::can_access_own(user_id, requester.id, requester.role)?;

        let user = users
            .find_user_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if user.is_admin() {
            let admin_count = users.count_users_by_role(Role::Admin).await?;
            policy::ensure_not_last_admin(user.role, AdminRemoval::Delete, admin_count)?;
        }

        users.delete_user(user_id).await
    }
}
