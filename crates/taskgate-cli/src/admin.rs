//! Administrator bootstrap.

use taskgate_auth::Role;
use taskgate_core::{ServiceError, ensure_password_policy, hash_password};
use taskgate_db::UserStore;
use taskgate_models::User;

/// Creates an account with role `admin`.
pub async fn create_admin(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<User, ServiceError> {
    ensure_password_policy(password)?;
    let password_hash = hash_password(password)?;

    let user = User::with_role(email, password_hash, Role::Admin);
    users.create_user(&user).await?;
    Ok(user)
}

/// Grants `admin` to an existing account. Promoting an admin is a no-op.
pub async fn promote(users: &dyn UserStore, email: &str) -> Result<User, ServiceError> {
    let mut user = users
        .find_user_by_email(email)
        .await?
        .ok_or(ServiceError::UserNotFound)?;

    if !user.is_admin() {
        user.role = Role::Admin;
        users.update_user(&user).await?;
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgate_db::MemoryStore;

    #[tokio::test]
    async fn test_create_admin() {
        let store = MemoryStore::new();
        let admin = create_admin(&store, "root@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(admin.role, Role::Admin);
        assert_eq!(store.count_users_by_role(Role::Admin).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_admin_enforces_password_policy() {
        let store = MemoryStore::new();
        let result = create_admin(&store, "root@example.com", "short").await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_promote_existing_user() {
        let store = MemoryStore::new();
        store
            .create_user(&User::new("alice@example.com", "digest"))
            .await
            .unwrap();

        let promoted = promote(&store, "alice@example.com").await.unwrap();
        assert_eq!(promoted.role, Role::Admin);

        let stored = store
            .find_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_promote_unknown_email() {
        let store = MemoryStore::new();
        assert!(matches!(
            promote(&store, "nobody@example.com").await,
            Err(ServiceError::UserNotFound)
        ));
    }
}
