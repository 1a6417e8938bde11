use chrono::Duration;
use tracing::instrument;

use taskgate_auth::TokenCodec;
use taskgate_core::{ServiceError, ensure_password_policy, hash_password, verify_password};
use taskgate_db::UserStore;
use taskgate_models::{AuthResponse, RegisterRequest, User};

pub struct AuthService;

impl AuthService {
    fn issue_for(
        codec: &TokenCodec,
        user: &User,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        codec.issue(&user.id.to_string(), &user.email, user.role, ttl)
    }

    /// Creates an account with role `user` and signs a token for it.
    #[instrument(skip_all)]
    pub async fn register(
        users: &dyn UserStore,
        codec: &TokenCodec,
        ttl: Duration,
        dto: RegisterRequest,
    ) -> Result<AuthResponse, ServiceError> {
        ensure_password_policy(&dto.password)?;
        let password_hash = hash_password(&dto.password)?;

        let user = User::new(dto.email, password_hash);
        users.create_user(&user).await?;

        let token = Self::issue_for(codec, &user, ttl)?;
        Ok(AuthResponse { token, user })
    }

    /// Checks credentials. Unknown email and wrong password both yield
    /// [`ServiceError::InvalidCredentials`].
    #[instrument(skip_all)]
    pub async fn authenticate(
        users: &dyn UserStore,
        email: &str,
        password: &str,
    ) -> Result<User, ServiceError> {
        let user = users
            .find_user_by_email(email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    #[instrument(skip_all)]
    pub async fn login(
        users: &dyn UserStore,
        codec: &TokenCodec,
        ttl: Duration,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let user = Self::authenticate(users, email, password).await?;
        let token = Self::issue_for(codec, &user, ttl)?;
        Ok(AuthResponse { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskgate_auth::Role;
    use taskgate_db::MemoryStore;

    fn codec() -> TokenCodec {
        TokenCodec::new("test-secret-key-at-least-32-characters-long")
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_yields_user_role_and_valid_token() {
        let store = MemoryStore::new();
        let codec = codec();

        let response = AuthService::register(
            &store,
            &codec,
            Duration::hours(24),
            register_request("alice@example.com", "password123"),
        )
        .await
        .unwrap();

        assert_eq!(response.user.role, Role::User);
        assert_ne!(response.user.password_hash, "password123");

        let claims = codec.verify(&response.token).unwrap();
        assert_eq!(claims.sub, response.user.id.to_string());
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password_before_storing() {
        let store = MemoryStore::new();
        let result = AuthService::register(
            &store,
            &codec(),
            Duration::hours(24),
            register_request("alice@example.com", "short"),
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(
            store
                .find_user_by_email("alice@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let store = MemoryStore::new();
        let codec = codec();
        AuthService::register(
            &store,
            &codec,
            Duration::hours(24),
            register_request("alice@example.com", "password123"),
        )
        .await
        .unwrap();

        let result = AuthService::register(
            &store,
            &codec,
            Duration::hours(24),
            register_request("alice@example.com", "password456"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::EmailExists)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let store = MemoryStore::new();
        let codec = codec();
        AuthService::register(
            &store,
            &codec,
            Duration::hours(24),
            register_request("alice@example.com", "password123"),
        )
        .await
        .unwrap();

        let wrong_password = AuthService::login(
            &store,
            &codec,
            Duration::hours(24),
            "alice@example.com",
            "wrongpassword",
        )
        .await
        .unwrap_err();
        let unknown_email = AuthService::login(
            &store,
            &codec,
            Duration::hours(24),
            "nobody@example.com",
            "password123",
        )
        .await
        .unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_email, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_success() {
        let store = MemoryStore::new();
        let codec = codec();
        AuthService::register(
            &store,
            &codec,
            Duration::hours(24),
            register_request("alice@example.com", "password123"),
        )
        .await
        .unwrap();

        let response = AuthService::login(
            &store,
            &codec,
            Duration::hours(24),
            "alice@example.com",
            "password123",
        )
        .await
        .unwrap();
        assert_eq!(response.user.email, "alice@example.com");
        assert!(codec.verify(&response.token).is_ok());
    }
}
