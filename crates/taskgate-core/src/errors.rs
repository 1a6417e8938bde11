//! Error types for the Taskgate API.
//!
//! Two layers of errors exist:
//!
//! - [`ServiceError`] is the typed taxonomy produced by the token codec, the
//!   authorization policy, the stores and the services. It never touches the
//!   network or a log sink.
//! - [`AppError`] is what HTTP handlers return. Every [`ServiceError`] maps to
//!   exactly one status code and client message via `From<ServiceError>`.

use std::fmt;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The action refused by the last-admin guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRemoval {
    Demote,
    Delete,
}

impl fmt::Display for AdminRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminRemoval::Demote => f.write_str("demote"),
            AdminRemoval::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed token or signature mismatch. May indicate tampering.
    #[error("invalid token")]
    InvalidToken,

    /// Signature is valid but the expiry instant has been reached.
    #[error("token expired")]
    ExpiredToken,

    /// Unknown email or wrong password; the two are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Forbidden")]
    Forbidden,

    /// The operation would leave the system without an administrator.
    #[error("Cannot {0} the last admin")]
    LastAdmin(AdminRemoval),

    #[error("User not found")]
    UserNotFound,

    #[error("Task not found")]
    TaskNotFound,

    #[error("Email already exists")]
    EmailExists,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// True for the two token failures the authentication gate collapses into 401.
    pub fn is_token_error(&self) -> bool {
        matches!(self, ServiceError::InvalidToken | ServiceError::ExpiredToken)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, anyhow::anyhow!(message.into()))
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidToken | ServiceError::ExpiredToken => {
                AppError::unauthorized("Invalid or expired token")
            }
            ServiceError::InvalidCredentials => AppError::unauthorized(err.to_string()),
            ServiceError::Forbidden | ServiceError::LastAdmin(_) => {
                AppError::forbidden(err.to_string())
            }
            ServiceError::UserNotFound | ServiceError::TaskNotFound => AppError::not_found(err),
            ServiceError::EmailExists => AppError::conflict(err),
            ServiceError::Validation(_) => AppError::unprocessable(err),
            ServiceError::Internal(inner) => AppError::internal(inner),
        }
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for err in [ServiceError::InvalidToken, ServiceError::ExpiredToken] {
            let app_err = AppError::from(err);
            assert_eq!(app_err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(app_err.error.to_string(), "Invalid or expired token");
        }
    }

    #[test]
    fn test_last_admin_is_distinct_from_forbidden() {
        let forbidden = AppError::from(ServiceError::Forbidden);
        let demote = AppError::from(ServiceError::LastAdmin(AdminRemoval::Demote));
        let delete = AppError::from(ServiceError::LastAdmin(AdminRemoval::Delete));

        assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
        assert_eq!(demote.status, StatusCode::FORBIDDEN);
        assert_eq!(forbidden.error.to_string(), "Forbidden");
        assert_eq!(demote.error.to_string(), "Cannot demote the last admin");
        assert_eq!(delete.error.to_string(), "Cannot delete the last admin");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::from(ServiceError::InvalidCredentials).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(ServiceError::UserNotFound).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ServiceError::TaskNotFound).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ServiceError::EmailExists).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(ServiceError::validation("too short")).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(ServiceError::Internal(anyhow::anyhow!("boom"))).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_error_body_hides_cause() {
        let response =
            AppError::from(ServiceError::Internal(anyhow::anyhow!("connection refused")))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let response = AppError::from(ServiceError::TaskNotFound).into_response();
        let body = body_json(response).await;
        assert_eq!(body["error"], "Task not found");
    }
}
