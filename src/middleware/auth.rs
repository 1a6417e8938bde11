use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use taskgate_auth::{Claims, Requester, TokenCodec, attach, retrieve};
use taskgate_core::{AppError, ServiceError};

use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format"))
}

/// Verifies a raw token, logging the failure kind but never the token.
pub(crate) fn verify_token(codec: &TokenCodec, token: &str) -> Result<Claims, ServiceError> {
    codec.verify(token).inspect_err(|err| match err {
        ServiceError::InvalidToken => warn!("Rejected token with invalid signature or encoding"),
        ServiceError::ExpiredToken => debug!("Rejected expired token"),
        _ => {}
    })
}

/// Bearer-token gate for API routes.
///
/// Rejects with 401 before the handler runs when the `Authorization` header
/// is missing, lacks the exact `Bearer ` prefix, or carries a token that does
/// not verify. On success the verified claims are attached to the request.
pub async fn require_bearer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = bearer_token(req.headers())?;
        verify_token(&state.codec, token)?
    };

    Ok(next.run(attach(req, claims)).await)
}

/// Extractor for the identity attached by a gate.
///
/// Rejects with 401 when no gate ran for this request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn requester(&self) -> Result<Requester, AppError> {
        Requester::from_claims(&self.0).map_err(AppError::from)
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        retrieve(&*parts)
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Missing authentication"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_bearer_prefix_is_exact() {
        for value in ["bearer abc", "Bearer  abc", "Basic abc", "Bearerabc", "abc"] {
            let mut headers = HeaderMap::new();
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
            let result = bearer_token(&headers);

            if value == "Bearer  abc" {
                // Double space leaves a leading space in the token, which then fails to verify.
                assert_eq!(result.unwrap(), " abc");
            } else {
                assert!(result.is_err(), "expected rejection for {:?}", value);
            }
        }
    }

    #[test]
    fn test_missing_header() {
        let err = bearer_token(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
