//! Token claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskgate_core::ServiceError;

use crate::role::Role;

/// The verified identity payload of a token.
///
/// Claims are produced by [`crate::TokenCodec::verify`] for one request and
/// are never cached or shared across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Informational only; never used for authorization
    pub email: String,
    pub role: Role,
    /// Issued-at (Unix timestamp, seconds)
    pub iat: i64,
    /// Expiry (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Parses the subject as a user id. A signed token with a non-UUID subject
    /// was not issued by this service, so it is treated as an invalid token.
    pub fn user_id(&self) -> Result<Uuid, ServiceError> {
        Uuid::parse_str(&self.sub).map_err(|_| ServiceError::InvalidToken)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
