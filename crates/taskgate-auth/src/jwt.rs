//! Token issuance and verification.
//!
//! Tokens are compact JWS strings (`header.payload.signature`, base64url
//! segments) signed with HMAC-SHA256 over header and payload. The payload
//! carries subject id, email, role, issued-at and expiry, so changing any of
//! them invalidates the signature.
//!
//! # Expiry
//!
//! A token is expired when `now >= exp`. The comparison is inclusive and done
//! here rather than by `jsonwebtoken`, which treats `now == exp` as valid and
//! applies a default leeway.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use taskgate_auth::{Role, TokenCodec};
//!
//! let codec = TokenCodec::new(&jwt_config.secret);
//! let token = codec.issue(&user_id.to_string(), "a@x.com", Role::User, Duration::hours(24))?;
//! let claims = codec.verify(&token)?;
//! assert_eq!(claims.role, Role::User);
//! ```

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use taskgate_core::ServiceError;

use crate::claims::Claims;
use crate::role::Role;

/// Issues and verifies identity tokens with a shared symmetric secret.
///
/// The codec is immutable after construction and cheap to clone; one instance
/// is shared by every request.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked inclusively in `verify_at`; `exp` must still be present.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a token valid for `ttl` starting now.
    pub fn issue(
        &self,
        subject_id: &str,
        email: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<String, ServiceError> {
        self.issue_at(subject_id, email, role, ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        role: Role,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, ServiceError> {
        let iat = issued_at.timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            role,
            iat,
            exp: iat + ttl.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            ServiceError::Internal(anyhow::anyhow!("Failed to create token: {}", e))
        })
    }

    /// Verifies signature and expiry against the current time.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidToken`] if the token is empty, malformed, not
    ///   signed with this codec's secret, or carries an unknown role
    /// - [`ServiceError::ExpiredToken`] if the signature is valid but the
    ///   expiry instant has been reached
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, ServiceError> {
        if token.is_empty() {
            return Err(ServiceError::InvalidToken);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ServiceError::InvalidToken)?;

        if now.timestamp() >= claims.exp {
            return Err(ServiceError::ExpiredToken);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
