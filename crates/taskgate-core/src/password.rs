//! Password hashing and verification.
//!
//! Digests are bcrypt strings: the salt and cost are embedded in the digest,
//! so hashing the same plaintext twice yields two different digests that both
//! verify. Verification compares in constant time.
//!
//! bcrypt only reads the first 72 bytes of its input, so longer passwords are
//! refused instead of silently matching every password sharing that prefix.

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::ServiceError;

/// Minimum plaintext length accepted at registration or password change.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Longest password bcrypt can hash without truncation, in bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Registration policy check. Must run before [`hash_password`].
pub fn ensure_password_policy(password: &str) -> Result<(), ServiceError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    ensure_hashable(password)
}

fn ensure_hashable(password: &str) -> Result<(), ServiceError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServiceError::validation(format!(
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        )));
    }
    Ok(())
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    ensure_hashable(password)?;
    hash(password, DEFAULT_COST)
        .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Failed to hash password: {}", e)))
}

/// Returns `Ok(false)` on mismatch; `Err` only when `digest` is not a bcrypt digest.
///
/// A password longer than [`MAX_PASSWORD_BYTES`] can never have been hashed,
/// so it is a mismatch rather than an error.
pub fn verify_password(password: &str, digest: &str) -> Result<bool, ServiceError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Ok(false);
    }
    verify(password, digest)
        .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let digest = hash_password("password1").unwrap();
        assert_ne!(digest, "password1");
        assert!(verify_password("password1", &digest).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let digest = hash_password("password1").unwrap();
        assert!(!verify_password("password2", &digest).unwrap());
    }

    #[test]
    fn test_bytes_past_72_are_not_ignored() {
        let prefix = "x".repeat(MAX_PASSWORD_BYTES);
        let longer = format!("{}A", prefix);
        let other = format!("{}B", prefix);

        assert!(matches!(
            hash_password(&longer),
            Err(ServiceError::Validation(_))
        ));

        let digest = hash_password(&prefix).unwrap();
        assert!(verify_password(&prefix, &digest).unwrap());
        assert!(!verify_password(&longer, &digest).unwrap());
        assert!(!verify_password(&other, &digest).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_password("samepassword").unwrap();
        let second = hash_password("samepassword").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("samepassword", &first).unwrap());
        assert!(verify_password("samepassword", &second).unwrap());
    }

    #[test]
    fn test_verify_malformed_digest() {
        assert!(verify_password("password1", "not_a_bcrypt_digest").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(ensure_password_policy("1234567").is_err());
        assert!(ensure_password_policy("12345678").is_ok());
        assert!(ensure_password_policy("").is_err());
        assert!(ensure_password_policy(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
        assert!(matches!(
            ensure_password_policy(&"a".repeat(MAX_PASSWORD_BYTES + 1)),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn test_password_policy_counts_characters() {
        // 8 characters, more than 8 bytes
        assert!(ensure_password_policy("pässwörd").is_ok());
        assert!(matches!(
            ensure_password_policy("short"),
            Err(ServiceError::Validation(_))
        ));
    }
}
