//! # Taskgate Core
//!
//! Core types shared by every Taskgate crate:
//!
//! - [`errors`]: the [`ServiceError`] taxonomy returned by the auth core and
//!   services, and the HTTP-facing [`AppError`]
//! - [`password`]: salted one-way password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use taskgate_core::{ServiceError, hash_password, verify_password};
//!
//! let digest = hash_password("correct horse")?;
//! assert!(verify_password("correct horse", &digest)?);
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AdminRemoval, AppError, ServiceError};
pub use password::{
    MAX_PASSWORD_BYTES, MIN_PASSWORD_LENGTH, ensure_password_policy, hash_password, verify_password,
};
