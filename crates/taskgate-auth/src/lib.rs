//! # Taskgate Auth
//!
//! The authentication and authorization core of the Taskgate API.
//!
//! - [`role`]: the closed two-variant [`Role`] type
//! - [`claims`]: the verified identity payload carried by a token
//! - [`jwt`]: the [`TokenCodec`] that issues and verifies signed, time-bounded tokens
//! - [`context`]: attaching verified [`Claims`] to a request and reading them back
//! - [`policy`]: pure allow/deny decisions, including the last-admin guard
//!
//! Nothing here holds mutable state; every function is safe to call from any
//! number of concurrent requests.
//!
//! # Example
//!
//! ```ignore
//! use chrono::Duration;
//! use taskgate_auth::{Role, TokenCodec, policy};
//!
//! let codec = TokenCodec::new(&jwt_config.secret);
//! let token = codec.issue(&user_id.to_string(), "a@x.com", Role::User, Duration::hours(24))?;
//!
//! let claims = codec.verify(&token)?;
//! let requester = policy::Requester::from_claims(&claims)?;
//! policy::can_access_own(task.owner_id, requester.id, requester.role)?;
//! ```

pub mod claims;
pub mod context;
pub mod jwt;
pub mod policy;
pub mod role;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use context::{RequestContext, attach, retrieve};
pub use jwt::TokenCodec;
pub use policy::Requester;
pub use role::{ParseRoleError, Role};
