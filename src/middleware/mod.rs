pub mod auth;
pub mod rate_limit;
pub mod session;

pub use auth::{AuthUser, require_bearer};
pub use rate_limit::{ClientRateLimiter, limit_requests};
pub use session::require_session;
