//! # Taskgate DB
//!
//! Persistence for the Taskgate API.
//!
//! - [`store`]: the [`UserStore`] and [`TaskStore`] contracts
//! - [`postgres`]: [`PgStore`], the PostgreSQL implementation
//! - [`memory`]: [`MemoryStore`], an in-process implementation for tests
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use taskgate_db::{MIGRATOR, PgStore, init_db_pool};
//!
//! let pool = init_db_pool(&server_config.database_url).await?;
//! MIGRATOR.run(&pool).await?;
//! let store = Arc::new(PgStore::new(pool));
//! ```

pub mod memory;
pub mod postgres;
pub mod store;

use sqlx::migrate::Migrator;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{TaskStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Embedded schema migrations, applied at server start and by the CLI.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a PostgreSQL pool.
///
/// Call once at startup; the pool is cheap to clone and is shared by every
/// request through [`PgStore`].
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}
