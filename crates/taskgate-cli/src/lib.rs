//! # Taskgate CLI
//!
//! Operator commands that run outside the HTTP API.
//!
//! Registration always yields role `user`, so [`admin::create_admin`] is how
//! the first administrator comes to exist.
//!
//! ## Usage
//!
//! ```ignore
//! use taskgate_cli::seeder::{SeedConfig, seed};
//!
//! let store = PgStore::new(pool);
//! seed(&store, &store, SeedConfig::new(10).with_tasks_per_user(5)).await?;
//! ```

pub mod admin;
pub mod seeder;
