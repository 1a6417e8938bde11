//! Fake data for local development.
//!
//! Seeded accounts all have role `user` and share [`SEED_PASSWORD`], hashed
//! once per run.

use std::time::Instant;

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Sentence, Words};
use uuid::Uuid;

use taskgate_core::{ServiceError, hash_password};
use taskgate_db::{TaskStore, UserStore};
use taskgate_models::{Task, User};

pub const SEED_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy)]
pub struct SeedConfig {
    pub users: usize,
    pub tasks_per_user: usize,
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            tasks_per_user: 5,
        }
    }

    pub fn with_tasks_per_user(mut self, tasks_per_user: usize) -> Self {
        self.tasks_per_user = tasks_per_user;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub tasks: usize,
}

/// Generates users with unique emails. The index prefix keeps faker
/// collisions from tripping the unique constraint.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<User> {
    let run = Uuid::new_v4().simple().to_string();
    let run = &run[..8];

    (0..count)
        .map(|idx| {
            let email: String = SafeEmail().fake();
            User::new(format!("seed{}.{}.{}", run, idx, email), password_hash)
        })
        .collect()
}

pub fn generate_tasks(user_id: Uuid, count: usize) -> Vec<Task> {
    (0..count)
        .map(|idx| {
            let words: Vec<String> = Words(2..5).fake();
            let description: String = Sentence(4..10).fake();
            let mut task = Task::new(user_id, words.join(" "), description);
            task.completed = idx % 3 == 0;
            task
        })
        .collect()
}

pub async fn seed(
    users: &dyn UserStore,
    tasks: &dyn TaskStore,
    config: SeedConfig,
) -> Result<SeedSummary, ServiceError> {
    let start = Instant::now();
    let password_hash = hash_password(SEED_PASSWORD)?;

    let mut summary = SeedSummary { users: 0, tasks: 0 };
    for user in generate_users(config.users, &password_hash) {
        users.create_user(&user).await?;
        summary.users += 1;

        for task in generate_tasks(user.id, config.tasks_per_user) {
            tasks.create_task(&task).await?;
            summary.tasks += 1;
        }
    }

    println!(
        "✅ Seeded {} users and {} tasks in {:?}",
        summary.users,
        summary.tasks,
        start.elapsed()
    );
    Ok(summary)
}
