//! PostgreSQL store tests. These need a reachable `DATABASE_URL`; run them
//! with `cargo test -- --ignored`.

use sqlx::PgPool;
use taskgate_auth::Role;
use taskgate_core::ServiceError;
use taskgate_db::{PgStore, TaskStore, UserStore};
use taskgate_models::{Task, UpdateTaskRequest, User};
use uuid::Uuid;

fn user(email: &str, role: Role) -> User {
    User::with_role(email, "not-a-real-hash".to_string(), role)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_round_trip_and_unique_email(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = user("alice@example.com", Role::User);
    store.create_user(&alice).await.unwrap();

    let found = store
        .find_user_by_email("alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, alice.id);
    assert_eq!(found.role, Role::User);

    let duplicate = user("alice@example.com", Role::Admin);
    assert!(matches!(
        store.create_user(&duplicate).await,
        Err(ServiceError::EmailExists)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_count_by_role_and_update(pool: PgPool) {
    let store = PgStore::new(pool);
    let admin = user("admin@example.com", Role::Admin);
    let mut alice = user("alice@example.com", Role::User);
    store.create_user(&admin).await.unwrap();
    store.create_user(&alice).await.unwrap();

    assert_eq!(store.count_users_by_role(Role::Admin).await.unwrap(), 1);

    alice.role = Role::Admin;
    store.update_user(&alice).await.unwrap();
    assert_eq!(store.count_users_by_role(Role::Admin).await.unwrap(), 2);

    let ghost = user("ghost@example.com", Role::User);
    assert!(matches!(
        store.update_user(&ghost).await,
        Err(ServiceError::UserNotFound)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_task_lifecycle_and_cascade(pool: PgPool) {
    let store = PgStore::new(pool);
    let alice = user("alice@example.com", Role::User);
    let bob = user("bob@example.com", Role::User);
    store.create_user(&alice).await.unwrap();
    store.create_user(&bob).await.unwrap();

    let mut task = Task::new(alice.id, "Write tests", "");
    store.create_task(&task).await.unwrap();
    store
        .create_task(&Task::new(bob.id, "Bob's task", ""))
        .await
        .unwrap();

    task.apply(UpdateTaskRequest {
        completed: Some(true),
        ..Default::default()
    });
    store.update_task(&task).await.unwrap();

    let stored = store.find_task_by_id(task.id).await.unwrap().unwrap();
    assert!(stored.completed);
    assert_eq!(store.list_tasks_by_user(alice.id).await.unwrap().len(), 1);
    assert_eq!(store.list_all_tasks().await.unwrap().len(), 2);

    store.delete_user(alice.id).await.unwrap();
    assert!(store.find_task_by_id(task.id).await.unwrap().is_none());
    assert_eq!(store.list_all_tasks().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_task_for_unknown_owner(pool: PgPool) {
    let store = PgStore::new(pool);
    let orphan = Task::new(Uuid::new_v4(), "Nobody's", "");

    assert!(matches!(
        store.create_task(&orphan).await,
        Err(ServiceError::UserNotFound)
    ));
    assert!(matches!(
        store.delete_task(orphan.id).await,
        Err(ServiceError::TaskNotFound)
    ));
}
