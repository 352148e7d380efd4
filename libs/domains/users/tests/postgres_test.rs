//! PgUserRepository against a real PostgreSQL container
//!
//! Requires Docker: `cargo test -p domain_users -- --ignored`

use domain_users::*;
use test_utils::{TestDatabase, TestDataBuilder};

const USERS_TABLE: &str = r#"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL
);
CREATE UNIQUE INDEX users_email_lower_idx ON users (LOWER(email));
"#;

async fn setup() -> (TestDatabase, PgUserRepository) {
    let db = TestDatabase::new().await;
    db.execute_sql(USERS_TABLE).await;
    let repo = PgUserRepository::new(db.connection());
    (db, repo)
}

fn user_for(builder: &TestDataBuilder, suffix: &str) -> User {
    User::new(builder.first_name(), builder.last_name(), builder.email(suffix)).unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_add_and_get_by_id() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_add_get");

    let created = repo.add(user_for(&builder, "main")).await.unwrap();
    assert!(!created.id().is_nil());
    assert_eq!(created.created_at(), created.updated_at());

    let fetched = repo.get_by_id(created.id()).await.unwrap().unwrap();
    assert_eq!(fetched.id(), created.id());
    assert_eq!(fetched.email(), builder.email("main"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_all_in_creation_order() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_get_all");

    let first = repo.add(user_for(&builder, "one")).await.unwrap();
    let second = repo.add(user_for(&builder, "two")).await.unwrap();

    let all = repo.get_all().await.unwrap();
    let ids: Vec<_> = all.iter().map(User::id).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_by_email_is_case_insensitive() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_email");

    let created = repo.add(user_for(&builder, "Mixed")).await.unwrap();

    let found = repo
        .get_by_email(&builder.email("mixed").to_uppercase())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id(), created.id());

    assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_keeps_created_at() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_update");

    let mut user = repo.add(user_for(&builder, "main")).await.unwrap();
    let created_at = user.created_at();

    user.update_basic_info("Updated", "Surname").unwrap();
    let updated = repo.update(user).await.unwrap();

    assert_eq!(updated.first_name(), "Updated");
    assert_eq!(updated.created_at(), created_at);
    assert!(updated.updated_at() >= created_at);

    let fetched = repo.get_by_id(updated.id()).await.unwrap().unwrap();
    assert_eq!(fetched.last_name(), "Surname");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_and_exists() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_delete");

    let created = repo.add(user_for(&builder, "main")).await.unwrap();
    assert!(repo.exists(created.id()).await.unwrap());

    repo.delete(created.id()).await.unwrap();
    assert!(!repo.exists(created.id()).await.unwrap());

    // Unknown id is a no-op
    repo.delete(created.id()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_rejects_duplicate_email() {
    let (_db, repo) = setup().await;
    let builder = TestDataBuilder::from_test_name("pg_service_dup");
    let service = UserService::new(repo);

    let request = CreateUserRequest {
        first_name: builder.first_name(),
        last_name: builder.last_name(),
        email: builder.email("dup"),
    };
    service.create(request.clone()).await.unwrap();

    let duplicate = CreateUserRequest {
        email: request.email.to_uppercase(),
        ..request
    };
    let err = service.create(duplicate).await.unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));
}
