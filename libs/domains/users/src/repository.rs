use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
///
/// Absence is never an error: lookups return `None`, `exists` returns
/// `false` and `delete` of an unknown id does nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// All users in storage order
    async fn get_all(&self) -> UserResult<Vec<User>>;

    /// Stores a new user, assigning its id and both timestamps
    async fn add(&self, user: User) -> UserResult<User>;

    /// Persists the user's fields and refreshes `updated_at`
    async fn update(&self, user: User) -> UserResult<User>;

    async fn delete(&self, id: Uuid) -> UserResult<()>;

    async fn exists(&self, id: Uuid) -> UserResult<bool>;

    /// Case-insensitive email lookup
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository
///
/// Every operation holds the one lock for its whole duration.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Store pre-seeded with three sample users
    pub fn new() -> Self {
        Self {
            users: Mutex::new(sample_users()),
        }
    }

    pub fn empty() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn sample_users() -> Vec<User> {
    let now = Utc::now();
    let seed = [
        (
            "11111111-1111-1111-1111-111111111111",
            "Matti",
            "Meikäläinen",
            "matti.meikalainen@example.com",
            30,
            30,
        ),
        (
            "22222222-2222-2222-2222-222222222222",
            "Maija",
            "Virtanen",
            "maija.virtanen@example.com",
            15,
            5,
        ),
        (
            "33333333-3333-3333-3333-333333333333",
            "Teppo",
            "Testaaja",
            "teppo.testaaja@example.com",
            7,
            1,
        ),
    ];

    seed.into_iter()
        .filter_map(|(id, first, last, email, created_days_ago, updated_days_ago)| {
            let id = Uuid::parse_str(id).ok()?;
            let user = User::new(first, last, email).ok()?;
            Some(user.with_identity(
                id,
                now - Duration::days(created_days_ago),
                now - Duration::days(updated_days_ago),
            ))
        })
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.id() == id).cloned())
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.lock().await;
        Ok(users.clone())
    }

    async fn add(&self, user: User) -> UserResult<User> {
        let now = Utc::now();
        let user = user.with_identity(Uuid::now_v7(), now, now);

        let mut users = self.users.lock().await;
        users.push(user.clone());

        tracing::info!(user_id = %user.id(), "Created user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.lock().await;

        let Some(stored) = users.iter_mut().find(|u| u.id() == user.id()) else {
            tracing::debug!(user_id = %user.id(), "Update of unknown user ignored");
            return Ok(user);
        };

        // Re-applied through the validated mutators; created_at is never copied over.
        let mut next = stored.clone();
        next.update_basic_info(user.first_name(), user.last_name())?;
        next.update_email(user.email())?;
        next.touch(Utc::now());
        *stored = next.clone();

        tracing::info!(user_id = %next.id(), "Updated user");
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.lock().await;
        let before = users.len();
        users.retain(|u| u.id() != id);

        if users.len() < before {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> UserResult<bool> {
        let users = self.users.lock().await;
        Ok(users.iter().any(|u| u.id() == id))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.iter().find(|u| u.has_email(email)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const MATTI_ID: &str = "11111111-1111-1111-1111-111111111111";

    fn new_user(email: &str) -> User {
        User::new("Liisa", "Laaksonen", email).unwrap()
    }

    #[tokio::test]
    async fn test_seeded_with_sample_users() {
        let repo = InMemoryUserRepository::new();
        let users = repo.get_all().await.unwrap();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id(), Uuid::parse_str(MATTI_ID).unwrap());
        assert_eq!(users[0].first_name(), "Matti");
        assert_eq!(users[1].email(), "maija.virtanen@example.com");
        assert_eq!(users[2].last_name(), "Testaaja");

        let maija = &users[1];
        assert_eq!((maija.updated_at() - maija.created_at()).num_days(), 10);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let repo = InMemoryUserRepository::empty();
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_assigns_identity() {
        let repo = InMemoryUserRepository::empty();
        let created = repo.add(new_user("liisa@example.com")).await.unwrap();

        assert!(!created.id().is_nil());
        assert_eq!(created.created_at(), created.updated_at());

        let fetched = repo.get_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_all_keeps_insertion_order() {
        let repo = InMemoryUserRepository::empty();
        let first = repo.add(new_user("first@example.com")).await.unwrap();
        let second = repo.add(new_user("second@example.com")).await.unwrap();

        let ids: Vec<_> = repo.get_all().await.unwrap().iter().map(User::id).collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[tokio::test]
    async fn test_get_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();

        let found = repo
            .get_by_email("MATTI.Meikalainen@EXAMPLE.com")
            .await
            .unwrap();
        assert_eq!(found.unwrap().first_name(), "Matti");

        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::parse_str(MATTI_ID).unwrap();
        let mut user = repo.get_by_id(id).await.unwrap().unwrap();
        let created_at = user.created_at();
        let previous_update = user.updated_at();

        user.update_basic_info("Matias", "Meikäläinen").unwrap();
        let updated = repo.update(user).await.unwrap();

        assert_eq!(updated.first_name(), "Matias");
        assert_eq!(updated.created_at(), created_at);
        assert!(updated.updated_at() > previous_update);
        assert_eq!(repo.get_by_id(id).await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_user_returns_input() {
        let repo = InMemoryUserRepository::empty();
        let user = new_user("ghost@example.com");

        let returned = repo.update(user.clone()).await.unwrap();
        assert_eq!(returned, user);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let repo = InMemoryUserRepository::new();
        let id = Uuid::parse_str(MATTI_ID).unwrap();

        assert!(repo.exists(id).await.unwrap());
        repo.delete(id).await.unwrap();
        assert!(!repo.exists(id).await.unwrap());
        assert_eq!(repo.get_all().await.unwrap().len(), 2);

        // deleting again is a no-op
        repo.delete(id).await.unwrap();
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_kept() {
        let repo = Arc::new(InMemoryUserRepository::empty());

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.add(new_user(&format!("user{}@example.com", i))).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.get_all().await.unwrap().len(), 20);
    }
}
