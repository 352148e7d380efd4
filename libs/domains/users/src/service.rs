use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, User, UserResponse};
use crate::repository::UserRepository;

/// User service for business logic
///
/// Absence is reported as `None`/`false`; the HTTP layer decides what that
/// means for the status code.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn get_by_id(&self, id: Uuid) -> UserResult<Option<UserResponse>> {
        let user = self.repository.get_by_id(id).await?;
        Ok(user.map(UserResponse::from))
    }

    pub async fn get_all(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.get_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Rejects an email that is already taken (case-insensitive) before
    /// the entity is even built.
    pub async fn create(&self, input: CreateUserRequest) -> UserResult<UserResponse> {
        if self.repository.get_by_email(&input.email).await?.is_some() {
            tracing::info!(email = %input.email, "Rejected duplicate email");
            return Err(UserError::DuplicateEmail(input.email));
        }

        let user = User::new(input.first_name, input.last_name, input.email)?;
        let created = self.repository.add(user).await?;

        tracing::debug!(user_id = %created.id(), "User created via service");
        Ok(created.into())
    }

    /// Returns `None` when no user has this id.
    ///
    /// The email is not checked for duplicates here.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateUserRequest,
    ) -> UserResult<Option<UserResponse>> {
        let Some(mut user) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        user.update_basic_info(input.first_name, input.last_name)?;
        user.update_email(input.email)?;

        let updated = self.repository.update(user).await?;
        Ok(Some(updated.into()))
    }

    /// `true` if a user was deleted, `false` if none had this id.
    pub async fn delete(&self, id: Uuid) -> UserResult<bool> {
        if !self.repository.exists(id).await? {
            return Ok(false);
        }

        self.repository.delete(id).await?;
        Ok(true)
    }
}
