use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{UserError, UserResult};

pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 255;

/// User entity.
///
/// Fields are private: a `User` can only be built through [`User::new`] and
/// changed through [`User::update_basic_info`] / [`User::update_email`], all
/// of which validate before touching any field. Identity and timestamps are
/// stamped by the repository that stores the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Validates all three fields and returns an unsaved user
    /// (nil id, epoch timestamps).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> UserResult<Self> {
        let (first_name, last_name, email) = (first_name.into(), last_name.into(), email.into());
        validate_names(&first_name, &last_name)?;
        validate_email(&email)?;

        Ok(Self {
            id: Uuid::nil(),
            first_name,
            last_name,
            email,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        })
    }

    /// Replaces both names, or neither if either is invalid.
    pub fn update_basic_info(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> UserResult<()> {
        let (first_name, last_name) = (first_name.into(), last_name.into());
        validate_names(&first_name, &last_name)?;

        self.first_name = first_name;
        self.last_name = last_name;
        Ok(())
    }

    pub fn update_email(&mut self, email: impl Into<String>) -> UserResult<()> {
        let email = email.into();
        validate_email(&email)?;

        self.email = email;
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn with_identity(
        mut self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        self.id = id;
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub(crate) fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    pub(crate) fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

fn invalid(message: impl Into<String>) -> UserError {
    UserError::Validation(message.into())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// Lengths count characters, not bytes, and are taken before any trimming.
fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// First name is checked before last name within each rule, so the
/// reported error is deterministic.
fn validate_names(first_name: &str, last_name: &str) -> UserResult<()> {
    let fields = [("First name", first_name), ("Last name", last_name)];

    for (label, value) in fields {
        if is_blank(value) {
            return Err(invalid(format!("{} cannot be empty", label)));
        }
    }

    for (label, value) in fields {
        if char_len(value) < NAME_MIN_LEN {
            return Err(invalid(format!(
                "{} must be at least {} characters long",
                label, NAME_MIN_LEN
            )));
        }
    }

    for (label, value) in fields {
        if char_len(value) > NAME_MAX_LEN {
            return Err(invalid(format!(
                "{} must be at most {} characters long",
                label, NAME_MAX_LEN
            )));
        }
    }

    Ok(())
}

fn validate_email(email: &str) -> UserResult<()> {
    if is_blank(email) {
        return Err(invalid("Email cannot be empty"));
    }

    if !email.contains('@') {
        return Err(invalid("Email must be a valid email address"));
    }

    if char_len(email) > EMAIL_MAX_LEN {
        return Err(invalid(format!(
            "Email must be at most {} characters long",
            EMAIL_MAX_LEN
        )));
    }

    Ok(())
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Matti", min_length = 3, max_length = 100)]
    pub first_name: String,
    #[schema(example = "Meikäläinen", min_length = 3, max_length = 100)]
    pub last_name: String,
    #[schema(example = "matti@example.com", max_length = 255)]
    pub email: String,
}

/// Body of `PUT /users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[schema(example = "Matti", min_length = 3, max_length = 100)]
    pub first_name: String,
    #[schema(example = "Meikäläinen", min_length = 3, max_length = 100)]
    pub last_name: String,
    #[schema(example = "matti@example.com", max_length = 255)]
    pub email: String,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
