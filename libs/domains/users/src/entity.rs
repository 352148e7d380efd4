use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};

use crate::error::UserError;
use crate::models::User;

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Rows are rebuilt through `User::new`, so a row that fails entity
/// validation surfaces as an error instead of an invalid `User`.
impl TryFrom<Model> for User {
    type Error = UserError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let user = User::new(model.first_name, model.last_name, model.email).map_err(|e| {
            UserError::Internal(format!("Stored user {} is invalid: {}", model.id, e))
        })?;

        Ok(user.with_identity(model.id, model.created_at.into(), model.updated_at.into()))
    }
}

impl ActiveModel {
    /// Full row for a user whose identity has already been assigned
    pub(crate) fn for_insert(user: &User) -> Self {
        ActiveModel {
            id: Set(user.id()),
            first_name: Set(user.first_name().to_owned()),
            last_name: Set(user.last_name().to_owned()),
            email: Set(user.email().to_owned()),
            created_at: Set(user.created_at().into()),
            updated_at: Set(user.updated_at().into()),
        }
    }

    /// Changes the mutable columns and `updated_at`, leaving `created_at` alone
    pub(crate) fn for_update(user: &User) -> Self {
        ActiveModel {
            id: Unchanged(user.id()),
            first_name: Set(user.first_name().to_owned()),
            last_name: Set(user.last_name().to_owned()),
            email: Set(user.email().to_owned()),
            created_at: NotSet,
            updated_at: Set(user.updated_at().into()),
        }
    }
}
