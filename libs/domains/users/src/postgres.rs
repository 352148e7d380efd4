use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::{
    DatabaseConnection, DbBackend, DbErr, EntityTrait, FromQueryResult, QueryOrder, Statement,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::User,
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = self
            .base
            .find_by_id(id)
            .await
            .map_err(UserError::database)?;

        model.map(User::try_from).transpose()
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .all(self.base.db())
            .await
            .map_err(UserError::database)?;

        models.into_iter().map(User::try_from).collect()
    }

    async fn add(&self, user: User) -> UserResult<User> {
        let now = Utc::now();
        let user = user.with_identity(Uuid::now_v7(), now, now);

        let model = self
            .base
            .insert(entity::ActiveModel::for_insert(&user))
            .await
            .map_err(UserError::database)?;

        tracing::info!(user_id = %model.id, "Created user");
        User::try_from(model)
    }

    async fn update(&self, mut user: User) -> UserResult<User> {
        user.touch(Utc::now());

        match self.base.update(entity::ActiveModel::for_update(&user)).await {
            Ok(model) => {
                tracing::info!(user_id = %model.id, "Updated user");
                User::try_from(model)
            }
            Err(DbErr::RecordNotUpdated) => {
                tracing::debug!(user_id = %user.id(), "Update of unknown user ignored");
                Ok(user)
            }
            Err(e) => Err(UserError::database(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let rows = self
            .base
            .delete_by_id(id)
            .await
            .map_err(UserError::database)?;

        if rows > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> UserResult<bool> {
        self.base.exists(id).await.map_err(UserError::database)
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT id, first_name, last_name, email, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            LIMIT 1
            "#,
            [email.into()],
        );

        let model = entity::Model::find_by_statement(stmt)
            .one(self.base.db())
            .await
            .map_err(UserError::database)?;

        model.map(User::try_from).transpose()
    }
}
