use axum::{Router, routing::get};
use database::postgres::DatabaseConnection;
use domain_users::{InMemoryUserRepository, PgUserRepository, UserService, handlers};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// `db` selects the store: PostgreSQL when a connection is given, otherwise
/// a fresh in-memory store seeded with sample users.
pub fn routes(db: Option<DatabaseConnection>) -> Router {
    let users = match db {
        Some(db) => handlers::router(UserService::new(PgUserRepository::new(db))),
        None => handlers::router(UserService::new(InMemoryUserRepository::new())),
    };

    Router::new().nest("/users", users)
}

/// Router with the `/ready` endpoint, merged next to the stateless app router.
pub fn ready_router(db: Option<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(db)
}
