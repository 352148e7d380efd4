//! Readiness handler backed by the configured user store.

use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use database::postgres::{DatabaseConnection, check_health};

/// Readiness check endpoint.
///
/// With the in-memory store there is nothing to probe and the service is
/// always ready. With PostgreSQL the pool must answer `SELECT 1`.
pub async fn ready_handler(State(db): State<Option<DatabaseConnection>>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = db.as_ref() {
        let database: HealthCheckFuture<'_> =
            Box::pin(async move { check_health(db).await.map_err(|e| e.to_string()) });
        checks.push(("database", database));
    }

    run_health_checks(checks).await
}
