use axum::extract::State;
use axum::http::StatusCode;

use crate::routes::AppState;

pub async fn health() -> &'static str {
    "OK"
}

/// Readiness: the database must answer a trivial query.
pub async fn ready(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok("OK")
}
