pub mod config;
pub mod error;
pub mod middleware;
pub mod migrate;
pub mod observability;
pub mod routes;
pub mod server;

pub use config::Config;
pub use routes::AppState;

/// Build the application router against existing pools. Used by the server
/// and by integration tests, which drive it with `tower::ServiceExt`.
pub fn create_app(read_db: sqlx::SqlitePool, write_db: sqlx::SqlitePool) -> anyhow::Result<axum::Router> {
    let state = AppState::new(read_db, write_db)?;

    Ok(routes::router(state))
}
