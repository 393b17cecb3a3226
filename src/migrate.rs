//! Database migration utilities

use std::path::Path;

use crate::config::Config;

/// Create the database when missing and apply all pending migrations.
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Running database migrations...");

    let pool = mealmind_db::pool::create_pool(&config.database.url, 1).await?;
    mealmind_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drop the database file if it exists, then recreate it with migrations.
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Resetting database...");

    let path = database_path(&config.database.url);
    if path != ":memory:" && Path::new(&path).exists() {
        std::fs::remove_file(&path)?;
        tracing::info!("Dropped database: {}", path);
    }

    migrate(config).await
}

/// File path behind a `sqlite:` url, query string stripped.
fn database_path(url: &str) -> String {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);

    path.split('?').next().unwrap_or(path).to_owned()
}
