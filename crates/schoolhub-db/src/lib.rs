//! # SchoolHub DB
//!
//! Postgres connection pool lifecycle for the SchoolHub API.
//!
//! The pool is created once at process start, handed to every service through
//! `AppState`, and closed during graceful shutdown. Nothing in the workspace
//! holds a global connection.
//!
//! [`provisioning`] holds the account + profile insert shared by the API and
//! the CLI.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_config::DatabaseConfig;
//! use schoolhub_db::{close_pool, init_db_pool, run_migrations};
//!
//! let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//! let pool = init_db_pool(&config).await?;
//! run_migrations(&pool).await?;
//! // ...
//! close_pool(pool).await;
//! ```

pub mod provisioning;

use schoolhub_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a connection pool sized by `config.max_connections`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Waits for checked-out connections to return, then closes the pool.
pub async fn close_pool(pool: PgPool) {
    pool.close().await;
    info!("Database pool closed");
}
