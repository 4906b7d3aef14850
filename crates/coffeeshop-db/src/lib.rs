//! # Coffee Shop DB
//!
//! Database pool, embedded migrations and the explicit schema reset used by
//! the administration CLI.
//!
//! Migrations live in the workspace `migrations/` directory and are embedded
//! at compile time. The server applies them only when asked to
//! (`RUN_MIGRATIONS=true`); dropping data is never part of normal startup.
//!
//! # Example
//!
//! ```ignore
//! use coffeeshop_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = init_db_pool(&std::env::var("DATABASE_URL")?).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Embedded migrations from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be passed to the
/// application state for use in request handlers.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Applies pending migrations. Idempotent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Drops every table owned by the service, including the migration history,
/// and re-applies migrations from scratch. All drinks are lost.
pub async fn reset_schema(pool: &PgPool) -> Result<(), MigrateError> {
    warn!("Dropping and recreating the database schema");

    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS drinks")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    run_migrations(pool).await
}
