//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! recipe-box migrate
//! ```
//!
//! # Environment Variables
//!
//! - `RECIPE_BOX_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)
//!
//! Migrations live in `crates/server/migrations/`.

use thiserror::Error;
use tracing::info;

use recipe_box_server::config::{ConfigError, require_database_url};
use recipe_box_server::store;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Database URL is missing.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the schema migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = require_database_url("RECIPE_BOX_DATABASE_URL")?;

    info!("Connecting to database...");
    let pool = store::create_pool(&database_url).await?;

    info!("Running migrations...");
    store::run_migrations(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
