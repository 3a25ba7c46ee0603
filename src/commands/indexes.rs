//! Indexes command - Ensures MongoDB indexes exist.
//!
//! The server creates indexes on startup as well; this command lets
//! operators provision a fresh database without booting the API.

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the indexes command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Ensuring database indexes...");

    Database::connect(&config).await?;

    tracing::info!("All indexes in place");
    Ok(())
}
