//! Schema definitions and migration utilities.
//!
//! Migrations are embedded at compile time and are idempotent: every
//! statement checks for existing objects before creating them, so running
//! them on every startup is safe.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the users table (001_users.sql).
pub const USERS_MIGRATION: &str = include_str!("../../../migrations/001_users.sql");

/// Embedded migration SQL for the notes table (002_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/002_notes.sql");

/// Run all migrations against the database.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running users migration (001_users.sql)...");
    sqlx::raw_sql(USERS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("users migration failed: {}", e)))?;

    tracing::debug!("Running notes migration (002_notes.sql)...");
    sqlx::raw_sql(NOTES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `notes` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_migration_embedded() {
        assert!(USERS_MIGRATION.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(USERS_MIGRATION.contains("users_email_unique"));
    }

    #[test]
    fn notes_migration_embedded() {
        assert!(NOTES_MIGRATION.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(NOTES_MIGRATION.contains("owner_id"));
        assert!(NOTES_MIGRATION.contains("tags"));
        assert!(NOTES_MIGRATION.contains("notes_owner_created"));
        assert!(NOTES_MIGRATION.contains("notes_public_created"));
    }
}
