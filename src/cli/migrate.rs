use crate::config::{init_database, migrate_database, reset_database, AppSettings};

/// Run database migrations
///
/// Connects to the database and runs all pending migrations.
/// It does not build AppData or start the server.
pub async fn run_migrations(settings: &AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    let db = init_database(settings).await?;
    migrate_database(&db).await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}

/// Drop all tables and re-apply every migration
pub async fn reset(settings: &AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::warn!("Resetting database {}", settings.database_url());

    let db = init_database(settings).await?;
    reset_database(&db).await?;

    Ok(())
}
