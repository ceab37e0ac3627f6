use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::AppSettings;
use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;

/// Build pool options for the configured database
///
/// In-memory SQLite is pinned to one connection: each extra connection
/// would see its own empty database.
pub fn connect_options(settings: &AppSettings) -> ConnectOptions {
    let mut options = ConnectOptions::new(settings.database_url().to_string());

    if settings.is_in_memory_sqlite() {
        options.max_connections(1).min_connections(1);
    } else {
        options
            .max_connections(settings.max_connections())
            .min_connections(settings.min_connections());
    }

    options.sqlx_logging(settings.sql_logging());

    options
}

/// Initialize the database connection pool
///
/// Creates the parent directory of a file-backed SQLite database first.
/// Does NOT run migrations - call migrate_database() separately.
///
/// # Returns
/// * `Ok(DatabaseConnection)` - Connection established successfully
/// * `Err(InternalError)` - Connection failed
pub async fn init_database(settings: &AppSettings) -> Result<DatabaseConnection, InternalError> {
    if let Some(dir) = settings.sqlite_data_dir() {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Could not create database directory {}: {}", dir.display(), e);
        }
    }

    let db = Database::connect(connect_options(settings))
        .await
        .map_err(|source| DatabaseError::Connect {
            url: settings.database_url().to_string(),
            source,
        })?;

    tracing::debug!("Connected to database: {}", settings.database_url());

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|source| DatabaseError::Migration { source })?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

/// Drop every table and re-apply all migrations
pub async fn reset_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::fresh(db)
        .await
        .map_err(|source| DatabaseError::Migration { source })?;

    tracing::info!("Database reset completed");

    Ok(())
}

/// Start the per-request transaction
///
/// Dropping the returned transaction without committing rolls it back.
pub async fn begin_transaction(
    db: &DatabaseConnection,
) -> Result<DatabaseTransaction, InternalError> {
    let txn = db
        .begin()
        .await
        .map_err(|source| DatabaseError::TransactionBegin { source })?;
    Ok(txn)
}

pub async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
    txn.commit()
        .await
        .map_err(|source| DatabaseError::TransactionCommit { source })?;
    Ok(())
}
