// Test utilities shared across unit tests
// Only compiled when running tests

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::stores::ItemStore;
use crate::types::db::item;

/// Creates an in-memory database with migrations applied
///
/// Pinned to a single pooled connection so every query sees the same database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Creates AppData over a fresh test database
pub async fn setup_test_app_data() -> Arc<AppData> {
    Arc::new(AppData::new(setup_test_db().await))
}

/// Inserts an item directly through the store
pub async fn seed_item(
    conn: &impl ConnectionTrait,
    name: &str,
    description: Option<&str>,
) -> item::Model {
    ItemStore::new()
        .create(conn, name.to_string(), description.map(str::to_string))
        .await
        .expect("Failed to seed item")
}
