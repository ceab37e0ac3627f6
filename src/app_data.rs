use sea_orm::DatabaseConnection;
use crate::stores::ItemStore;

/// Centralized application data following the main-owned stores pattern
///
/// Created once in main.rs and handed to the API layer behind an `Arc`.
///
/// ```text
/// main.rs
///   ↓
/// init_database() + migrate_database()
///   ↓
/// AppData::new(db)
///   ├─ db (DatabaseConnection pool)
///   └─ item_store (stateless; every call takes the connection)
///   ↓ wrapped in Arc<AppData>
///   └─ ItemsApi::new(app_data) → one transaction per request
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub item_store: ItemStore,
}

impl AppData {
    pub fn new(db: DatabaseConnection) -> Self {
        tracing::debug!("Creating stores...");
        Self {
            db,
            item_store: ItemStore::new(),
        }
    }
}
