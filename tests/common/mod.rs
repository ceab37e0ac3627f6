// Common test utilities for integration tests

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use itemstash_backend::api::{build_app, API_PREFIX};
use itemstash_backend::config::{init_database, migrate_database, AppSettings, MapEnv};
use itemstash_backend::AppData;
use migration::{Migrator, MigratorTrait};
use poem::test::{TestClient, TestResponse};
use poem::Endpoint;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Creates an in-memory database with migrations applied
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

/// Creates a test client over the full route tree, backed by a fresh database
pub async fn setup_test_client() -> TestClient<impl Endpoint> {
    let app_data = Arc::new(AppData::new(setup_test_db().await));
    let server_url = format!("http://localhost{}", API_PREFIX);

    TestClient::new(build_app(app_data, &server_url))
}

/// Creates a test client over a database at `database_url`, using the
/// production pool settings so requests run on separate connections
pub async fn setup_test_client_with_url(database_url: String) -> TestClient<impl Endpoint> {
    let env = MapEnv::new().with_var("DATABASE_URL", &database_url);
    let settings = AppSettings::from_source(&env).expect("Failed to build settings");

    let db = init_database(&settings)
        .await
        .expect("Failed to open file database");
    migrate_database(&db)
        .await
        .expect("Failed to run migrations");

    let app_data = Arc::new(AppData::new(db));
    let server_url = format!("http://localhost{}", API_PREFIX);

    TestClient::new(build_app(app_data, &server_url))
}

/// SQLite file in the temp directory, removed with its journal files on drop
pub struct TempDbFile {
    path: PathBuf,
}

impl TempDbFile {
    pub fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let path = std::env::temp_dir().join(format!(
            "itemstash_{}_{}_{}.db",
            label,
            std::process::id(),
            nanos
        ));
        Self { path }
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.path.display())
    }
}

impl Drop for TempDbFile {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

/// Reads a response body as untyped JSON
pub async fn body_json(response: TestResponse) -> serde_json::Value {
    response.json().await.value().deserialize()
}
