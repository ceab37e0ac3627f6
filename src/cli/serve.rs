use std::sync::Arc;

use poem::{listener::TcpListener, Server};

use crate::api::{build_app, API_PREFIX};
use crate::app_data::AppData;
use crate::config::{init_database, migrate_database, AppSettings};

/// Connect, migrate, and serve HTTP until the process is stopped
pub async fn run_server(settings: &AppSettings) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Application startup: initializing database...");
    let db = init_database(settings).await?;
    migrate_database(&db).await?;
    tracing::info!("Application startup: database initialized");

    let app_data = Arc::new(AppData::new(db));

    let address = settings.server_address();
    let server_url = format!("http://localhost:{}{}", settings.server_port(), API_PREFIX);
    let app = build_app(app_data.clone(), &server_url);

    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger", settings.server_port());

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("Failed to listen for shutdown signal: {}", e);
                }
            },
            None,
        )
        .await?;

    tracing::info!("Application shutdown: closing database connections");
    app_data.db.clone().close().await?;

    Ok(())
}
