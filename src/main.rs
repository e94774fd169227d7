mod api;
mod config;
mod models;
mod report;
mod storage;
mod viewer;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use config::{Config, DatabaseBackend};
use report::{LinkPublisher, PublicResolver, ReportCatalog};
use storage::{PostgresStore, SnapshotStore, SqliteStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize storage
    let store: Arc<dyn SnapshotStore> = match config.database.backend {
        DatabaseBackend::Sqlite => {
            info!("Using SQLite storage: {}", config.database.url);
            Arc::new(SqliteStore::new(&config.database.url, config.database.max_connections).await?)
        }
        DatabaseBackend::Postgres => {
            info!("Using PostgreSQL storage: {}", config.database.url);
            Arc::new(
                PostgresStore::new(&config.database.url, config.database.max_connections).await?,
            )
        }
    };

    // Initialize database
    info!("Initializing database...");
    store.init().await?;
    info!("Database initialized successfully");

    // Load the report catalog
    let catalog = match config.catalog.path.as_deref() {
        Some(path) => {
            let catalog = ReportCatalog::from_file(path)?;
            info!("Loaded {} report definitions from {}", catalog.len(), path);
            catalog
        }
        None => {
            info!("No REPORT_CATALOG_PATH set, starting with an empty catalog");
            ReportCatalog::default()
        }
    };

    let publisher = LinkPublisher::new(Arc::clone(&store), config.sharing.ttl_days);
    let resolver = PublicResolver::new(Arc::clone(&store));
    info!(
        "Shared links expire after {} days",
        config.sharing.ttl_days
    );

    // Create routers
    let api_router = api::create_api_router(Arc::new(catalog), publisher);
    let viewer_router = viewer::create_viewer_router(resolver);

    // Start editor API server
    let api_addr = format!("{}:{}", config.api_server.host, config.api_server.port);
    let api_listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("🚀 Editor API server listening on http://{}", api_addr);

    // Start public viewer server
    let viewer_addr = format!(
        "{}:{}",
        config.viewer_server.host, config.viewer_server.port
    );
    let viewer_listener = tokio::net::TcpListener::bind(&viewer_addr).await?;
    info!("🚀 Public viewer server listening on http://{}", viewer_addr);

    // Run both servers concurrently
    tokio::try_join!(
        axum::serve(api_listener, api_router),
        axum::serve(viewer_listener, viewer_router),
    )?;

    Ok(())
}
