use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use fichero_core::{DocumentService, DEFAULT_DATA_DIR};
use fichero_storage::LocalStorage;

/// Main entry point for the fichero document store
///
/// Starts the REST server on port 3000 (configurable via FICHERO_REST_ADDR)
/// serving the JSON and CSV document resources, the health endpoint and the
/// Swagger UI.
///
/// # Environment Variables
/// - `FICHERO_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `FICHERO_DATA_DIR`: Base directory for document storage (default: "storage")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fichero_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("FICHERO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("FICHERO_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());

    let data_path = Path::new(&data_dir);
    if !data_path.exists() {
        std::fs::create_dir_all(data_path)?;
    }
    let storage = LocalStorage::new(data_path)?;

    tracing::info!("++ Starting fichero REST on {}", rest_addr);
    tracing::info!(
        "++ Serving documents from {}",
        storage.base_directory().display()
    );

    let state = AppState {
        documents: DocumentService::new(Arc::new(storage)),
    };

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, api_rest::app(state)).await?;

    Ok(())
}
