//! Application builder: wires router, middleware and state into an Axum
//! app, and runs it.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use liorian_content::ContentCatalog;
use liorian_core::config::AppConfig;
use liorian_core::error::AppError;
use liorian_core::result::AppResult;
use liorian_core::traits::{Clock, SystemClock};
use liorian_storage::{build_kv_store, build_object_store};
use liorian_training::TrainingStore;

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the stores from `config` and serve until Ctrl+C.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    info!(
        kv = %config.storage.kv.provider,
        s3 = config.storage.s3.enabled,
        "Starting Liorian server"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let kv = build_kv_store(&config.storage.kv).await?;
    let objects = build_object_store(&config.storage.s3).await?;
    let catalog = Arc::new(ContentCatalog::load(kv.clone(), config.content.clone()).await?);
    let training = Arc::new(TrainingStore::new(objects, clock.clone()));

    let addr = config.server.bind_address();
    let state = AppState::new(config, kv, catalog, training, clock);
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    info!(%addr, "Liorian server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Liorian server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
