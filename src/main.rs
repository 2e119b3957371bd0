// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::dataset_repository::DatasetRepository;
use crate::infrastructure::config::{load_app_config, DataSource};
use crate::infrastructure::csv_repository::CsvRepository;
use crate::infrastructure::embedded_repository::EmbeddedRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    data_status, dataset_json, health_check, index, section_json, section_page,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing; RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Create repository (infrastructure layer)
    let repository: Arc<dyn DatasetRepository> = match config.data.source {
        DataSource::Embedded => Arc::new(EmbeddedRepository::new()),
        DataSource::Csv => {
            tracing::info!("Reading topic tables from {}", config.data.dir.display());
            Arc::new(CsvRepository::new(config.data.dir.clone()))
        }
    };

    // Create services (application layer)
    let state = Arc::new(AppState {
        dashboard_service: DashboardService::new(repository),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/sections/:slug", get(section_page))
        .route("/api/sections/:slug", get(section_json))
        .route("/api/datasets/:topic", get(dataset_json))
        .route("/api/data-status", get(data_status))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Serving dashboard on http://{}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
