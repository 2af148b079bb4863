use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use visit_image_jobs::{
    app_state::AppState,
    config::AppConfig,
    routes,
    services::{image_fetcher::HttpImageFetcher, store_directory::StoreDirectory},
};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing visit-image-jobs server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);
    routes::metrics::describe();

    // Reference data must load before we accept any traffic
    tracing::info!(path = %config.store_master_path, "Loading store directory");
    let directory = match StoreDirectory::from_path(&config.store_master_path) {
        Ok(directory) => directory,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load store directory");
            std::process::exit(1);
        }
    };
    tracing::info!(stores = directory.len(), "Store directory loaded");

    let fetcher = HttpImageFetcher::new(config.fetch_timeout())
        .expect("Failed to initialize image fetcher");

    let state = AppState::new(directory, Arc::new(fetcher), config.processing());

    let app = routes::router(state, config.max_body_bytes)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    tracing::info!("Starting visit-image-jobs on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
