// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::data_fetcher::PollStats;
use crate::application::display::ContainerId;
use crate::application::widget::start_widget;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_source::HttpSnapshotSource;
use crate::infrastructure::memory_display::InMemoryDisplay;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{container_content, health_check, widget_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let variant = config.backend.variant;

    // Backend client (infrastructure layer)
    let source = Arc::new(HttpSnapshotSource::new(
        &config.backend.base_url,
        variant,
        config.backend.timeout(),
    )?);
    tracing::info!("Polling {}", source.url());

    // Widget (application layer)
    let display = Arc::new(InMemoryDisplay::with_containers(ContainerId::for_variant(variant)));
    let stats = Arc::new(PollStats::default());
    let widget = start_widget(
        source,
        display.clone(),
        config.widget.renderer()?,
        config.widget.options(variant)?,
        stats.clone(),
    );

    let state = Arc::new(AppState {
        variant,
        display,
        stats,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/widget", get(widget_state))
        .route("/widget/:container", get(container_content))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server.listen_addr;
    tracing::info!("Starting winners dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await?;

    widget.shutdown();
    Ok(())
}
