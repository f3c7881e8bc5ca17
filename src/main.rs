//! Guardrail - Content Moderation Console
//!
//! Configures moderation guardrails from an uploaded policy document and
//! reviews flagged queries on a filterable dashboard.

mod config;
mod dashboard;
mod model;
mod moderation;
mod web;

use config::ServerConfig;
use dashboard::{DashboardState, MemoryFilterStore, StaticQuerySource};
use moderation::{ModerationState, SimulatedProcessor};
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("guardrail=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting Guardrail on port {}...", cfg.http_port);
    tracing::info!(
        "Simulated processing delay {:?}, upload limit {} bytes",
        cfg.upload_delay,
        cfg.max_upload_bytes
    );
    if cfg.apply_time_range {
        tracing::info!("Dashboard time range filtering enabled");
    }

    let processor = Arc::new(SimulatedProcessor::new(cfg.upload_delay));

    let queries = model::sample_queries();
    let presets = model::sample_saved_filters();
    tracing::info!(
        "Loaded {} sample queries and {} saved filters",
        queries.len(),
        presets.len()
    );
    let dashboard = DashboardState::new(
        Box::new(StaticQuerySource::new(queries)),
        Box::new(MemoryFilterStore::new(presets)),
        cfg.apply_time_range,
    );

    // Start web server
    let server = Server::new(cfg, ModerationState::default(), dashboard, processor);
    server.start().await?;

    Ok(())
}
