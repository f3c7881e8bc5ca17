//! Web server module.

mod assets;
mod handlers;
mod views;

use crate::config::ServerConfig;
use crate::dashboard::DashboardState;
use crate::moderation::{DocumentProcessor, ModerationState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub moderation: Arc<RwLock<ModerationState>>,
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub processor: Arc<dyn DocumentProcessor>,
}

/// Web server for Guardrail.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(
        config: ServerConfig,
        moderation: ModerationState,
        dashboard: DashboardState,
        processor: Arc<dyn DocumentProcessor>,
    ) -> Self {
        Self {
            state: AppState {
                config,
                moderation: Arc::new(RwLock::new(moderation)),
                dashboard: Arc::new(RwLock::new(dashboard)),
                processor,
            },
        }
    }

    /// Build the router with all routes.
    fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Pages
            .route("/", get(handlers::handle_moderation_page))
            .route("/moderation", get(handlers::handle_moderation_page))
            .route("/dashboard", get(handlers::handle_dashboard_page))
            // API: configurator
            .route("/api/moderation", get(handlers::handle_get_moderation))
            .route("/api/moderation/upload", post(handlers::handle_upload))
            .route("/api/moderation/configs", post(handlers::handle_create_config))
            .route(
                "/api/moderation/configs/{id}",
                put(handlers::handle_update_config).delete(handlers::handle_delete_config),
            )
            .route("/api/moderation/latency/{channel}", put(handlers::handle_set_latency))
            .route("/api/moderation/latency/{channel}/press", post(handlers::handle_slider_press))
            .route("/api/moderation/latency/{channel}/move", post(handlers::handle_slider_move))
            .route(
                "/api/moderation/latency/{channel}/release",
                post(handlers::handle_slider_release),
            )
            .route("/api/moderation/reset", post(handlers::handle_reset_moderation))
            .route("/api/moderation/apply", post(handlers::handle_apply_moderation))
            // API: dashboard
            .route("/api/dashboard/queries", get(handlers::handle_get_queries))
            .route(
                "/api/dashboard/filters",
                get(handlers::handle_get_filters).put(handlers::handle_set_filters),
            )
            .route("/api/dashboard/filters/time_range", put(handlers::handle_set_time_range))
            .route("/api/dashboard/filters/sort", put(handlers::handle_set_sort))
            .route("/api/dashboard/filters/toggle", post(handlers::handle_toggle_filter))
            .route("/api/dashboard/filters/reset", post(handlers::handle_reset_filters))
            .route(
                "/api/dashboard/saved",
                get(handlers::handle_get_saved).post(handlers::handle_save_filter),
            )
            .route("/api/dashboard/saved/{id}/load", post(handlers::handle_load_filter))
            // Static assets
            .route("/static/{*path}", get(assets::handle_static))
            .route("/favicon.ico", get(assets::handle_favicon))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(DefaultBodyLimit::max(64 * 1024)) // 64KB
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
