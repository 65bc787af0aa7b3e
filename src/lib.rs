// Gateway Dashboard library
// Public modules are exported for use in integration tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::Config;
pub use error::{DashboardError, GatewayError};
pub use services::{ClusterSource, Gateway};

use handlers::{cluster_handler, health_handler, page_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Listing source, chosen once at startup
    pub source: Arc<dyn ClusterSource>,
    pub gateway: Arc<dyn Gateway>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handler::index))
        .route("/health", get(health_handler::health_check))
        .route("/clusters", get(cluster_handler::list_clusters))
        .route("/clusters/:id", delete(cluster_handler::delete_cluster))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
