use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::info;

use crate::{
    error::DashboardError,
    models::{ClusterSummary, StatusResponse},
    services::stop_cluster,
    AppState,
};

/// GET /clusters
pub async fn list_clusters(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClusterSummary>>, DashboardError> {
    let clusters = state.source.list_clusters().await?;
    info!(
        "Listed {} clusters from {} source",
        clusters.len(),
        state.source.kind()
    );
    Ok(Json(clusters))
}

/// DELETE /clusters/:id
pub async fn delete_cluster(
    State(state): State<AppState>,
    Path(cluster_id): Path<String>,
) -> Result<Json<StatusResponse>, DashboardError> {
    info!("Stopping cluster '{}'", cluster_id);
    stop_cluster(state.gateway.as_ref(), &cluster_id).await?;
    Ok(Json(StatusResponse::ok()))
}
