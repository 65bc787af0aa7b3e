use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::DashboardError;
use crate::models::ClusterSummary;
use crate::services::{GatewayClusterSource, MockClusterSource};
use crate::services::gateway::Gateway;

/// Anything able to answer a cluster listing.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>, DashboardError>;

    /// Short name reported by the health endpoint.
    fn kind(&self) -> &'static str;
}

/// Picks the listing source once at startup; the choice is fixed for the
/// lifetime of the process.
pub fn select_source(config: &Config, gateway: Arc<dyn Gateway>) -> Arc<dyn ClusterSource> {
    if config.use_mock_data {
        info!(
            "Using mock cluster data ({} clusters)",
            config.mock_cluster_count
        );
        Arc::new(MockClusterSource::new(config.mock_cluster_count))
    } else {
        info!("Using gateway at {}", config.gateway_address);
        Arc::new(GatewayClusterSource::new(gateway))
    }
}
