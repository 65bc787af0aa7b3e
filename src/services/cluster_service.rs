use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{DashboardError, GatewayError, GatewayResult};
use crate::models::{ClusterDescription, ClusterSummary, LiveCluster};
use crate::services::gateway::{Gateway, GatewaySession};
use crate::services::source::ClusterSource;
use crate::services::summary::build_summary;

/// Lists clusters straight from the gateway, one pass per call.
///
/// Running clusters get a live connection for their scheduler telemetry;
/// all others are summarized from the gateway's own record. If any live
/// connection fails the whole listing fails, so a partial table is never
/// shown.
#[derive(Clone)]
pub struct GatewayClusterSource {
    gateway: Arc<dyn Gateway>,
}

impl GatewayClusterSource {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ClusterSource for GatewayClusterSource {
    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>, DashboardError> {
        let session = self.gateway.open().await?;
        let reports = session.list_clusters().await?;

        let mut clusters = Vec::with_capacity(reports.len());
        for report in reports {
            let description = if report.status.is_running() {
                let live = fetch_live_cluster(session.as_ref(), &report.name)
                    .await
                    .map_err(|source| DashboardError::PartialTelemetry {
                        name: report.name.clone(),
                        source,
                    })?;
                ClusterDescription::Live(live)
            } else {
                ClusterDescription::Historical(report)
            };
            clusters.push(build_summary(&description));
        }

        debug!("Listed {} clusters", clusters.len());
        Ok(clusters)
    }

    fn kind(&self) -> &'static str {
        "gateway"
    }
}

async fn fetch_live_cluster(session: &dyn GatewaySession, name: &str) -> GatewayResult<LiveCluster> {
    let connection = session.connect(name).await?;
    connection.live_cluster().await
}

/// Asks the gateway to terminate a cluster.
pub async fn stop_cluster(gateway: &dyn Gateway, name: &str) -> Result<(), DashboardError> {
    let session = gateway.open().await?;

    if session.get_cluster(name).await?.is_none() {
        return Err(DashboardError::NotFound {
            name: name.to_string(),
        });
    }

    match session.stop_cluster(name).await {
        Ok(()) => {
            info!("Stopped cluster {}", name);
            Ok(())
        }
        Err(GatewayError::ClusterNotFound { .. }) => Err(DashboardError::NotFound {
            name: name.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}
