//! Port to the cluster gateway.
//!
//! Every connection handed out here is scoped: it is released when the value
//! is dropped, on success and on every error path alike.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::{ClusterReport, LiveCluster};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Opens a connection to the gateway service.
    async fn open(&self) -> GatewayResult<Box<dyn GatewaySession>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewaySession: Send + Sync {
    /// All clusters known to the gateway, in gateway order.
    async fn list_clusters(&self) -> GatewayResult<Vec<ClusterReport>>;

    async fn get_cluster(&self, name: &str) -> GatewayResult<Option<ClusterReport>>;

    /// Opens a live connection to a single cluster.
    async fn connect(&self, name: &str) -> GatewayResult<Box<dyn ClusterConnection>>;

    async fn stop_cluster(&self, name: &str) -> GatewayResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterConnection: Send + Sync {
    /// Current scheduler telemetry of the connected cluster.
    async fn live_cluster(&self) -> GatewayResult<LiveCluster>;
}
