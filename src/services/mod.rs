pub mod cluster_service;
pub mod gateway;
pub mod gateway_client;
pub mod mock_source;
pub mod source;
pub mod summary;

pub use cluster_service::{stop_cluster, GatewayClusterSource};
pub use gateway::{ClusterConnection, Gateway, GatewaySession};
pub use gateway_client::HttpGateway;
pub use mock_source::MockClusterSource;
pub use source::{select_source, ClusterSource};
pub use summary::{build_summary, format_bytes};
