use async_trait::async_trait;
use chrono::Utc;

use crate::error::DashboardError;
use crate::models::{ClusterDescription, ClusterSummary, LiveCluster, SchedulerInfo, WorkerInfo};
use crate::services::source::ClusterSource;
use crate::services::summary::build_summary;

const THREADS_PER_WORKER: u64 = 2;
const MEMORY_PER_WORKER: u64 = 4 * 1024 * 1024 * 1024;
const STARTED_AGO_SECS: i64 = 60 * 60;

/// Fake running clusters for UI development without a gateway.
///
/// Cluster `i` is named `mock-cluster-{i}` and has `i` workers.
#[derive(Debug, Clone)]
pub struct MockClusterSource {
    count: usize,
    started: f64,
}

impl MockClusterSource {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            started: (Utc::now().timestamp() - STARTED_AGO_SECS) as f64,
        }
    }

    fn cluster(&self, index: usize) -> ClusterDescription {
        let name = format!("mock-cluster-{}", index);
        let workers = (0..index)
            .map(|w| {
                (
                    format!("tcp://10.0.{}.{}:40000", index, w),
                    WorkerInfo {
                        nthreads: THREADS_PER_WORKER,
                        memory_limit: MEMORY_PER_WORKER,
                    },
                )
            })
            .collect();

        ClusterDescription::Live(LiveCluster {
            dashboard_link: format!("http://127.0.0.1:8787/clusters/{}/status", name),
            name,
            scheduler_info: SchedulerInfo {
                started: self.started,
                workers,
            },
        })
    }
}

#[async_trait]
impl ClusterSource for MockClusterSource {
    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>, DashboardError> {
        Ok((0..self.count)
            .map(|i| build_summary(&self.cluster(i)))
            .collect())
    }

    fn kind(&self) -> &'static str {
        "mock"
    }
}
