use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle state of a cluster as reported by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClusterStatus {
    Pending,
    Running,
    Stopping,
    Stopped,
    Failed,
}

impl ClusterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStatus::Pending => "PENDING",
            ClusterStatus::Running => "RUNNING",
            ClusterStatus::Stopping => "STOPPING",
            ClusterStatus::Stopped => "STOPPED",
            ClusterStatus::Failed => "FAILED",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ClusterStatus::Running)
    }
}

impl fmt::Display for ClusterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of the `/clusters` listing.
///
/// Built fresh on every listing and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub name: String,
    pub status: ClusterStatus,
    pub dashboard_link: String,
    pub workers: usize,
    pub cores: u64,
    pub memory: String,
    /// Unix epoch seconds
    pub started: f64,
}

/// Cached gateway record of a cluster, without any scheduler telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub name: String,
    pub dashboard_link: String,
    pub status: ClusterStatus,
    /// Unix epoch seconds
    pub start_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerInfo {
    pub nthreads: u64,
    pub memory_limit: u64,
}

/// Scheduler snapshot of a running cluster, keyed by worker address.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchedulerInfo {
    pub started: f64,
    #[serde(default)]
    pub workers: BTreeMap<String, WorkerInfo>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveCluster {
    pub name: String,
    pub dashboard_link: String,
    pub scheduler_info: SchedulerInfo,
}

/// The two shapes a cluster can arrive in from the gateway.
#[derive(Debug, Clone, PartialEq)]
pub enum ClusterDescription {
    Live(LiveCluster),
    Historical(ClusterReport),
}
