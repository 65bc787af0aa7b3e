// Shared helpers for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Once};

use gateway_dashboard::{
    create_router,
    error::{GatewayError, GatewayResult},
    models::{ClusterReport, ClusterStatus, LiveCluster, SchedulerInfo, WorkerInfo},
    services::{select_source, ClusterConnection, Gateway, GatewaySession},
    AppState, Config,
};

static INIT: Once = Once::new();

/// Initializes test logging once per test binary
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

pub fn create_test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        gateway_address: "http://gateway.test".to_string(),
        gateway_public_address: None,
        request_timeout_secs: 5,
        use_mock_data: false,
        mock_cluster_count: 3,
        index_html_path: None,
        log_level: "debug".to_string(),
    }
}

pub fn create_test_app_state(config: Config, gateway: &FakeGateway) -> AppState {
    let gateway: Arc<dyn Gateway> = Arc::new(gateway.clone());
    AppState {
        source: select_source(&config, Arc::clone(&gateway)),
        config,
        gateway,
    }
}

pub fn create_test_server(config: Config, gateway: &FakeGateway) -> axum_test::TestServer {
    let app = create_router(create_test_app_state(config, gateway));
    axum_test::TestServer::new(app).unwrap()
}

struct FakeCluster {
    report: ClusterReport,
    workers: BTreeMap<String, WorkerInfo>,
}

#[derive(Default)]
struct FakeState {
    clusters: Vec<FakeCluster>,
    next_id: u64,
    open_sessions: usize,
    open_connections: usize,
    unreachable: bool,
    broken_telemetry: bool,
}

/// In-memory gateway that tracks how many connections are still open.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a running cluster with no workers and returns its name.
    pub fn new_cluster(&self) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let name = format!("{:032x}", state.next_id);
        state.clusters.push(FakeCluster {
            report: ClusterReport {
                dashboard_link: format!("http://gateway.test/clusters/{}/status", name),
                name: name.clone(),
                status: ClusterStatus::Running,
                start_time: 1_700_000_000.0,
            },
            workers: BTreeMap::new(),
        });
        name
    }

    pub fn add_report(&self, report: ClusterReport) {
        self.state.lock().unwrap().clusters.push(FakeCluster {
            report,
            workers: BTreeMap::new(),
        });
    }

    pub fn add_worker(&self, name: &str, nthreads: u64, memory_limit: u64) {
        let mut state = self.state.lock().unwrap();
        let cluster = state
            .clusters
            .iter_mut()
            .find(|c| c.report.name == name)
            .unwrap();
        let address = format!("tcp://10.0.0.{}:40000", cluster.workers.len() + 1);
        cluster.workers.insert(
            address,
            WorkerInfo {
                nthreads,
                memory_limit,
            },
        );
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().unreachable = unreachable;
    }

    pub fn set_broken_telemetry(&self, broken: bool) {
        self.state.lock().unwrap().broken_telemetry = broken;
    }

    pub fn cluster_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.clusters.iter().map(|c| c.report.name.clone()).collect()
    }

    pub fn open_sessions(&self) -> usize {
        self.state.lock().unwrap().open_sessions
    }

    pub fn open_connections(&self) -> usize {
        self.state.lock().unwrap().open_connections
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn open(&self) -> GatewayResult<Box<dyn GatewaySession>> {
        let mut state = self.state.lock().unwrap();
        if state.unreachable {
            return Err(GatewayError::Unavailable {
                message: "connection refused".to_string(),
            });
        }
        state.open_sessions += 1;
        Ok(Box::new(FakeSession {
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeSession {
    state: Arc<Mutex<FakeState>>,
}

#[async_trait]
impl GatewaySession for FakeSession {
    async fn list_clusters(&self) -> GatewayResult<Vec<ClusterReport>> {
        let state = self.state.lock().unwrap();
        Ok(state.clusters.iter().map(|c| c.report.clone()).collect())
    }

    async fn get_cluster(&self, name: &str) -> GatewayResult<Option<ClusterReport>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .clusters
            .iter()
            .find(|c| c.report.name == name)
            .map(|c| c.report.clone()))
    }

    async fn connect(&self, name: &str) -> GatewayResult<Box<dyn ClusterConnection>> {
        let mut state = self.state.lock().unwrap();
        if state.broken_telemetry || !state.clusters.iter().any(|c| c.report.name == name) {
            return Err(GatewayError::ClusterNotFound {
                name: name.to_string(),
            });
        }
        state.open_connections += 1;
        Ok(Box::new(FakeConnection {
            state: Arc::clone(&self.state),
            name: name.to_string(),
        }))
    }

    async fn stop_cluster(&self, name: &str) -> GatewayResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.clusters.len();
        state.clusters.retain(|c| c.report.name != name);
        if state.clusters.len() == before {
            return Err(GatewayError::ClusterNotFound {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.state.lock().unwrap().open_sessions -= 1;
    }
}

struct FakeConnection {
    state: Arc<Mutex<FakeState>>,
    name: String,
}

#[async_trait]
impl ClusterConnection for FakeConnection {
    async fn live_cluster(&self) -> GatewayResult<LiveCluster> {
        let state = self.state.lock().unwrap();
        let cluster = state
            .clusters
            .iter()
            .find(|c| c.report.name == self.name)
            .ok_or_else(|| GatewayError::ClusterNotFound {
                name: self.name.clone(),
            })?;
        Ok(LiveCluster {
            name: cluster.report.name.clone(),
            dashboard_link: cluster.report.dashboard_link.clone(),
            scheduler_info: SchedulerInfo {
                started: cluster.report.start_time,
                workers: cluster.workers.clone(),
            },
        })
    }
}

impl Drop for FakeConnection {
    fn drop(&mut self) {
        self.state.lock().unwrap().open_connections -= 1;
    }
}
