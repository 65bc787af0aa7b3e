//! HTTP client for the Dask Gateway REST API.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{ClusterReport, ClusterStatus, LiveCluster, SchedulerInfo};
use crate::services::gateway::{ClusterConnection, Gateway, GatewaySession};

/// Without a status filter the gateway only lists active clusters.
const ALL_STATUSES: &str = "pending,running,stopping,stopped,failed";

/// Cluster record as served by `/api/v1/clusters/`.
#[derive(Debug, Deserialize)]
struct GatewayClusterModel {
    name: String,
    #[serde(default)]
    dashboard_route: Option<String>,
    status: ClusterStatus,
    /// Epoch milliseconds, null until the cluster has started
    #[serde(default)]
    start_time: Option<i64>,
}

impl GatewayClusterModel {
    fn into_report(self, config: &Config) -> ClusterReport {
        let dashboard_link = match self.dashboard_route.as_deref() {
            Some(route) if !route.is_empty() => format!("{}{}", config.dashboard_base(), route),
            _ => String::new(),
        };
        ClusterReport {
            name: self.name,
            dashboard_link,
            status: self.status,
            start_time: self.start_time.unwrap_or(0) as f64 / 1000.0,
        }
    }
}

#[derive(Clone)]
pub struct HttpGateway {
    config: Arc<Config>,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            config: Arc::new(config.clone()),
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn open(&self) -> GatewayResult<Box<dyn GatewaySession>> {
        let client = Client::builder()
            .timeout(self.config.request_timeout())
            .connect_timeout(self.config.request_timeout())
            .build()
            .map_err(|e| GatewayError::Unavailable {
                message: e.to_string(),
            })?;

        let resp = client.get(api_url(&self.config, &["health"])?).send().await?;
        if !resp.status().is_success() {
            return Err(GatewayError::Unavailable {
                message: format!("health check returned HTTP {}", resp.status()),
            });
        }

        debug!("Opened gateway session to {}", self.config.gateway_address);
        Ok(Box::new(HttpGatewaySession {
            client,
            config: Arc::clone(&self.config),
        }))
    }
}

pub struct HttpGatewaySession {
    client: Client,
    config: Arc<Config>,
}

impl HttpGatewaySession {
    fn cluster_url(&self, name: &str) -> GatewayResult<Url> {
        api_url(&self.config, &["v1", "clusters", name])
    }

    async fn fetch_cluster(&self, name: &str) -> GatewayResult<Option<ClusterReport>> {
        if !is_segment_name(name) {
            return Ok(None);
        }
        let resp = self.client.get(self.cluster_url(name)?).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let model: GatewayClusterModel = check_status(resp).await?.json().await?;
        Ok(Some(model.into_report(&self.config)))
    }
}

#[async_trait]
impl GatewaySession for HttpGatewaySession {
    async fn list_clusters(&self) -> GatewayResult<Vec<ClusterReport>> {
        let mut url = api_url(&self.config, &["v1", "clusters", ""])?;
        url.query_pairs_mut().append_pair("status", ALL_STATUSES);
        let resp = self.client.get(url).send().await?;
        let body: serde_json::Map<String, serde_json::Value> =
            check_status(resp).await?.json().await?;

        body.into_iter()
            .map(|(key, value)| {
                serde_json::from_value::<GatewayClusterModel>(value)
                    .map(|model| model.into_report(&self.config))
                    .map_err(|e| GatewayError::InvalidResponse {
                        message: format!("cluster {}: {}", key, e),
                    })
            })
            .collect()
    }

    async fn get_cluster(&self, name: &str) -> GatewayResult<Option<ClusterReport>> {
        self.fetch_cluster(name).await
    }

    async fn connect(&self, name: &str) -> GatewayResult<Box<dyn ClusterConnection>> {
        let report = self
            .fetch_cluster(name)
            .await?
            .ok_or_else(|| GatewayError::ClusterNotFound {
                name: name.to_string(),
            })?;

        debug!("Connected to cluster {}", name);
        Ok(Box::new(HttpClusterConnection {
            client: self.client.clone(),
            identity_url: gateway_url(&self.config, &["clusters", name, "json", "identity.json"])?,
            name: report.name,
            dashboard_link: report.dashboard_link,
        }))
    }

    async fn stop_cluster(&self, name: &str) -> GatewayResult<()> {
        if !is_segment_name(name) {
            return Err(GatewayError::ClusterNotFound {
                name: name.to_string(),
            });
        }
        let resp = self.client.delete(self.cluster_url(name)?).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::ClusterNotFound {
                name: name.to_string(),
            });
        }
        check_status(resp).await?;
        Ok(())
    }
}

impl Drop for HttpGatewaySession {
    fn drop(&mut self) {
        debug!("Released gateway session to {}", self.config.gateway_address);
    }
}

pub struct HttpClusterConnection {
    client: Client,
    identity_url: Url,
    name: String,
    dashboard_link: String,
}

#[async_trait]
impl ClusterConnection for HttpClusterConnection {
    async fn live_cluster(&self) -> GatewayResult<LiveCluster> {
        let resp = self.client.get(self.identity_url.clone()).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::ClusterNotFound {
                name: self.name.clone(),
            });
        }
        let scheduler_info: SchedulerInfo = check_status(resp).await?.json().await?;

        Ok(LiveCluster {
            name: self.name.clone(),
            dashboard_link: self.dashboard_link.clone(),
            scheduler_info,
        })
    }
}

impl Drop for HttpClusterConnection {
    fn drop(&mut self) {
        debug!("Released connection to cluster {}", self.name);
    }
}

fn gateway_url(config: &Config, segments: &[&str]) -> GatewayResult<Url> {
    config
        .gateway_url(segments)
        .map_err(|e| GatewayError::Unavailable {
            message: format!("{:#}", e),
        })
}

fn api_url(config: &Config, segments: &[&str]) -> GatewayResult<Url> {
    let mut path = vec!["api"];
    path.extend_from_slice(segments);
    gateway_url(config, &path)
}

/// Dot segments would be dropped from the URL path and address another resource.
fn is_segment_name(name: &str) -> bool {
    !matches!(name, "" | "." | "..")
}

async fn check_status(resp: Response) -> GatewayResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Unavailable {
        message: format!("HTTP {}: {}", status, body),
    })
}
