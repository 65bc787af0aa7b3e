use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_address: String,
    pub gateway_address: String,
    pub gateway_public_address: Option<String>,
    pub request_timeout_secs: u64,
    pub use_mock_data: bool,
    pub mock_cluster_count: usize,
    /// Page served at `/`; the built-in page is used when unset
    pub index_html_path: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // .env is only read when explicitly requested
        if env::var("USE_DOTENV").ok().as_deref() == Some("true") {
            dotenv::dotenv().ok();
        }

        let config = Config {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            gateway_address: env::var("DASK_GATEWAY_ADDRESS")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            gateway_public_address: env::var("DASK_GATEWAY_PUBLIC_ADDRESS").ok(),
            request_timeout_secs: parse_var("GATEWAY_REQUEST_TIMEOUT_SECS", 10)?,
            use_mock_data: env::var("DASHBOARD_MOCK_DATA")
                .map(|value| parse_flag(&value))
                .unwrap_or(false),
            mock_cluster_count: parse_var("MOCK_CLUSTER_COUNT", 3)?,
            index_html_path: env::var("INDEX_HTML_PATH").ok(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        };

        Url::parse(&config.gateway_address).with_context(|| {
            format!("Invalid DASK_GATEWAY_ADDRESS: {:?}", config.gateway_address)
        })?;

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL that dashboard links are built on.
    pub fn dashboard_base(&self) -> &str {
        self.gateway_public_address
            .as_deref()
            .unwrap_or(&self.gateway_address)
            .trim_end_matches('/')
    }

    /// Gateway URL with each segment appended percent-encoded, so a
    /// cluster name always stays a single path segment.
    pub fn gateway_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.gateway_address)
            .with_context(|| format!("Invalid gateway address {:?}", self.gateway_address))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Gateway address {:?} cannot be a base", self.gateway_address))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Boolean-like environment values: `1`, `true`, `yes`, `on` (any case).
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}
