use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error as ThisError;

use crate::models::ErrorResponse;

/// Failures talking to the gateway or to a cluster behind it.
#[derive(ThisError, Debug)]
pub enum GatewayError {
    #[error("Gateway unavailable: {message}")]
    Unavailable { message: String },

    #[error("Gateway request timed out")]
    Timeout,

    #[error("No such cluster: {name}")]
    ClusterNotFound { name: String },

    #[error("Invalid gateway response: {message}")]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            GatewayError::Unavailable {
                message: err.to_string(),
            }
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(ThisError, Debug)]
pub enum DashboardError {
    /// Termination requested for a name the gateway does not know
    #[error("No such cluster: {name}")]
    NotFound { name: String },

    #[error(transparent)]
    Upstream(#[from] GatewayError),

    /// A running cluster's live connection failed mid-listing
    #[error("Failed to read telemetry for cluster {name}: {source}")]
    PartialTelemetry {
        name: String,
        #[source]
        source: GatewayError,
    },

    #[error("Failed to read index page: {0}")]
    Page(#[from] std::io::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::Upstream(GatewayError::Timeout)
            | DashboardError::PartialTelemetry {
                source: GatewayError::Timeout,
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            DashboardError::Upstream(_) | DashboardError::PartialTelemetry { .. } => {
                StatusCode::BAD_GATEWAY
            }
            DashboardError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected: {}", self);
        }
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
