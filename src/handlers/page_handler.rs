use axum::{extract::State, response::Html};

use crate::{error::DashboardError, AppState};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
///
/// A configured page is read from disk on every request; otherwise the
/// page built into the binary is served.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let page = match &state.config.index_html_path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => INDEX_HTML.to_string(),
    };
    Ok(Html(page))
}
