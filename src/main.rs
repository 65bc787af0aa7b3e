use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gateway_dashboard::{
    create_router,
    services::{select_source, HttpGateway},
    AppState, Config, Gateway,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {:#}", e);
            return Err(e.into());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_target(false)
        .init();

    info!("🚀 Starting Gateway Dashboard...");

    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(&config));
    let source = select_source(&config, Arc::clone(&gateway));

    let app_state = AppState {
        config: config.clone(),
        source,
        gateway,
    };
    let app = create_router(app_state);

    let listener = match tokio::net::TcpListener::bind(&config.server_address).await {
        Ok(listener) => {
            info!("🌐 Server listening on {}", config.server_address);
            listener
        }
        Err(e) => {
            eprintln!("❌ Failed to bind to {}: {}", config.server_address, e);
            return Err(e.into());
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("✅ Server stopped gracefully");
    Ok(())
}
