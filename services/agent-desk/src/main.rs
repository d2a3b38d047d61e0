use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use agent_desk::{AppState, Orchestrator, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .init();

    info!("Starting Agent Desk...");

    let orchestrator = Orchestrator::from_settings(&settings)?;
    info!("RPC: {}", settings.sol_rpc);
    info!("Cache TTL: {}ms", settings.refresh_ttl_ms);
    info!("Agent mode: {}", orchestrator.llm().describe());

    let static_dir = if Path::new(&settings.static_dir).is_dir() {
        Some(settings.static_dir.as_str())
    } else {
        warn!("Static dir {} not found, serving API only", settings.static_dir);
        None
    };

    let state = Arc::new(AppState::new(orchestrator));
    let app = agent_desk::app(state, static_dir);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", settings.bind_host, settings.port)).await?;
    info!("⚡ Dashboard running: http://127.0.0.1:{}", settings.port);

    axum::serve(listener, app).await?;

    Ok(())
}
