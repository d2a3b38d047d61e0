pub mod brain;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers {
    pub mod dex;
    pub mod health;
    pub mod prices;
    pub mod simulate;
    pub mod sol;
}
pub mod llm;
pub mod observability;
pub mod orchestrator;
pub mod swap;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::Settings;
pub use error::AgentError;
pub use observability::MetricsCollector;
pub use orchestrator::{AnalysisMode, Orchestrator, QueryOutcome, Sources};

/// Application state shared across handlers
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Build the API router; `static_dir` serves the dashboard for unmatched paths
pub fn app(state: Arc<AppState>, static_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/sol/balance", get(handlers::sol::get_balance))
        .route("/sol/tx", get(handlers::sol::get_signatures))
        .route("/prices", get(handlers::prices::get_prices))
        .route("/simulate", post(handlers::simulate::simulate_swap))
        .route("/dex", get(handlers::dex::get_dex))
        .route("/agent/analyze", get(handlers::dex::analyze))
        .with_state(state);

    let router = Router::new().nest("/api", api_routes);
    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
