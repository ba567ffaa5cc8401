//! DOSSIE API /v1: REST endpoints
pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use dossie_crew::Crew;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use metrics::DossieMetrics;

/// Shared, read-only state: the configured crew and the metrics registry
#[derive(Clone)]
pub struct AppState {
    pub crew: Crew,
    pub metrics: Arc<DossieMetrics>,
}

impl AppState {
    pub fn new(crew: Crew) -> Result<Self, prometheus::Error> {
        Ok(Self {
            crew,
            metrics: Arc::new(DossieMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/tasks", get(handlers::list_tasks))
        .route("/v1/audience/extract", post(handlers::extract))
        .route("/v1/decisions/infer", post(handlers::infer))
        .route("/v1/dossier", post(handlers::dossier))
        .route("/v1/dossier/markdown", post(handlers::dossier_markdown))
        .route("/v1/dossier/json", post(handlers::dossier_json))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Dossie API listening on {}", addr);
    axum::serve(listener, app).await
}
