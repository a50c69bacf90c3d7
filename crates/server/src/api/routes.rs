use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{handlers, reports, tenants};
use crate::metrics::metrics_handler;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Reports
        .route("/reports", post(reports::generate_report))
        .route("/reports/download", get(reports::download_report))
        // Tenants
        .route("/tenants", get(tenants::list_tenants))
        // Metrics
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    // CORS is wide open: the SPA frontend is served from a different origin.
    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
