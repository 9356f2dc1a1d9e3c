use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all Cigilante endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/reports", get(handler::list_reports_handler))
        .route("/reports/unclaimed", get(handler::list_unclaimed_handler))
        .route("/report", get(handler::get_report_handler))
        .route("/submit", post(handler::submit_handler))
        .route("/claim", post(handler::claim_handler))
        .route("/stats", get(handler::stats_handler))
        .route("/events", get(handler::events_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
