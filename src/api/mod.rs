pub mod analytics;
pub mod error;
pub mod health;

use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    // Read-only surface, open to any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/api/analytics/monthly-energy", get(analytics::monthly_energy))
        .route(
            "/api/analytics/department-efficiency",
            get(analytics::department_efficiency),
        )
        .route("/api/analytics/today", get(analytics::today_stats))
        .route("/api/analytics/live", get(analytics::live_deliveries))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
