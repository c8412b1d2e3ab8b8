pub mod jobs;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::aggregator::JobSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn JobSource>,
    pub query: String,
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/jobs", get(jobs::list))
        .with_state(state)
}
