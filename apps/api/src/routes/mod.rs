pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job collection
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).put(jobs::handle_replace_jobs),
        )
        .route("/api/v1/jobs/refresh", post(jobs::handle_refresh_jobs))
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        // Matching
        .route("/api/v1/keywords", post(matching::handle_keywords))
        .route("/api/v1/match", post(matching::handle_match))
        .route(
            "/api/v1/match/upload",
            post(matching::handle_match_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
