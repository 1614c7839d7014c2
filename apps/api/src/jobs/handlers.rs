//! Axum route handlers for the job collection.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::jobs::source::refresh;
use crate::jobs::{ingest_blocking, JobPosting, RawJob};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub count: usize,
    pub jobs: Vec<JobPosting>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobCountResponse {
    pub count: usize,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    let snapshot = state.jobs.snapshot();
    Json(JobListResponse {
        count: snapshot.len(),
        jobs: snapshot.to_vec(),
    })
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobPosting>, AppError> {
    state
        .jobs
        .snapshot()
        .iter()
        .find(|job| job.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// PUT /api/v1/jobs
///
/// Replaces the whole collection. Keywords are extracted here, once per job.
pub async fn handle_replace_jobs(
    State(state): State<AppState>,
    Json(raw_jobs): Json<Vec<RawJob>>,
) -> Result<Json<JobCountResponse>, AppError> {
    let jobs = ingest_blocking(raw_jobs, Arc::clone(&state.matcher)).await?;
    let count = state.jobs.replace(jobs);
    tracing::info!("Job store replaced via API: {count} jobs");
    Ok(Json(JobCountResponse { count }))
}

/// POST /api/v1/jobs/refresh
///
/// Pulls the configured feed now instead of waiting for the next interval.
pub async fn handle_refresh_jobs(
    State(state): State<AppState>,
) -> Result<Json<JobCountResponse>, AppError> {
    let source = state
        .job_source
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No job feed is configured".to_string()))?;

    let count = refresh(&state.jobs, source.as_ref(), &state.matcher)
        .await
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

    Ok(Json(JobCountResponse { count }))
}
