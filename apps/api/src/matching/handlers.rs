//! Axum route handlers for the Matching API.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::matching::scorer::JobMatch;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    /// Keep only the best `limit` matches.
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    /// Size of the job snapshot that was ranked.
    pub job_count: usize,
    pub matches: Vec<JobMatch>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Ranks every stored job against the résumé text, best first.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let response = rank_snapshot(&state, request.resume_text, request.limit).await?;
    Ok(Json(response))
}

/// POST /api/v1/match/upload
///
/// Multipart variant: field `resume` carries a PDF or text file, optional field
/// `limit` caps the result list.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut limit: Option<usize> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

                let text = tokio::task::spawn_blocking(move || {
                    extract_text(file_name.as_deref(), content_type.as_deref(), bytes)
                })
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))??;

                info!("Extracted {} characters from uploaded résumé", text.len());
                resume_text = Some(text);
            }
            "limit" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read limit: {e}")))?;
                let parsed = raw.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation(format!("limit must be a non-negative integer, got '{raw}'"))
                })?;
                limit = Some(parsed);
            }
            _ => {}
        }
    }

    let resume_text = resume_text.ok_or_else(|| {
        AppError::Validation("multipart field 'resume' is required".to_string())
    })?;

    let response = rank_snapshot(&state, resume_text, limit).await?;
    Ok(Json(response))
}

/// POST /api/v1/keywords
///
/// Previews the keywords ingestion would cache for a job description.
pub async fn handle_keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    let limit = request
        .limit
        .unwrap_or(state.matcher.config().keyword_limit);
    let keywords = state.matcher.extract_keywords(&request.text, limit);
    Ok(Json(KeywordsResponse { keywords }))
}

/// Ranks against one snapshot of the store, off the async runtime.
async fn rank_snapshot(
    state: &AppState,
    resume_text: String,
    limit: Option<usize>,
) -> Result<MatchResponse, AppError> {
    let jobs = state.jobs.snapshot();
    let job_count = jobs.len();
    let matcher = Arc::clone(&state.matcher);

    let mut matches = tokio::task::spawn_blocking(move || matcher.rank(&resume_text, &jobs))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Ranking task failed: {e}")))?;

    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    Ok(MatchResponse { job_count, matches })
}
