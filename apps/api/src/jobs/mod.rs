//! Job postings: the feed record, the stored record with cached keywords, and
//! ingestion between the two.

pub mod handlers;
pub mod source;
pub mod store;

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::scorer::Matcher;

/// A job record as supplied by a feed or pushed by the ingestion client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

/// A stored job with its keyword set extracted once at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub keywords: Vec<String>,
}

impl JobPosting {
    pub fn from_raw(raw: RawJob, matcher: &Matcher) -> Self {
        let keywords = matcher.job_keywords(raw.description.as_deref());
        let id = raw
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Self {
            id,
            title: raw.title,
            company: raw.company,
            url: raw.url,
            description: raw.description,
            posted_at: raw.posted_at,
            keywords,
        }
    }
}

/// Turns feed records into stored jobs.
///
/// Duplicate ids keep their first occurrence. The result is ordered
/// most-recent-first by `posted_at`; undated jobs follow in feed order. Ranking
/// ties fall back on this order.
pub fn ingest(raw_jobs: Vec<RawJob>, matcher: &Matcher) -> Vec<JobPosting> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut jobs: Vec<JobPosting> = raw_jobs
        .into_iter()
        .map(|raw| JobPosting::from_raw(raw, matcher))
        .filter(|job| seen.insert(job.id.clone()))
        .collect();

    // Stable: equal dates (and all undated jobs) keep feed order
    jobs.sort_by(|a, b| match (a.posted_at, b.posted_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    jobs
}

/// Runs `ingest` on the blocking pool; keyword extraction over a whole feed is
/// CPU work that must not stall the async workers.
pub async fn ingest_blocking(
    raw_jobs: Vec<RawJob>,
    matcher: Arc<Matcher>,
) -> anyhow::Result<Vec<JobPosting>> {
    tokio::task::spawn_blocking(move || ingest(raw_jobs, &matcher))
        .await
        .context("Ingestion task failed")
}
