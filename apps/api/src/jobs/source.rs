//! Job feeds — where job postings come from, and the periodic refresh that swaps
//! them into the store.
//!
//! A failed fetch never clears the store: the previous snapshot stays in service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::config::JobFeedConfig;
use crate::jobs::store::JobStore;
use crate::jobs::{ingest_blocking, RawJob};
use crate::matching::scorer::Matcher;

const FEED_TIMEOUT_SECS: u64 = 30;

/// A supplier of raw job records. Implement this to add a feed without touching
/// the store, the refresh loop, or the handlers.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawJob>>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Reads a JSON array of job records from disk.
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    async fn fetch(&self) -> Result<Vec<RawJob>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read job feed '{}'", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Job feed '{}' is not a JSON array of jobs", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Fetches a JSON array of job records over HTTP.
pub struct HttpJobSource {
    client: Client,
    url: String,
}

impl HttpJobSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FEED_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch(&self) -> Result<Vec<RawJob>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch job feed {}", self.url))?;

        if !response.status().is_success() {
            anyhow::bail!("Job feed {} returned HTTP {}", self.url, response.status());
        }

        response
            .json::<Vec<RawJob>>()
            .await
            .with_context(|| format!("Job feed {} is not a JSON array of jobs", self.url))
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// Picks the configured feed, preferring the URL over the file.
pub fn source_from_config(config: &JobFeedConfig) -> Result<Option<Arc<dyn JobSource>>> {
    if let Some(url) = &config.url {
        return Ok(Some(Arc::new(HttpJobSource::new(url.clone())?)));
    }
    Ok(config
        .file
        .as_ref()
        .map(|path| Arc::new(FileJobSource::new(path.clone())) as Arc<dyn JobSource>))
}

/// Fetches, ingests, and atomically swaps the feed into the store.
pub async fn refresh(
    store: &JobStore,
    source: &dyn JobSource,
    matcher: &Arc<Matcher>,
) -> Result<usize> {
    let raw_jobs = source.fetch().await?;
    let fetched = raw_jobs.len();
    let jobs = ingest_blocking(raw_jobs, Arc::clone(matcher)).await?;
    let count = store.replace(jobs);

    info!(
        "Refreshed job store from {}: {count} jobs ({fetched} fetched)",
        source.describe()
    );
    Ok(count)
}

/// Re-runs `refresh` every `every`, starting one period from now.
pub fn spawn_refresh_loop(
    store: JobStore,
    source: Arc<dyn JobSource>,
    matcher: Arc<Matcher>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // first tick completes immediately

        loop {
            ticker.tick().await;
            if let Err(e) = refresh(&store, source.as_ref(), &matcher).await {
                warn!("Job refresh failed, keeping previous snapshot: {e:#}");
            }
        }
    })
}
