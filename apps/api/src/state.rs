use std::sync::Arc;

use crate::config::Config;
use crate::jobs::source::JobSource;
use crate::jobs::store::JobStore;
use crate::matching::scorer::Matcher;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Scoring engine with the injected lexicon. Shared with the refresh loop.
    pub matcher: Arc<Matcher>,
    /// Current job collection; handlers take one snapshot per request.
    pub jobs: JobStore,
    /// Configured job feed, if any. `None` disables `/api/v1/jobs/refresh`.
    pub job_source: Option<Arc<dyn JobSource>>,
}
