mod config;
mod errors;
mod extract;
mod jobs;
mod matching;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::jobs::source::{refresh, source_from_config, spawn_refresh_loop};
use crate::jobs::store::JobStore;
use crate::matching::lexicon::Lexicon;
use crate::matching::scorer::Matcher;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize lexicon and matcher
    let lexicon = Lexicon::from_config(&config.lexicon)?;
    info!(
        "Lexicon loaded: {} stop words, {} domain terms",
        lexicon.stop_word_count(),
        lexicon.domain_term_count()
    );
    let matcher = Arc::new(Matcher::new(lexicon, config.scoring.clone()));
    info!(
        "Scoring weights: keyword={} semantic={} (domain boost {}x, {} keywords per job)",
        config.scoring.keyword_weight,
        config.scoring.semantic_weight,
        config.scoring.domain_boost,
        config.scoring.keyword_limit
    );

    // Initialize job store from the configured feed, if any
    let jobs = JobStore::default();
    let job_source = source_from_config(&config.job_feed)?;
    match &job_source {
        Some(source) => {
            if let Err(e) = refresh(&jobs, source.as_ref(), &matcher).await {
                warn!("Initial job load failed, starting with an empty store: {e:#}");
            }
            if let Some(secs) = config.job_feed.refresh_secs {
                spawn_refresh_loop(
                    jobs.clone(),
                    Arc::clone(source),
                    Arc::clone(&matcher),
                    Duration::from_secs(secs),
                );
                info!("Job refresh scheduled every {secs}s");
            }
        }
        None => info!("No job feed configured; waiting for PUT /api/v1/jobs"),
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        matcher,
        jobs,
        job_source,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
