use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub scoring: ScoringConfig,
    pub lexicon: LexiconConfig,
    pub job_feed: JobFeedConfig,
}

/// Tunable constants of the hybrid scorer and keyword extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub semantic_weight: f64,
    /// Per-occurrence weight of domain-vocabulary tokens during keyword extraction.
    pub domain_boost: u32,
    /// Keywords cached per job at ingestion.
    pub keyword_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.4,
            semantic_weight: 0.6,
            domain_boost: 4,
            keyword_limit: 25,
        }
    }
}

impl ScoringConfig {
    /// Weights must be non-negative and sum to 1 so the final score stays in [0, 100].
    pub fn validate(&self) -> Result<()> {
        let weights = [self.keyword_weight, self.semantic_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            bail!("KEYWORD_WEIGHT and SEMANTIC_WEIGHT must be finite and non-negative");
        }
        let sum = self.keyword_weight + self.semantic_weight;
        if (sum - 1.0).abs() > 1e-6 {
            bail!("KEYWORD_WEIGHT + SEMANTIC_WEIGHT must equal 1.0 (got {sum})");
        }
        if self.domain_boost == 0 {
            bail!("DOMAIN_BOOST must be at least 1");
        }
        if self.keyword_limit == 0 {
            bail!("KEYWORD_LIMIT must be at least 1");
        }
        Ok(())
    }
}

/// Optional lexicon overrides; `None` keeps the built-in list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexiconConfig {
    pub stop_words_file: Option<PathBuf>,
    pub domain_vocabulary_file: Option<PathBuf>,
}

/// Where job postings come from. `url` wins over `file` when both are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFeedConfig {
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub refresh_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            keyword_weight: parse_env("KEYWORD_WEIGHT", defaults.keyword_weight)?,
            semantic_weight: parse_env("SEMANTIC_WEIGHT", defaults.semantic_weight)?,
            domain_boost: parse_env("DOMAIN_BOOST", defaults.domain_boost)?,
            keyword_limit: parse_env("KEYWORD_LIMIT", defaults.keyword_limit)?,
        };
        scoring.validate()?;

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            scoring,
            lexicon: LexiconConfig {
                stop_words_file: optional_env("STOP_WORDS_FILE").map(PathBuf::from),
                domain_vocabulary_file: optional_env("DOMAIN_VOCABULARY_FILE").map(PathBuf::from),
            },
            job_feed: JobFeedConfig {
                file: optional_env("JOBS_FILE").map(PathBuf::from),
                url: optional_env("JOBS_URL"),
                refresh_secs: optional_env("JOBS_REFRESH_SECS")
                    .map(|v| {
                        v.parse::<u64>()
                            .context("JOBS_REFRESH_SECS must be a whole number of seconds")
                    })
                    .transpose()?
                    .filter(|secs| *secs > 0),
            },
        })
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}
