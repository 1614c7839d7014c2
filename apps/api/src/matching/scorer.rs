//! Hybrid Scorer — merges keyword overlap and TF-IDF semantic similarity into one
//! 0–100 match score per job, and ranks a job collection for one résumé.
//!
//! Default weights are keyword 0.4 and semantic 0.6; both come from `ScoringConfig`.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::jobs::JobPosting;
use crate::matching::keywords::extract_keywords;
use crate::matching::lexicon::Lexicon;
use crate::matching::similarity::cosine_similarity;
use crate::matching::tfidf::vectorize_pair;
use crate::matching::tokenizer::{tokenize, tokenize_opt};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Score triple, each component an integer percentage in [0, 100].
///
/// `final_score = round(keyword_weight * keyword_score + semantic_weight * semantic_score)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub final_score: u32,
    pub keyword_score: u32,
    pub semantic_score: u32,
}

/// One ranked job, as returned to the ranking consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub url: Option<String>,
    #[serde(flatten)]
    pub score: MatchScore,
    /// Cached job keywords found in the résumé.
    pub matched_keywords: Vec<String>,
    /// Cached job keywords the résumé lacks.
    pub missing_keywords: Vec<String>,
}

/// A résumé tokenized once per ranking call and reused for every job.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    tokens: Vec<String>,
    token_set: HashSet<String>,
}

impl ResumeProfile {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Matcher
// ────────────────────────────────────────────────────────────────────────────

/// The scoring engine: an injected lexicon plus scoring constants.
///
/// Stateless between calls and `Sync`, so one instance serves every request and
/// fans per-job work out across threads.
#[derive(Debug, Clone)]
pub struct Matcher {
    lexicon: Arc<Lexicon>,
    config: ScoringConfig,
}

impl Matcher {
    pub fn new(lexicon: Lexicon, config: ScoringConfig) -> Self {
        Self {
            lexicon: Arc::new(lexicon),
            config,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, &self.lexicon)
    }

    /// Top `limit` keywords of `text` using the configured domain boost.
    pub fn extract_keywords(&self, text: &str, limit: usize) -> Vec<String> {
        extract_keywords(text, limit, &self.lexicon, self.config.domain_boost)
    }

    /// Keywords cached on a job at ingestion, capped at `keyword_limit`.
    pub fn job_keywords(&self, description: Option<&str>) -> Vec<String> {
        description
            .map(|d| self.extract_keywords(d, self.config.keyword_limit))
            .unwrap_or_default()
    }

    pub fn profile(&self, resume_text: &str) -> ResumeProfile {
        let tokens = self.tokenize(resume_text);
        let token_set = tokens.iter().cloned().collect();
        ResumeProfile { tokens, token_set }
    }

    /// TF-IDF cosine similarity of the two texts as a rounded percentage.
    #[allow(dead_code)]
    pub fn semantic_similarity(&self, resume_text: &str, job_description: &str) -> u32 {
        let job_tokens = self.tokenize(job_description);
        semantic_percentage(&self.tokenize(resume_text), &job_tokens)
    }

    /// Share of `job_keywords` present in the résumé, as a rounded percentage.
    #[allow(dead_code)]
    pub fn keyword_match_percentage(&self, resume_text: &str, job_keywords: &[String]) -> u32 {
        keyword_percentage(&self.profile(resume_text), job_keywords)
    }

    /// Full score triple of one résumé against one job.
    #[allow(dead_code)]
    pub fn final_score(&self, resume_text: &str, job: &JobPosting) -> MatchScore {
        self.score_job(&self.profile(resume_text), job).score
    }

    /// Scores one job against an already-tokenized résumé.
    pub fn score_job(&self, profile: &ResumeProfile, job: &JobPosting) -> JobMatch {
        let job_tokens = tokenize_opt(job.description.as_deref(), &self.lexicon);
        let semantic_score = semantic_percentage(profile.tokens(), &job_tokens);
        let keyword_score = keyword_percentage(profile, &job.keywords);

        let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = job
            .keywords
            .iter()
            .cloned()
            .partition(|kw| profile.contains(kw));

        JobMatch {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            url: job.url.clone(),
            score: self.combine(keyword_score, semantic_score),
            matched_keywords,
            missing_keywords,
        }
    }

    /// Scores every job and sorts best-first.
    ///
    /// `jobs` is a snapshot owned by the caller for the whole pass. Equal final
    /// scores keep their input order, which carries job recency.
    pub fn rank(&self, resume_text: &str, jobs: &[JobPosting]) -> Vec<JobMatch> {
        let profile = self.profile(resume_text);
        debug!(
            "Ranking {} jobs against résumé with {} tokens",
            jobs.len(),
            profile.tokens().len()
        );

        // collect() on an indexed parallel iterator preserves input order
        let mut matches: Vec<JobMatch> = jobs
            .par_iter()
            .map(|job| self.score_job(&profile, job))
            .collect();

        matches.sort_by(|a, b| b.score.final_score.cmp(&a.score.final_score));
        matches
    }

    fn combine(&self, keyword_score: u32, semantic_score: u32) -> MatchScore {
        let weighted = self.config.keyword_weight * f64::from(keyword_score)
            + self.config.semantic_weight * f64::from(semantic_score);
        MatchScore {
            final_score: clamp_percent(weighted),
            keyword_score,
            semantic_score,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Score components
// ────────────────────────────────────────────────────────────────────────────

/// Empty token sequences short-circuit to 0 without building a vocabulary.
fn semantic_percentage<S: AsRef<str>>(resume_tokens: &[S], job_tokens: &[S]) -> u32 {
    if resume_tokens.is_empty() || job_tokens.is_empty() {
        return 0;
    }
    let pair = vectorize_pair(resume_tokens, job_tokens);
    clamp_percent(cosine_similarity(&pair.a, &pair.b) * 100.0)
}

/// No keywords means no evidence either way, so the score is 0.
fn keyword_percentage(profile: &ResumeProfile, job_keywords: &[String]) -> u32 {
    if job_keywords.is_empty() {
        return 0;
    }
    let matched = job_keywords.iter().filter(|kw| profile.contains(kw)).count();
    clamp_percent(100.0 * matched as f64 / job_keywords.len() as f64)
}

fn clamp_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ARTIST_RESUME: &str =
        "I am a concept artist specializing in stylized character illustration and digital painting";
    const ARTIST_JOB: &str =
        "We need a 2D character artist with strong illustration and painting skills";

    fn matcher() -> Matcher {
        Matcher::new(Lexicon::default(), ScoringConfig::default())
    }

    fn make_job(id: &str, description: &str, keywords: &[&str]) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: Some(format!("Job {id}")),
            company: None,
            url: None,
            description: Some(description.to_string()),
            posted_at: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn artist_keywords() -> Vec<String> {
        ["concept", "artist", "character", "illustration", "digital", "painting"]
            .iter()
            .map(|k| k.to_string())
            .collect()
    }

    #[test]
    fn test_artist_resume_matches_every_keyword() {
        let score = matcher().keyword_match_percentage(ARTIST_RESUME, &artist_keywords());
        assert_eq!(score, 100);
    }

    #[test]
    fn test_artist_resume_has_semantic_overlap() {
        let score = matcher().semantic_similarity(ARTIST_RESUME, ARTIST_JOB);
        assert!(score > 0, "Expected shared vocabulary to score > 0, got {score}");
        assert!(score < 100);
    }

    #[test]
    fn test_unrelated_resume_scores_near_zero() {
        let m = matcher();
        let resume = "accountant specializing in tax law";
        assert_eq!(m.keyword_match_percentage(resume, &artist_keywords()), 0);
        assert_eq!(m.semantic_similarity(resume, ARTIST_JOB), 0);

        let job = make_job("1", ARTIST_JOB, &[
            "concept", "artist", "character", "illustration", "digital", "painting",
        ]);
        assert_eq!(m.final_score(resume, &job).final_score, 0);
    }

    #[test]
    fn test_empty_text_has_zero_semantic_score() {
        let m = matcher();
        assert_eq!(m.semantic_similarity("", ARTIST_JOB), 0);
        assert_eq!(m.semantic_similarity(ARTIST_RESUME, ""), 0);
        // Stop words only also tokenizes to nothing
        assert_eq!(m.semantic_similarity("the and with", ARTIST_JOB), 0);
    }

    #[test]
    fn test_empty_keywords_score_zero() {
        assert_eq!(matcher().keyword_match_percentage(ARTIST_RESUME, &[]), 0);
    }

    #[test]
    fn test_keyword_percentage_rounds() {
        let keywords: Vec<String> = ["concept", "tax", "law"].iter().map(|k| k.to_string()).collect();
        // 1 of 3 → 33.33 → 33
        assert_eq!(matcher().keyword_match_percentage(ARTIST_RESUME, &keywords), 33);

        let keywords: Vec<String> = ["concept", "artist", "tax"].iter().map(|k| k.to_string()).collect();
        // 2 of 3 → 66.67 → 67
        assert_eq!(matcher().keyword_match_percentage(ARTIST_RESUME, &keywords), 67);
    }

    #[test]
    fn test_identical_texts_are_fully_similar() {
        let score = matcher().semantic_similarity(ARTIST_JOB, ARTIST_JOB);
        assert_eq!(score, 100);
    }

    #[test]
    fn test_final_score_is_weighted_combination() {
        let m = matcher();
        let job = make_job("1", ARTIST_JOB, &[
            "concept", "artist", "character", "illustration", "digital", "painting",
        ]);
        let score = m.final_score(ARTIST_RESUME, &job);

        let expected =
            (0.4 * score.keyword_score as f64 + 0.6 * score.semantic_score as f64).round() as u32;
        assert_eq!(score.keyword_score, 100);
        assert_eq!(score.final_score, expected);
    }

    #[test]
    fn test_custom_weights_are_applied() {
        let config = ScoringConfig {
            keyword_weight: 1.0,
            semantic_weight: 0.0,
            ..ScoringConfig::default()
        };
        let m = Matcher::new(Lexicon::default(), config);
        let job = make_job("1", ARTIST_JOB, &["concept", "accounting"]);
        assert_eq!(m.final_score(ARTIST_RESUME, &job).final_score, 50);
    }

    #[test]
    fn test_job_without_description_scores_keywords_only() {
        let m = matcher();
        let mut job = make_job("1", "", &["concept", "artist"]);
        job.description = None;
        let score = m.final_score(ARTIST_RESUME, &job);
        assert_eq!(score.semantic_score, 0);
        assert_eq!(score.keyword_score, 100);
        assert_eq!(score.final_score, 40);
    }

    #[test]
    fn test_score_job_partitions_keywords() {
        let m = matcher();
        let job = make_job("1", ARTIST_JOB, &["character", "zbrush", "painting", "anatomy"]);
        let result = m.score_job(&m.profile(ARTIST_RESUME), &job);
        assert_eq!(result.matched_keywords, vec!["character", "painting"]);
        assert_eq!(result.missing_keywords, vec!["zbrush", "anatomy"]);
        assert_eq!(result.score.keyword_score, 50);
    }

    #[test]
    fn test_rank_orders_best_first() {
        let m = matcher();
        let jobs = vec![
            make_job("tax", "Senior accountant for tax law practice", &["accountant", "tax"]),
            make_job("art", ARTIST_JOB, &["character", "artist", "illustration"]),
        ];
        let ranked = m.rank(ARTIST_RESUME, &jobs);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job_id, "art");
        assert_eq!(ranked[1].job_id, "tax");
        assert!(ranked[0].score.final_score > ranked[1].score.final_score);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let m = matcher();
        let jobs: Vec<JobPosting> = ["first", "second", "third"]
            .iter()
            .map(|id| make_job(id, ARTIST_JOB, &["character", "painting"]))
            .collect();

        let ranked = m.rank(ARTIST_RESUME, &jobs);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);

        let reversed: Vec<JobPosting> = jobs.into_iter().rev().collect();
        let ranked = m.rank(ARTIST_RESUME, &reversed);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_rank_ties_stay_stable_around_better_job() {
        let m = matcher();
        let jobs = vec![
            make_job("tie-a", "", &["tax"]),
            make_job("best", ARTIST_JOB, &["character"]),
            make_job("tie-b", "", &["law"]),
        ];
        let ranked = m.rank(ARTIST_RESUME, &jobs);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["best", "tie-a", "tie-b"]);
    }

    #[test]
    fn test_rank_empty_collection() {
        assert!(matcher().rank(ARTIST_RESUME, &[]).is_empty());
    }

    #[test]
    fn test_job_keywords_respect_limit() {
        let config = ScoringConfig {
            keyword_limit: 3,
            ..ScoringConfig::default()
        };
        let m = Matcher::new(Lexicon::default(), config);
        let keywords = m.job_keywords(Some(ARTIST_JOB));
        assert_eq!(keywords.len(), 3);
        assert!(m.job_keywords(None).is_empty());
    }

    #[test]
    fn test_job_keywords_boost_domain_terms() {
        let keywords = matcher().job_keywords(Some("strong strong character"));
        // character is domain vocabulary (4) and outweighs strong (2)
        assert_eq!(keywords, vec!["character", "strong"]);
    }

    proptest! {
        #[test]
        fn prop_final_score_is_bounded(resume in ".{0,200}", description in ".{0,200}") {
            let m = matcher();
            let keywords = m.job_keywords(Some(&description));
            let job = make_job("p", &description, &[]);
            let job = JobPosting { keywords, ..job };
            let score = m.final_score(&resume, &job);
            prop_assert!(score.final_score <= 100);
            prop_assert!(score.keyword_score <= 100);
            prop_assert!(score.semantic_score <= 100);
        }

        #[test]
        fn prop_tokenize_is_deterministic(text in ".{0,200}") {
            let m = matcher();
            prop_assert_eq!(m.tokenize(&text), m.tokenize(&text));
        }

        #[test]
        fn prop_keywords_are_bounded_distinct_tokens(text in "[a-z ]{0,200}", limit in 1usize..10) {
            let m = matcher();
            let keywords = m.extract_keywords(&text, limit);
            let tokens = m.tokenize(&text);
            prop_assert!(keywords.len() <= limit);
            let unique: HashSet<&String> = keywords.iter().collect();
            prop_assert_eq!(unique.len(), keywords.len());
            prop_assert!(keywords.iter().all(|k| tokens.contains(k)));
        }
    }
}
