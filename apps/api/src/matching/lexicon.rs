//! Lexicon — the stop-word list and curated domain vocabulary the tokenizer and
//! keyword extractor consult.
//!
//! Both sets are plain configuration values. The built-in lists target concept-art
//! postings; a deployment for another profession swaps them via
//! `DOMAIN_VOCABULARY_FILE` / `STOP_WORDS_FILE` without a code change.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::LexiconConfig;

const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "have", "his", "how", "its", "may", "new", "now", "old", "see",
    "two", "way", "who", "did", "get", "let", "she", "too", "use", "with", "this", "that",
    "from", "they", "will", "would", "there", "their", "what", "about", "which", "when", "make",
    "like", "time", "just", "know", "take", "into", "year", "your", "some", "could", "them",
    "than", "then", "look", "only", "come", "over", "also", "back", "after", "well", "even",
    "want", "because", "these", "give", "most", "were", "been", "being", "does", "doing",
    "very", "should", "such", "here", "where", "while", "must", "each", "more", "other",
    "able", "etc", "within", "across", "including", "using", "need", "needs", "looking",
];

const DEFAULT_DOMAIN_VOCABULARY: &[&str] = &[
    "concept", "artist", "art", "character", "environment", "illustration", "illustrator",
    "painting", "digital", "design", "designer", "sketch", "sketching", "drawing", "anatomy",
    "composition", "color", "lighting", "rendering", "storyboard", "visual", "development",
    "props", "creature", "vehicle", "keyframe", "matte", "stylized", "realistic", "photoshop",
    "procreate", "krita", "blender", "zbrush", "maya", "substance", "unreal", "unity",
    "modeling", "sculpting", "texturing", "animation", "portfolio", "worldbuilding",
    "costume", "silhouette", "perspective", "fantasy", "sci-fi", "game", "games", "film",
];

/// Stop words plus the domain vocabulary that earns the keyword boost.
///
/// Entries are stored lowercase; lookups expect already-normalized tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    stop_words: HashSet<String>,
    domain_vocabulary: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new(
            DEFAULT_STOP_WORDS.iter().copied(),
            DEFAULT_DOMAIN_VOCABULARY.iter().copied(),
        )
    }
}

impl Lexicon {
    pub fn new<S, D>(stop_words: S, domain_vocabulary: D) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
    {
        Self {
            stop_words: normalize_terms(stop_words),
            domain_vocabulary: normalize_terms(domain_vocabulary),
        }
    }

    /// Builds the lexicon from config, falling back to the built-in list for each
    /// file that is not configured.
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let mut lexicon = Self::default();

        if let Some(path) = &config.stop_words_file {
            lexicon.stop_words = load_term_file(path)?;
        }
        if let Some(path) = &config.domain_vocabulary_file {
            lexicon.domain_vocabulary = load_term_file(path)?;
        }

        Ok(lexicon)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    pub fn is_domain_term(&self, token: &str) -> bool {
        self.domain_vocabulary.contains(token)
    }

    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }

    pub fn domain_term_count(&self) -> usize {
        self.domain_vocabulary.len()
    }
}

fn normalize_terms<I>(terms: I) -> HashSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses a term list: one term per line, `#` comments and blank lines skipped.
fn parse_term_list(content: &str) -> HashSet<String> {
    normalize_terms(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#')),
    )
}

fn load_term_file(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file '{}'", path.display()))?;
    Ok(parse_term_list(&content))
}
