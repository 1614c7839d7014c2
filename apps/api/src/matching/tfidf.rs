//! TF-IDF Vectorizer over a corpus of exactly two documents.
//!
//! The IDF is computed from the compared pair only, never from a persistent corpus.
//! This keeps every comparison stateless, at the cost of IDF reflecting just the two
//! documents rather than term rarity across the whole job market. A pairwise
//! relative similarity is all the hybrid scorer needs, so do not replace this with
//! global corpus statistics without revisiting the scoring weights.

use std::collections::{HashMap, HashSet};

/// Corpus size: the résumé and one job description.
const CORPUS_SIZE: f64 = 2.0;

/// Two TF-IDF vectors indexed by the same vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfPair {
    /// Distinct tokens of both documents in first-seen order (A first, then B).
    #[allow(dead_code)]
    pub vocabulary: Vec<String>,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

/// Smoothed inverse document frequency: `ln((N + 1) / (df + 1)) + 1`.
///
/// Strictly positive for every `df` in the corpus, so shared terms still count.
pub fn idf(document_frequency: usize) -> f64 {
    ((CORPUS_SIZE + 1.0) / (document_frequency as f64 + 1.0)).ln() + 1.0
}

/// Builds the shared vocabulary and the raw-count TF × IDF vector of each document.
pub fn vectorize_pair<S: AsRef<str>>(a: &[S], b: &[S]) -> TfIdfPair {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);

    let mut seen: HashSet<&str> = HashSet::new();
    let vocabulary: Vec<String> = a
        .iter()
        .chain(b.iter())
        .map(AsRef::as_ref)
        .filter(|term| seen.insert(*term))
        .map(String::from)
        .collect();

    let mut vec_a = Vec::with_capacity(vocabulary.len());
    let mut vec_b = Vec::with_capacity(vocabulary.len());

    for term in &vocabulary {
        let tf_a = counts_a.get(term.as_str()).copied().unwrap_or(0);
        let tf_b = counts_b.get(term.as_str()).copied().unwrap_or(0);
        let df = usize::from(tf_a > 0) + usize::from(tf_b > 0);
        let weight = idf(df);

        vec_a.push(tf_a as f64 * weight);
        vec_b.push(tf_b as f64 * weight);
    }

    TfIdfPair {
        vocabulary,
        a: vec_a,
        b: vec_b,
    }
}

fn term_counts<S: AsRef<str>>(tokens: &[S]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    counts
}
