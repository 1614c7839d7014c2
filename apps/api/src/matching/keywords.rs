//! Keyword Extractor — frequency-ranks a document's tokens, boosting the domain
//! vocabulary, to produce its top-N keywords.

use std::collections::HashMap;

use crate::matching::lexicon::Lexicon;
use crate::matching::tokenizer::tokenize;

/// Returns up to `limit` distinct tokens of `text`, heaviest first.
///
/// Each occurrence of a domain-vocabulary token adds `domain_boost`, any other
/// token adds 1. Ties keep first-encounter order.
pub fn extract_keywords(
    text: &str,
    limit: usize,
    lexicon: &Lexicon,
    domain_boost: u32,
) -> Vec<String> {
    let tokens = tokenize(text, lexicon);
    if tokens.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut weighted = weigh_tokens(tokens, lexicon, domain_boost);

    // sort_by is stable, so equal weights stay in first-seen order
    weighted.sort_by(|a, b| b.1.cmp(&a.1));

    weighted
        .into_iter()
        .take(limit)
        .map(|(token, _)| token)
        .collect()
}

/// Accumulates per-token weight, preserving the order tokens were first seen.
fn weigh_tokens(tokens: Vec<String>, lexicon: &Lexicon, domain_boost: u32) -> Vec<(String, u64)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut weighted: Vec<(String, u64)> = Vec::new();

    for token in tokens {
        let weight = if lexicon.is_domain_term(&token) {
            u64::from(domain_boost)
        } else {
            1
        };

        match positions.get(&token) {
            Some(&idx) => weighted[idx].1 += weight,
            None => {
                positions.insert(token.clone(), weighted.len());
                weighted.push((token, weight));
            }
        }
    }

    weighted
}
