//! Tokenizer — raw text to a filtered, lowercase token sequence.
//!
//! Pure and deterministic: the same text and lexicon always yield the same tokens,
//! which keeps scores reproducible and keyword caching valid.

use crate::matching::lexicon::Lexicon;

/// Tokens this short or shorter are dropped.
const MAX_DROPPED_LEN: usize = 2;

/// Splits `text` into normalized tokens.
///
/// Whitespace runs collapse to one space, every character other than an ASCII
/// letter, digit, space, `#`, `+`, `-`, `_` or `.` is removed, the rest is
/// lowercased and split. Tokens of length ≤ 2 and stop words are discarded.
/// Empty input yields an empty sequence.
pub fn tokenize(text: &str, lexicon: &Lexicon) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .filter(|token| token.len() > MAX_DROPPED_LEN)
        .filter(|token| !lexicon.is_stop_word(token))
        .map(String::from)
        .collect()
}

/// Null-tolerant variant for optional fields such as a job description.
pub fn tokenize_opt(text: Option<&str>, lexicon: &Lexicon) -> Vec<String> {
    text.map(|t| tokenize(t, lexicon)).unwrap_or_default()
}

fn normalize(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.chars() {
        if is_separator(ch) {
            if !in_whitespace {
                normalized.push(' ');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        if is_token_char(ch) {
            normalized.push(ch.to_ascii_lowercase());
        }
    }

    normalized
}

/// Unicode whitespace plus U+FEFF (zero-width no-break space).
fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '#' | '+' | '-' | '_' | '.')
}
