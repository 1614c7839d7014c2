// Résumé-to-job matching engine.
// tokenizer → keywords (ingestion) and tokenizer → tfidf → similarity (match time),
// merged by scorer into one 0–100 score per job. Pure and synchronous throughout.

pub mod handlers;
pub mod keywords;
pub mod lexicon;
pub mod scorer;
pub mod similarity;
pub mod tfidf;
pub mod tokenizer;
