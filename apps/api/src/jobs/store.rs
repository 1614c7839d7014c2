use std::sync::{Arc, RwLock};

use crate::jobs::JobPosting;

/// Shared job collection with snapshot reads and atomic replacement.
///
/// Readers take an `Arc` to the current collection and keep it for a whole
/// ranking pass; a refresh swaps in a new `Arc` and never mutates the old one.
#[derive(Clone)]
pub struct JobStore {
    inner: Arc<RwLock<Arc<[JobPosting]>>>,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl JobStore {
    pub fn new(jobs: Vec<JobPosting>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(jobs.into())),
        }
    }

    /// Immutable handle to the collection as of this call.
    pub fn snapshot(&self) -> Arc<[JobPosting]> {
        // Poisoning only means a writer panicked mid-swap; the old Arc is still whole
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&*guard)
    }

    /// Swaps in a new collection, returning its size.
    pub fn replace(&self, jobs: Vec<JobPosting>) -> usize {
        let count = jobs.len();
        let next: Arc<[JobPosting]> = jobs.into();
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = next;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            title: None,
            company: None,
            url: None,
            description: None,
            posted_at: None,
            keywords: vec![],
        }
    }

    #[test]
    fn test_default_store_is_empty() {
        let store = JobStore::default();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = JobStore::new(vec![job("a"), job("b")]);
        let before = store.snapshot();

        let count = store.replace(vec![job("c")]);
        assert_eq!(count, 1);

        // The earlier snapshot is untouched by the swap
        assert_eq!(before.len(), 2);
        assert_eq!(before[0].id, "a");
        assert_eq!(store.snapshot()[0].id, "c");
    }

    #[test]
    fn test_clones_share_collection() {
        let store = JobStore::default();
        let handle = store.clone();
        store.replace(vec![job("a")]);
        assert_eq!(handle.snapshot().len(), 1);
    }

    #[test]
    fn test_concurrent_reads_during_replace() {
        let store = JobStore::new(vec![job("a"), job("b")]);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let reader = store.clone();
                scope.spawn(move || {
                    for _ in 0..100 {
                        let snapshot = reader.snapshot();
                        // Each snapshot is one whole collection, never a mix
                        assert!(snapshot.len() == 2 || snapshot.len() == 3);
                    }
                });
            }
            for _ in 0..50 {
                store.replace(vec![job("x"), job("y"), job("z")]);
                store.replace(vec![job("a"), job("b")]);
            }
        });
    }
}
