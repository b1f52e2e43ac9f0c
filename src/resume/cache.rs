//! Memoizing resume provider
//!
//! Resume content is stable per reference, so every reference is fetched at
//! most once. Concurrent callers asking for the same reference wait on the
//! single in-flight fetch instead of starting their own. A fetch that timed
//! out is not stored, so the next caller gets another attempt.

use super::{ContentResult, ResumeContentProvider, UnavailableReason};
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Slot = Arc<Mutex<Option<ContentResult>>>;

pub struct CachingProvider<P> {
    inner: P,
    entries: Mutex<HashMap<String, Slot>>,
    fetches: AtomicUsize,
}

impl<P: ResumeContentProvider> CachingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            fetches: AtomicUsize::new(0),
        }
    }

    fn slot(&self, reference: &str) -> Slot {
        // A poisoned map is still structurally valid; keep using it
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(entries.entry(reference.to_string()).or_default())
    }

    /// Number of fetches that reached the wrapped provider
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Number of references seen, including ones still being fetched
    pub fn cache_size(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl<P: ResumeContentProvider> ResumeContentProvider for CachingProvider<P> {
    fn fetch(&self, reference: &str) -> ContentResult {
        let slot = self.slot(reference);

        // The map lock is released here; only callers of this reference block
        let mut cached = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(result) = cached.as_ref() {
            debug!("Using cached resume content for: {}", reference);
            return result.clone();
        }

        self.fetches.fetch_add(1, Ordering::Relaxed);
        let result = self.inner.fetch(reference);
        if result == ContentResult::Unavailable(UnavailableReason::TimedOut) {
            debug!("Not caching timed out fetch for: {}", reference);
        } else {
            *cached = Some(result.clone());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::PlaceholderProvider;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fetches_once_per_reference() {
        let cache = CachingProvider::new(PlaceholderProvider);

        let first = cache.fetch("https://x/d/a/");
        let second = cache.fetch("https://x/d/a/");
        cache.fetch("https://x/d/b/");

        assert_eq!(first, second);
        assert_eq!(cache.fetch_count(), 2);
        assert_eq!(cache.cache_size(), 2);
    }

    #[test]
    fn test_unavailable_results_are_cached_too() {
        let cache = CachingProvider::new(PlaceholderProvider);

        for _ in 0..3 {
            assert_eq!(
                cache.fetch("no id here"),
                ContentResult::Unavailable(UnavailableReason::MalformedReference)
            );
        }
        assert_eq!(cache.fetch_count(), 1);

        cache.clear();
        cache.fetch("no id here");
        assert_eq!(cache.fetch_count(), 2);
    }

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl ResumeContentProvider for CountingProvider {
        fn fetch(&self, _reference: &str) -> ContentResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            ContentResult::Available("Python".to_string())
        }
    }

    #[test]
    fn test_single_in_flight_fetch_under_contention() {
        let cache = Arc::new(CachingProvider::new(CountingProvider {
            calls: AtomicUsize::new(0),
        }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.fetch("https://x/d/shared/"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().text(), Some("Python"));
        }
        assert_eq!(cache.inner.calls.load(Ordering::SeqCst), 1);
    }

    /// Times out on the first call and answers on every later one
    struct SlowOnceProvider {
        calls: AtomicUsize,
    }

    impl ResumeContentProvider for SlowOnceProvider {
        fn fetch(&self, _reference: &str) -> ContentResult {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                ContentResult::Unavailable(UnavailableReason::TimedOut)
            } else {
                ContentResult::Available("Rust".to_string())
            }
        }
    }

    #[test]
    fn test_timed_out_fetch_is_retried() {
        let cache = CachingProvider::new(SlowOnceProvider {
            calls: AtomicUsize::new(0),
        });

        assert_eq!(
            cache.fetch("https://x/d/slow/"),
            ContentResult::Unavailable(UnavailableReason::TimedOut)
        );
        assert_eq!(cache.fetch("https://x/d/slow/").text(), Some("Rust"));
        assert_eq!(cache.fetch("https://x/d/slow/").text(), Some("Rust"));
        assert_eq!(cache.fetch_count(), 2);
    }
}
