//! Reuse policy for highlighters.
//!
//! Building a [`Highlighter`] compiles every query, so the policy keeps one
//! shared instance for calls that bring no query directories of their own.
//! Calls with call-scoped directories get a highlighter built from the base
//! directories followed by theirs. That instance is dropped after the call
//! unless a cache capacity is configured, in which case it is kept in an
//! LRU cache keyed by the directory list. Replacing query files apply
//! last-wins, so the key keeps the caller's order.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use camino::Utf8PathBuf;
use lru::LruCache;
use tracing::{debug, warn};

use crate::highlighter::{Highlighter, HighlighterSources};

const LIFECYCLE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lifecycle");

type HighlighterCache = LruCache<Vec<Utf8PathBuf>, Arc<Highlighter>>;

/// Decides when a highlighter is shared, cached or built for one call.
#[derive(Debug)]
pub struct HighlighterPolicy {
    base: HighlighterSources,
    shared: Arc<Highlighter>,
    cache: Option<Mutex<HighlighterCache>>,
}

impl HighlighterPolicy {
    /// Builds the shared highlighter from `base`.
    ///
    /// A `cache_capacity` of zero disables caching of call-scoped
    /// highlighters.
    #[must_use]
    pub fn new(base: HighlighterSources, cache_capacity: usize) -> Self {
        let shared = Arc::new(Highlighter::build(&base));
        let cache =
            NonZeroUsize::new(cache_capacity).map(|capacity| Mutex::new(LruCache::new(capacity)));
        Self {
            base,
            shared,
            cache,
        }
    }

    /// Returns the highlighter used when no query directories are supplied.
    #[must_use]
    pub fn shared(&self) -> Arc<Highlighter> {
        Arc::clone(&self.shared)
    }

    /// Returns a highlighter for a call with `extra` query directories.
    ///
    /// The directories are applied after the base directories in the order
    /// given. Calls naming the same directories in the same order share a
    /// cached instance.
    #[must_use]
    pub fn highlighter_for(&self, extra: &[Utf8PathBuf]) -> Arc<Highlighter> {
        if extra.is_empty() {
            debug!(target: LIFECYCLE_TARGET, "reusing shared highlighter");
            return self.shared();
        }

        let Some(cache) = self.cache.as_ref() else {
            debug!(
                target: LIFECYCLE_TARGET,
                query_dirs = extra.len(),
                "building transient highlighter"
            );
            return Arc::new(self.build(extra));
        };

        let Ok(mut guard) = cache.lock() else {
            warn!(
                target: LIFECYCLE_TARGET,
                "highlighter cache lock poisoned; building transient highlighter"
            );
            return Arc::new(self.build(extra));
        };

        if let Some(hit) = guard.get(extra) {
            debug!(target: LIFECYCLE_TARGET, query_dirs = extra.len(), "highlighter cache hit");
            return Arc::clone(hit);
        }

        debug!(target: LIFECYCLE_TARGET, query_dirs = extra.len(), "highlighter cache miss");
        let built = Arc::new(self.build(extra));
        guard.put(extra.to_vec(), Arc::clone(&built));
        built
    }

    /// Returns the number of cached call-scoped highlighters.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok().map(|guard| guard.len()))
            .unwrap_or(0)
    }

    fn build(&self, extra: &[Utf8PathBuf]) -> Highlighter {
        Highlighter::build(&self.base.extended(extra))
    }
}
