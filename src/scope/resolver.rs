//! Memoised containment checks over a shared scope set

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::set::ScopeSet;

/// Cache statistics for monitoring performance
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub size: usize,
    pub hit_count: u64,
    pub miss_count: u64,
    pub hit_rate: f64,
}

/// Scope resolver answers repeated string queries against one granted set
///
/// Decisions are cached by the raw candidate string. The underlying set is
/// immutable, so cached decisions never go stale; the cache is cleared
/// wholesale once it grows past `max_cache_size` from the set's
/// configuration.
///
/// # Thread Safety
///
/// ScopeResolver uses DashMap for thread-safe caching and can be safely
/// shared across threads.
///
/// # Examples
///
/// ```
/// use scopelist::{ScopeConfig, ScopeResolver, ScopeSet};
///
/// let granted = ScopeSet::new(["user+w", "user/emails"], ScopeConfig::default()).unwrap();
/// let resolver = ScopeResolver::new(granted);
///
/// assert!(resolver.check("user/emails+rw"));
/// assert!(resolver.check("user/emails+rw"));
/// assert_eq!(resolver.get_stats().hit_count, 1);
/// ```
pub struct ScopeResolver {
    scopes: Arc<ScopeSet>,
    decisions: DashMap<String, bool>,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
}

impl ScopeResolver {
    pub fn new(scopes: impl Into<Arc<ScopeSet>>) -> Self {
        Self {
            scopes: scopes.into(),
            decisions: DashMap::new(),
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
        }
    }

    /// The granted set this resolver answers for
    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Returns whether the granted set authorizes `candidate`
    pub fn check(&self, candidate: &str) -> bool {
        if let Some(decision) = self.decisions.get(candidate) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            return *decision;
        }

        self.miss_count.fetch_add(1, Ordering::Relaxed);

        let decision = self.scopes.contains(candidate);

        if self.decisions.len() >= self.scopes.config().max_cache_size {
            debug!(size = self.decisions.len(), "scope decision cache full, clearing");
            self.decisions.clear();
        }
        self.decisions.insert(candidate.to_string(), decision);

        decision
    }

    /// Returns whether every candidate is authorized
    pub fn check_all<'a>(&self, candidates: impl IntoIterator<Item = &'a str>) -> bool {
        candidates.into_iter().all(|candidate| self.check(candidate))
    }

    /// Clears cached decisions and resets statistics
    pub fn clear_cache(&self) {
        self.decisions.clear();
        self.hit_count.store(0, Ordering::Relaxed);
        self.miss_count.store(0, Ordering::Relaxed);
    }

    /// Returns cache statistics
    pub fn get_stats(&self) -> CacheStats {
        let size = self.decisions.len();
        let hits = self.hit_count.load(Ordering::Relaxed);
        let misses = self.miss_count.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        CacheStats {
            size,
            hit_count: hits,
            miss_count: misses,
            hit_rate,
        }
    }
}
