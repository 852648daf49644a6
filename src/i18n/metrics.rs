//! Cache metrics and observability module.
//!
//! Each `LocaleCache` owns its own `CacheMetrics`, so independent caches
//! (and parallel tests) never share counters.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for lookups and reloads performed by one cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Number of `translate`/`language_table` calls
    lookups: AtomicUsize,

    /// Number of lookups served from an entry that needed no reload
    cache_hits: AtomicUsize,

    /// Number of locale files read and installed
    reloads: AtomicUsize,

    /// Number of reloads that failed (unreadable or undecodable file)
    reload_failures: AtomicUsize,

    /// Number of lookups answered from the default language instead
    fallbacks: AtomicUsize,

    /// Number of `translate` calls that returned the key itself
    missing_keys: AtomicUsize,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reload(&self) {
        self.reloads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reload_failure(&self) {
        self.reload_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_key(&self) {
        self.missing_keys.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::Relaxed)
    }

    pub fn reload_failures(&self) -> usize {
        self.reload_failures.load(Ordering::Relaxed)
    }

    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn missing_keys(&self) -> usize {
        self.missing_keys.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let hits = self.cache_hits();
        let cache_hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            cache_hits: hits,
            cache_hit_rate,
            reloads: self.reloads(),
            reload_failures: self.reload_failures(),
            fallbacks: self.fallbacks(),
            missing_keys: self.missing_keys(),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.lookups.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.reloads.store(0, Ordering::Relaxed);
        self.reload_failures.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
        self.missing_keys.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the cache counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub lookups: usize,

    pub cache_hits: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub reloads: usize,

    pub reload_failures: usize,

    pub fallbacks: usize,

    pub missing_keys: usize,
}
