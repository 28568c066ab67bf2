//! Report memoisation using Moka.
//!
//! Assembled reports are kept for a short time-to-live so that dashboards
//! polled by many clients hit the fact store once per interval. Keys carry
//! the resolved scope, so a restricted caller never sees a wider report.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;

use super::query::ReportQuery;

/// Default cache capacity (number of reports).
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for cached reports (1 minute).
const DEFAULT_TTL_SECS: u64 = 60;

type Entry = Arc<dyn Any + Send + Sync>;

/// Cache of assembled reports.
///
/// Cloning shares the underlying store. Every invalidation starts a new
/// generation; a report assembled under an older generation is not stored.
#[derive(Clone)]
pub struct ReportCache {
    cache: Option<Cache<ReportQuery, Entry>>,
    generation: Arc<AtomicU64>,
}

impl ReportCache {
    /// Creates a cache with default settings.
    ///
    /// Default: 256 reports max, 1 minute TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with custom configuration; a TTL of 0 disables it.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        if ttl_secs == 0 {
            return Self::disabled();
        }
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            cache: Some(cache),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A cache that never stores anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            cache: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns true if reports are memoised.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Cached report for the query, if present and of type `T`.
    #[must_use]
    pub fn get<T>(&self, query: &ReportQuery) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let entry = self.cache.as_ref()?.get(query)?;
        entry.downcast::<T>().ok().map(|report| (*report).clone())
    }

    /// Current generation; read it before assembling a report.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Stores a report assembled during `generation`; dropped if the cache
    /// was invalidated since.
    pub fn insert<T>(&self, query: ReportQuery, report: &T, generation: u64)
    where
        T: Clone + Send + Sync + 'static,
    {
        let Some(cache) = &self.cache else {
            return;
        };
        if self.generation() != generation {
            return;
        }
        let entry: Entry = Arc::new(report.clone());
        cache.insert(query.clone(), entry);
        // An invalidation may land between the check and the insert.
        if self.generation() != generation {
            cache.invalidate(&query);
        }
    }

    /// Drops every cached report and starts a new generation.
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Some(cache) = &self.cache {
            cache.invalidate_all();
        }
    }

    /// Number of cached reports.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.as_ref().map_or(0, Cache::entry_count)
    }

    /// Runs pending maintenance so that counts are up to date.
    pub fn run_pending_tasks(&self) {
        if let Some(cache) = &self.cache {
            cache.run_pending_tasks();
        }
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReportCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportCache")
            .field("enabled", &self.is_enabled())
            .field("entries", &self.entry_count())
            .finish()
    }
}
