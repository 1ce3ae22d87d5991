//! In-memory quote cache.
//!
//! A single-slot cache holding the most recent good panel fetch. Repeat
//! requests inside the TTL window reuse one upstream round trip instead
//! of hammering the free endpoints. The cache is in-memory and resets on
//! application restart.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::models::Quote;

/// How long a fetched panel stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// The cached panel together with its fetch time.
#[derive(Clone, Debug)]
struct CacheEntry {
    quotes: Vec<Quote>,
    fetched_at: Instant,
}

/// Single-slot TTL cache for the quote panel.
///
/// Thread-safe. There is exactly one slot: a new panel replaces the old
/// one wholesale, and a stale panel is never served.
pub struct QuoteCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl QuoteCache {
    /// Create a cache with the default TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
        }
    }

    /// Lock the slot mutex, recovering from poison if necessary.
    ///
    /// Worst case after recovery is a stale or missing panel, which the
    /// caller handles anyway.
    fn lock_slot(&self) -> MutexGuard<'_, Option<CacheEntry>> {
        self.slot.lock().unwrap_or_else(|poisoned| {
            warn!("Quote cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// The cached panel, if one is present and still fresh.
    pub fn get(&self) -> Option<Vec<Quote>> {
        let slot = self.lock_slot();

        match slot.as_ref() {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                debug!(
                    "Cache hit: {} quotes, age {:?}",
                    entry.quotes.len(),
                    entry.fetched_at.elapsed()
                );
                Some(entry.quotes.clone())
            }
            Some(entry) => {
                debug!("Cache stale (age {:?}), ignoring", entry.fetched_at.elapsed());
                None
            }
            None => None,
        }
    }

    /// Replace the slot with a freshly fetched panel.
    pub fn put(&self, quotes: Vec<Quote>) {
        let mut slot = self.lock_slot();
        debug!("Caching {} quotes", quotes.len());
        *slot = Some(CacheEntry {
            quotes,
            fetched_at: Instant::now(),
        });
    }

    /// Drop the cached panel so the next request goes upstream.
    pub fn clear(&self) {
        let mut slot = self.lock_slot();
        if slot.take().is_some() {
            debug!("Cache cleared");
        }
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
