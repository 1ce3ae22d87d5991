//! Shared quote feed.
//!
//! `QuoteFeed` owns the observable snapshot and drives it through the
//! market data service. Lock guards on the snapshot are short-lived and
//! never held across an await, so readers are never blocked behind a
//! network fetch.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use log::{debug, warn};

use fxboard_market_data::MarketDataServiceTrait;

use crate::state::FeedSnapshot;

/// Observable quote panel over a market data service.
pub struct QuoteFeed {
    service: Arc<dyn MarketDataServiceTrait>,
    state: RwLock<FeedSnapshot>,
}

impl QuoteFeed {
    /// Create a feed with an empty snapshot.
    pub fn new(service: Arc<dyn MarketDataServiceTrait>) -> Self {
        Self {
            service,
            state: RwLock::new(FeedSnapshot::default()),
        }
    }

    /// Lock the snapshot for reading, recovering from poison if necessary.
    fn read_state(&self) -> RwLockReadGuard<'_, FeedSnapshot> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Feed state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Lock the snapshot for writing, recovering from poison if necessary.
    fn write_state(&self) -> RwLockWriteGuard<'_, FeedSnapshot> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Feed state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// A copy of the current feed state.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.read_state().clone()
    }

    /// Fetch the panel and fold the outcome into the snapshot.
    ///
    /// The previous panel stays visible while the fetch runs. A failure
    /// clears it: an error banner is never shown next to numbers that no
    /// longer reflect any provider. `last_update` moves on success alone.
    pub async fn load(&self) {
        {
            let mut state = self.write_state();
            state.loading = true;
            state.error = None;
        }

        match self.service.get_quotes().await {
            Ok(quotes) => {
                let mut state = self.write_state();
                debug!("Feed updated: {} quotes", quotes.len());
                state.quotes = quotes;
                state.error = None;
                state.last_update = Some(Utc::now());
                state.loading = false;
            }
            Err(e) => {
                warn!("Feed refresh failed: {}", e);
                let mut state = self.write_state();
                state.quotes = Vec::new();
                state.error = Some(e.to_string());
                state.loading = false;
            }
        }
    }

    /// Drop the service cache, then fetch.
    ///
    /// This is the manual-refresh path: the caller asked for new numbers,
    /// so a cached panel must not satisfy the request.
    pub async fn refresh(&self) {
        self.service.clear_cache();
        self.load().await;
    }
}
