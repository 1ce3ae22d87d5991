//! Periodic feed refresh.
//!
//! Spawns a background task that reloads the feed at a fixed interval,
//! mirroring how the rates widget polls while it stays on screen.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;
use tokio::time::interval;

use crate::feed::QuoteFeed;

/// Refresh interval used by the rates panel.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Handle to a running auto-refresh task.
///
/// The task stops when [`RefreshHandle::stop`] is called or the handle
/// is dropped.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the refresh loop.
    pub fn stop(self) {
        self.task.abort();
        debug!("Auto-refresh stopped");
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start reloading `feed` every `period`.
///
/// The first reload happens one full period after start; loading the
/// initial panel is the caller's job.
pub fn start_auto_refresh(feed: Arc<QuoteFeed>, period: Duration) -> RefreshHandle {
    let task = tokio::spawn(async move {
        info!("Auto-refresh started ({:?} interval)", period);

        let mut ticker = interval(period);
        // an interval's first tick completes immediately, skip it
        ticker.tick().await;

        loop {
            ticker.tick().await;
            feed.load().await;
        }
    });

    RefreshHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fxboard_market_data::{MarketDataError, MarketDataServiceTrait, Quote};
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        fetches: AtomicUsize,
    }

    impl CountingService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl MarketDataServiceTrait for CountingService {
        async fn get_quotes(&self) -> Result<Vec<Quote>, MarketDataError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        fn clear_cache(&self) {}

        async fn get_currency_rate(
            &self,
            _from: &str,
            _to: &str,
        ) -> Result<Decimal, MarketDataError> {
            Ok(Decimal::ONE)
        }
    }

    #[tokio::test]
    async fn test_no_reload_before_the_first_period() {
        let service = CountingService::new();
        let feed = Arc::new(QuoteFeed::new(service.clone()));

        let handle = start_auto_refresh(feed, Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(service.fetches.load(Ordering::SeqCst), 0);
        handle.stop();
    }

    #[tokio::test]
    async fn test_reloads_on_every_period() {
        let service = CountingService::new();
        let feed = Arc::new(QuoteFeed::new(service.clone()));

        let handle = start_auto_refresh(feed, Duration::from_millis(25));
        tokio::time::sleep(Duration::from_millis(90)).await;
        handle.stop();

        let ticks = service.fetches.load(Ordering::SeqCst);
        assert!(ticks >= 2, "expected at least two reloads, got {ticks}");
    }

    #[tokio::test]
    async fn test_stop_freezes_the_loop() {
        let service = CountingService::new();
        let feed = Arc::new(QuoteFeed::new(service.clone()));

        let handle = start_auto_refresh(feed, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.stop();
        let after_stop = service.fetches.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(service.fetches.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_dropping_the_handle_aborts_the_loop() {
        let service = CountingService::new();
        let feed = Arc::new(QuoteFeed::new(service.clone()));

        {
            let _handle = start_auto_refresh(feed, Duration::from_millis(15));
            tokio::time::sleep(Duration::from_millis(40)).await;
        }

        let at_drop = service.fetches.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(45)).await;
        assert_eq!(service.fetches.load(Ordering::SeqCst), at_drop);
    }
}
