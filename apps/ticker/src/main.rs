//! Terminal rates ticker.
//!
//! Prints the four-symbol panel (EUR/USD, GBP/USD, USD/JPY, XAU/USD) and
//! keeps it fresh with the same feed the web widget uses: one initial
//! load, then a 30-second auto-refresh until Ctrl-C. Synthetic change
//! figures are marked with `~`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use log::info;

use fxboard_feed::{start_auto_refresh, FeedSnapshot, QuoteFeed, DEFAULT_REFRESH_INTERVAL};
use fxboard_market_data::MarketDataService;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let service = Arc::new(MarketDataService::with_default_providers());
    let feed = Arc::new(QuoteFeed::new(service));

    info!("Fetching initial panel");
    feed.load().await;

    let mut last = feed.snapshot();
    render(&last);

    let refresh = start_auto_refresh(feed.clone(), DEFAULT_REFRESH_INTERVAL);

    let mut poll = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            _ = poll.tick() => {
                let snapshot = feed.snapshot();
                if panel_changed(&snapshot, &last) {
                    render(&snapshot);
                }
                last = snapshot;
            }
        }
    }

    refresh.stop();
    Ok(())
}

/// Whether the visible part of the snapshot moved (the loading flag
/// alone does not warrant a reprint).
fn panel_changed(current: &FeedSnapshot, previous: &FeedSnapshot) -> bool {
    current.quotes != previous.quotes
        || current.error != previous.error
        || current.last_update != previous.last_update
}

fn render(snapshot: &FeedSnapshot) {
    if let Some(error) = &snapshot.error {
        println!("refresh failed: {error}");
        println!();
        return;
    }

    if snapshot.quotes.is_empty() {
        println!("waiting for first quotes...");
        return;
    }

    if let Some(at) = snapshot.last_update {
        println!("Rates as of {}", at.with_timezone(&Local).format("%H:%M:%S"));
    }
    for quote in &snapshot.quotes {
        let marker = if quote.is_synthetic_change { "~" } else { " " };
        println!(
            "  {:<8} {:>10}  {}{} ({})",
            quote.symbol, quote.price, marker, quote.change, quote.change_percent
        );
    }
    println!();
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
