//! FxBoard Feed Crate
//!
//! Presentation-side state for the rates panel. The feed wraps the
//! market data service in an observable snapshot with loading and error
//! flags, plus an optional background task that reloads it on a fixed
//! interval.
//!
//! A frontend drives it in three moves:
//! - [`QuoteFeed::load`] on mount
//! - [`start_auto_refresh`] while the panel is on screen
//! - [`QuoteFeed::refresh`] when the user asks for fresh numbers

pub mod feed;
pub mod refresh;
pub mod state;

pub use feed::QuoteFeed;
pub use refresh::{start_auto_refresh, RefreshHandle, DEFAULT_REFRESH_INTERVAL};
pub use state::FeedSnapshot;
