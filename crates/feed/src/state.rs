use chrono::{DateTime, Utc};
use fxboard_market_data::Quote;

/// Observable state of the quote feed.
///
/// This is what a rates widget binds to: the current panel, a flag for
/// the fetch in flight, the last error, and when data last arrived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedSnapshot {
    /// Latest good panel. Emptied when a fetch fails, so an error is
    /// never presented next to outdated numbers.
    pub quotes: Vec<Quote>,

    /// True while a fetch is in flight.
    pub loading: bool,

    /// Message from the most recent failed fetch, cleared when the next
    /// one starts.
    pub error: Option<String>,

    /// Completion time of the last successful fetch.
    pub last_update: Option<DateTime<Utc>>,
}
