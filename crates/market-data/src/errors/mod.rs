//! Error types for the market data crate.
//!
//! Every failure carries the id of the provider it came from, so log lines
//! and error banners can name the endpoint that misbehaved. Per-provider
//! failures are recovered by the registry's fallback loop; only the
//! chain-level variants escape a fetch.

use thiserror::Error;

/// Errors that can occur while fetching or assembling panel quotes.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider did not answer within its per-attempt budget.
    /// The registry abandons the attempt and tries the next provider.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// Transport failure or a non-success HTTP status.
    /// Try the next provider in the chain.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response decoded but does not hold the fields the panel needs,
    /// or holds unusable values (missing currencies, non-positive rates).
    /// Try the next provider in the chain.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the response
        provider: String,
        /// Description of what was missing or unusable
        message: String,
    },

    /// The response decoded and parsed but failed a plausibility check.
    /// Try the next provider in the chain.
    #[error("Validation failed: {provider} - {message}")]
    ValidationFailed {
        /// The provider whose data failed validation
        provider: String,
        /// Description of the validation failure
        message: String,
    },

    /// A chain was constructed with no providers at all.
    #[error("No providers available")]
    NoProvidersAvailable,

    /// Every provider in a chain was tried and all failed.
    /// This is the terminal error for the whole fetch.
    #[error("All providers failed")]
    AllProvidersFailed,
}
