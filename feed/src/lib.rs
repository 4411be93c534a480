//! Quote source trait and implementations for ballast.
//!
//! Provides a generic `QuoteSource` trait that abstracts over market-data
//! feeds. Implementations:
//!
//! - **Yahoo Finance** (`yahoo`): latest trade price via the public chart endpoint
//! - **Mock** (`mock`): canned quotes and injected failures for tests

pub mod error;
pub mod mock;
pub mod types;
pub mod yahoo;

pub use error::FeedError;
pub use types::Quote;

/// A market-data feed that resolves the latest trade price per symbol.
///
/// Lookups are per-symbol by contract: one symbol's failure must not abort
/// lookups for other symbols. Callers decide which failures to skip.
pub trait QuoteSource {
    /// Get the latest available quote for `symbol`.
    fn latest(&self, symbol: &str) -> Result<Quote, FeedError>;
}
