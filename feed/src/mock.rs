//! Mock quote source for testing — implements the `QuoteSource` trait with
//! canned quotes and configurable failures, without network calls.
//!
//! ```ignore
//! use ballast_feed::mock::MockQuoteSource;
//!
//! let feed = MockQuoteSource::builder()
//!     .with_quote("VTI", 220.50)
//!     .with_failure("VXUS")
//!     .build();
//! ```

use std::sync::Mutex;

use chrono::Utc;

use crate::error::FeedError;
use crate::types::Quote;
use crate::QuoteSource;

/// Builder for `MockQuoteSource`.
pub struct MockQuoteSourceBuilder {
    quotes: Vec<(String, f64)>,
    failures: Vec<String>,
}

impl MockQuoteSourceBuilder {
    /// Configure a quote. The price is not validated, so tests can configure
    /// zero or negative prices to exercise rejection paths downstream.
    pub fn with_quote(mut self, symbol: &str, price: f64) -> Self {
        self.quotes.push((symbol.to_string(), price));
        self
    }

    /// Configure a symbol to fail with `FeedError::NoQuote`.
    pub fn with_failure(mut self, symbol: &str) -> Self {
        self.failures.push(symbol.to_string());
        self
    }

    pub fn build(self) -> MockQuoteSource {
        MockQuoteSource {
            quotes: self.quotes,
            failures: self.failures,
            requests: Mutex::new(Vec::new()),
        }
    }
}

/// A mock quote source that records lookups and returns configured responses.
pub struct MockQuoteSource {
    quotes: Vec<(String, f64)>,
    failures: Vec<String>,
    requests: Mutex<Vec<String>>,
}

impl MockQuoteSource {
    pub fn builder() -> MockQuoteSourceBuilder {
        MockQuoteSourceBuilder {
            quotes: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Get all symbols that were looked up (for assertion in tests).
    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl QuoteSource for MockQuoteSource {
    fn latest(&self, symbol: &str) -> Result<Quote, FeedError> {
        self.requests.lock().unwrap().push(symbol.to_string());

        if self.failures.iter().any(|s| s == symbol) {
            return Err(FeedError::NoQuote(symbol.to_string()));
        }

        self.quotes
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(s, p)| Quote {
                symbol: s.clone(),
                price: *p,
                as_of: Utc::now(),
            })
            .ok_or_else(|| FeedError::NoQuote(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_basic() {
        let feed = MockQuoteSource::builder()
            .with_quote("VTI", 220.50)
            .with_quote("BND", 72.10)
            .build();

        let quote = feed.latest("VTI").unwrap();
        assert_eq!(quote.symbol, "VTI");
        assert_eq!(quote.price, 220.50);

        let quote = feed.latest("BND").unwrap();
        assert_eq!(quote.price, 72.10);
    }

    #[test]
    fn unknown_symbol_errors() {
        let feed = MockQuoteSource::builder().build();
        assert!(matches!(feed.latest("VTI"), Err(FeedError::NoQuote(_))));
    }

    #[test]
    fn configured_failure() {
        let feed = MockQuoteSource::builder()
            .with_quote("VXUS", 60.0)
            .with_failure("VXUS")
            .build();

        assert!(feed.latest("VXUS").is_err());
    }

    #[test]
    fn records_lookups() {
        let feed = MockQuoteSource::builder().with_quote("VTI", 220.0).build();

        let _ = feed.latest("VTI");
        let _ = feed.latest("BND");

        assert_eq!(feed.requested(), vec!["VTI".to_string(), "BND".to_string()]);
    }

    #[test]
    fn bad_price_passes_through() {
        // The mock does not validate prices; consumers do.
        let feed = MockQuoteSource::builder().with_quote("VNQ", -1.0).build();
        assert_eq!(feed.latest("VNQ").unwrap().price, -1.0);
    }
}
