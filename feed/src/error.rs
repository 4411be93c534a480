//! Feed error types.

/// Errors that can occur while fetching quotes.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request error: {0}")]
    Http(String),

    #[error("failed to parse quote response: {0}")]
    Parse(String),

    #[error("no quote available for {0}")]
    NoQuote(String),

    #[error("bad price for {symbol}: {price}")]
    BadPrice { symbol: String, price: f64 },
}
