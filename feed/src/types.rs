//! Shared feed types.

use chrono::{DateTime, Utc};

/// The latest known trade price for one symbol.
#[derive(Debug, Clone)]
pub struct Quote {
    pub symbol: String,
    /// Latest trade price in the fund's trading currency.
    pub price: f64,
    /// When the feed says the price was observed.
    pub as_of: DateTime<Utc>,
}
