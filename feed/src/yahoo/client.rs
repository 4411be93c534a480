//! Yahoo Finance REST API client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use reqwest::blocking::Client;

use super::types::{Chart, ChartResponse};
use crate::error::FeedError;
use crate::types::Quote;
use crate::QuoteSource;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) ballast/0.1";

/// Blocking Yahoo Finance chart client.
pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    /// Create a client against the public Yahoo endpoint.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client against a custom base URL (used by tests and mirrors).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Http(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the latest daily chart for `symbol` (GET /v8/finance/chart/{symbol}).
    fn chart(&self, symbol: &str) -> Result<ChartResponse, FeedError> {
        let url = format!(
            "{}/v8/finance/chart/{symbol}?interval=1d&range=1d",
            self.base_url
        );

        debug!("Fetching quote: {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FeedError::Http(format!("chart request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_default();
            return Err(FeedError::Http(format!("chart returned {status}: {body}")));
        }

        resp.json::<ChartResponse>()
            .map_err(|e| FeedError::Parse(format!("failed to parse chart: {e}")))
    }
}

impl QuoteSource for YahooClient {
    fn latest(&self, symbol: &str) -> Result<Quote, FeedError> {
        quote_from_chart(symbol, self.chart(symbol)?.chart)
    }
}

/// Extract a validated quote from a chart payload.
fn quote_from_chart(symbol: &str, chart: Chart) -> Result<Quote, FeedError> {
    if let Some(err) = chart.error {
        return Err(FeedError::NoQuote(format!(
            "{symbol}: {} ({})",
            err.description, err.code
        )));
    }

    let meta = chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0).meta)
            }
        })
        .ok_or_else(|| FeedError::NoQuote(symbol.to_string()))?;

    let price = meta
        .regular_market_price
        .ok_or_else(|| FeedError::NoQuote(symbol.to_string()))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(FeedError::BadPrice {
            symbol: symbol.to_string(),
            price,
        });
    }

    let as_of = meta
        .regular_market_time
        .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
        .unwrap_or_else(Utc::now);

    Ok(Quote {
        symbol: meta.symbol,
        price,
        as_of,
    })
}
