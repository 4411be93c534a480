//! Yahoo chart API response types.
//!
//! Only the fields the feed reads are modeled; everything else in the
//! (large) chart payload is ignored.

use serde::Deserialize;

/// Top-level chart response envelope.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

/// Either a result list or an API error, never both populated.
#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// One symbol's chart result; the meta block carries the latest price.
#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
}

/// Chart metadata. `regular_market_price` is the latest trade price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<f64>,
    /// Unix seconds of the last trade.
    #[serde(default)]
    pub regular_market_time: Option<i64>,
}

/// Error body returned by the chart endpoint for unknown symbols.
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}
