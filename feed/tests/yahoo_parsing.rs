//! Tests for Yahoo chart API response parsing — no live connection needed.

use std::time::Duration;

use ballast_feed::yahoo::types::{ChartMeta, ChartResponse};
use ballast_feed::yahoo::YahooClient;

// ============================================================================
// Chart response parsing
// ============================================================================

#[test]
fn parse_chart_full() {
    let json = r#"{
        "chart": {
            "result": [
                {
                    "meta": {
                        "currency": "USD",
                        "symbol": "VTI",
                        "exchangeName": "PCX",
                        "instrumentType": "ETF",
                        "regularMarketPrice": 271.82,
                        "regularMarketTime": 1724249100,
                        "chartPreviousClose": 270.95,
                        "priceHint": 2
                    },
                    "timestamp": [1724249100],
                    "indicators": { "quote": [{ "close": [271.82] }] }
                }
            ],
            "error": null
        }
    }"#;

    let resp: ChartResponse = serde_json::from_str(json).unwrap();
    let results = resp.chart.result.unwrap();
    assert_eq!(results.len(), 1);

    let meta = &results[0].meta;
    assert_eq!(meta.symbol, "VTI");
    assert_eq!(meta.currency.as_deref(), Some("USD"));
    assert_eq!(meta.regular_market_price, Some(271.82));
    assert_eq!(meta.regular_market_time, Some(1_724_249_100));
    assert!(resp.chart.error.is_none());
}

#[test]
fn parse_chart_error_body() {
    // Shape returned for unknown or delisted symbols
    let json = r#"{
        "chart": {
            "result": null,
            "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }
        }
    }"#;

    let resp: ChartResponse = serde_json::from_str(json).unwrap();
    assert!(resp.chart.result.is_none());

    let err = resp.chart.error.unwrap();
    assert_eq!(err.code, "Not Found");
    assert_eq!(err.description, "No data found, symbol may be delisted");
}

#[test]
fn parse_chart_missing_price() {
    let json = r#"{
        "chart": {
            "result": [
                { "meta": { "symbol": "VTI", "currency": "USD" } }
            ],
            "error": null
        }
    }"#;

    let resp: ChartResponse = serde_json::from_str(json).unwrap();
    let results = resp.chart.result.unwrap();
    assert_eq!(results[0].meta.regular_market_price, None);
    assert_eq!(results[0].meta.regular_market_time, None);
}

#[test]
fn parse_chart_empty_result_list() {
    let json = r#"{ "chart": { "result": [], "error": null } }"#;
    let resp: ChartResponse = serde_json::from_str(json).unwrap();
    assert!(resp.chart.result.unwrap().is_empty());
}

#[test]
fn parse_meta_extra_fields_ignored() {
    let json = r#"{
        "currency": "USD",
        "symbol": "BND",
        "regularMarketPrice": 72.10,
        "fullExchangeName": "NasdaqGM",
        "hasPrePostMarketData": true,
        "validRanges": ["1d", "5d", "1mo"]
    }"#;

    let meta: ChartMeta = serde_json::from_str(json).unwrap();
    assert_eq!(meta.symbol, "BND");
    assert_eq!(meta.regular_market_price, Some(72.10));
}

// ============================================================================
// Error cases — malformed JSON
// ============================================================================

#[test]
fn reject_missing_chart_key() {
    assert!(serde_json::from_str::<ChartResponse>("{}").is_err());
}

#[test]
fn reject_missing_symbol() {
    let json = r#"{ "regularMarketPrice": 100.0 }"#;
    assert!(serde_json::from_str::<ChartMeta>(json).is_err());
}

#[test]
fn reject_wrong_type_price() {
    let json = r#"{ "symbol": "VTI", "regularMarketPrice": "not_a_number" }"#;
    assert!(serde_json::from_str::<ChartMeta>(json).is_err());
}

// ============================================================================
// YahooClient construction (no connection)
// ============================================================================

#[test]
fn client_constructs() {
    assert!(YahooClient::new(Duration::from_secs(10)).is_ok());
    assert!(YahooClient::with_base_url("http://localhost:9999/", Duration::from_secs(1)).is_ok());
}
