//! Yahoo Finance quote source.
//!
//! Fetches the latest trade price for a symbol from the public v8 chart
//! endpoint. Blocking (sync) via reqwest::blocking.

pub mod client;
pub mod types;

pub use client::YahooClient;
