//! Error types for ballast.

use std::path::PathBuf;

/// All errors that can occur during a rebalancing run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read portfolio file {path}: {source}")]
    PortfolioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse portfolio file {path}: {source}")]
    PortfolioParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write portfolio file {path}: {source}")]
    PortfolioWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad price for {ticker}: {price}")]
    BadPrice { ticker: String, price: f64 },

    #[error("cash amount must be finite, got {0}")]
    BadCash(f64),

    #[error("no prices available for any configured fund")]
    NoPrices,

    #[error("feed error: {0}")]
    Feed(String),

    #[error("run aborted: {0}")]
    Aborted(String),

    #[error("audit log error: {0}")]
    Audit(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
