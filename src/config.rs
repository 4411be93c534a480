//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ticker::Ticker;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Target allocation, one entry per fund. Weights are applied as given:
    /// they are not normalized and need not sum to 1. A sum below 1 leaves
    /// the remainder in cash; a sum above 1 is limited only by available
    /// cash at planning time.
    pub funds: Vec<FundConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    #[serde(default = "default_portfolio_file")]
    pub file: String,
}

fn default_portfolio_file() -> String {
    "portfolio.json".into()
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            file: default_portfolio_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Override the quote endpoint (used by tests and mirrors).
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

/// One configured fund: ticker symbol + target weight.
#[derive(Debug, Clone, Deserialize)]
pub struct FundConfig {
    pub symbol: String,
    pub weight: f64,
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.funds.is_empty() {
            return Err(Error::Config("funds list is empty".into()));
        }

        let mut seen = std::collections::HashSet::new();
        for fund in &self.funds {
            if fund.symbol.is_empty() {
                return Err(Error::Config("empty fund symbol".into()));
            }
            if !seen.insert(&fund.symbol) {
                return Err(Error::Config(format!(
                    "duplicate fund symbol: {}",
                    fund.symbol
                )));
            }
            if !fund.weight.is_finite() || fund.weight <= 0.0 || fund.weight > 1.0 {
                return Err(Error::Config(format!(
                    "weight for {} ({}) must be in (0.0, 1.0]",
                    fund.symbol, fund.weight
                )));
            }
        }

        if self.feed.timeout_secs == 0 {
            return Err(Error::Config("feed timeout_secs must be > 0".into()));
        }

        Ok(())
    }

    /// Path to the persisted portfolio file.
    pub fn portfolio_path(&self) -> PathBuf {
        PathBuf::from(&self.portfolio.file)
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }

    /// Configured fund tickers, in config order.
    pub fn tickers(&self) -> Vec<Ticker> {
        self.funds.iter().map(|f| Ticker::new(&f.symbol)).collect()
    }

    /// (Ticker, weight) pairs for the planner, in config order.
    pub fn target_weights(&self) -> Vec<(Ticker, f64)> {
        self.funds
            .iter()
            .map(|f| (Ticker::new(&f.symbol), f.weight))
            .collect()
    }

    /// Quote request timeout.
    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed.timeout_secs)
    }
}
