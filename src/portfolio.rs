//! Portfolio state and JSON persistence.
//!
//! The persisted file is a single JSON object with a `holdings` mapping
//! (ticker → share count) and a `cash_available` balance. Saves are full
//! overwrites; there is no partial-write or append mode.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::planner::{Plan, PriceSnapshot};
use crate::ticker::Ticker;

/// Serde helper for `FxHashMap<Ticker, Holding>` — serializes as a JSON
/// object in sorted ticker order.
mod serde_holdings {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use super::{FxHashMap, Holding, Ticker};

    pub fn serialize<S: Serializer>(
        map: &FxHashMap<Ticker, Holding>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let sorted: BTreeMap<&Ticker, &Holding> = map.iter().collect();
        serializer.collect_map(sorted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FxHashMap<Ticker, Holding>, D::Error> {
        let map: BTreeMap<Ticker, Holding> = BTreeMap::deserialize(deserializer)?;
        Ok(map.into_iter().collect())
    }
}

/// A single holding. Share counts may be fractional (dividend reinvestment,
/// transfers in); planned purchases are always whole shares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub shares: f64,
}

/// Portfolio state: holdings plus uninvested cash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(
        serialize_with = "serde_holdings::serialize",
        deserialize_with = "serde_holdings::deserialize"
    )]
    pub holdings: FxHashMap<Ticker, Holding>,
    pub cash_available: f64,
}

impl Portfolio {
    /// Create an empty portfolio with the given starting cash.
    pub fn new(initial_cash: f64) -> Self {
        Self {
            holdings: FxHashMap::default(),
            cash_available: initial_cash,
        }
    }

    // === Queries ===

    /// Shares held of `ticker` (zero when absent).
    pub fn shares(&self, ticker: &Ticker) -> f64 {
        self.holdings.get(ticker).map_or(0.0, |h| h.shares)
    }

    /// Market value of priced holdings, summed in ticker order.
    ///
    /// Holdings without a price in the snapshot contribute nothing.
    pub fn market_value(&self, prices: &PriceSnapshot) -> f64 {
        let mut priced: Vec<(&Ticker, f64)> = self
            .holdings
            .iter()
            .filter_map(|(t, h)| prices.get(t).map(|p| (t, h.shares * p)))
            .collect();
        priced.sort_by(|a, b| a.0.cmp(b.0));
        priced.iter().map(|(_, v)| v).sum()
    }

    /// Market value plus cash.
    pub fn total_value(&self, prices: &PriceSnapshot) -> f64 {
        self.market_value(prices) + self.cash_available
    }

    // === Mutation ===

    /// Apply a buy plan: credit planned shares, debit the plan's total cost.
    ///
    /// The debit is exactly `plan.total_cost()` — the same value reported
    /// to the user and written to the audit trail.
    pub fn apply(&mut self, plan: &Plan) {
        for entry in &plan.entries {
            let holding = self
                .holdings
                .entry(entry.ticker.clone())
                .or_insert(Holding { shares: 0.0 });
            holding.shares += entry.shares as f64;
        }
        self.cash_available -= plan.total_cost();
    }

    // === Persistence ===

    /// Load portfolio state, crediting `initial_cash` on top of stored cash.
    ///
    /// A missing file yields a fresh portfolio with zero holdings for every
    /// fund in `funds` and cash equal to `initial_cash`. An existing
    /// portfolio gains zero-share entries for funds it has not seen before;
    /// holdings for funds no longer configured are kept untouched.
    pub fn load(path: &Path, funds: &[Ticker], initial_cash: f64) -> Result<Self> {
        if !path.exists() {
            let mut portfolio = Portfolio::new(initial_cash);
            for fund in funds {
                portfolio
                    .holdings
                    .insert(fund.clone(), Holding { shares: 0.0 });
            }
            return Ok(portfolio);
        }

        let contents = std::fs::read_to_string(path).map_err(|e| Error::PortfolioRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut portfolio: Portfolio =
            serde_json::from_str(&contents).map_err(|e| Error::PortfolioParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        portfolio.cash_available += initial_cash;

        for fund in funds {
            portfolio
                .holdings
                .entry(fund.clone())
                .or_insert(Holding { shares: 0.0 });
        }

        Ok(portfolio)
    }

    /// Write portfolio state as pretty-printed JSON (full overwrite).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| Error::PortfolioWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| Error::PortfolioWrite {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?;
        std::fs::write(path, json).map_err(|e| Error::PortfolioWrite {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::PlanEntry;

    fn tickers(symbols: &[&str]) -> Vec<Ticker> {
        symbols.iter().map(|s| Ticker::new(s)).collect()
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        let mut portfolio = Portfolio::new(1234.56);
        portfolio
            .holdings
            .insert(Ticker::new("VTI"), Holding { shares: 12.0 });
        portfolio
            .holdings
            .insert(Ticker::new("BND"), Holding { shares: 3.141 });

        portfolio.save(&path).unwrap();
        let loaded = Portfolio::load(&path, &tickers(&["VTI", "BND"]), 0.0).unwrap();

        assert_eq!(loaded.cash_available, 1234.56);
        assert_eq!(loaded.shares(&Ticker::new("VTI")), 12.0);
        assert_eq!(loaded.shares(&Ticker::new("BND")), 3.141);
    }

    #[test]
    fn json_shape_is_sorted_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        let mut portfolio = Portfolio::new(100.0);
        portfolio
            .holdings
            .insert(Ticker::new("VTI"), Holding { shares: 1.0 });
        portfolio
            .holdings
            .insert(Ticker::new("BND"), Holding { shares: 2.0 });
        portfolio.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"holdings\""));
        assert!(contents.contains("\"cash_available\""));
        assert!(contents.contains("\"shares\""));
        // BND serializes before VTI
        let bnd = contents.find("BND").unwrap();
        let vti = contents.find("VTI").unwrap();
        assert!(bnd < vti);
    }

    #[test]
    fn load_missing_file_creates_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let portfolio = Portfolio::load(&path, &tickers(&["VTI", "BND"]), 500.0).unwrap();
        assert_eq!(portfolio.cash_available, 500.0);
        assert_eq!(portfolio.holdings.len(), 2);
        assert_eq!(portfolio.shares(&Ticker::new("VTI")), 0.0);
        assert!(!path.exists());
    }

    #[test]
    fn load_adds_cash_to_stored_balance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        Portfolio::new(200.0).save(&path).unwrap();
        let loaded = Portfolio::load(&path, &[], 50.0).unwrap();
        assert_eq!(loaded.cash_available, 250.0);
    }

    #[test]
    fn load_backfills_newly_configured_fund() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        let mut portfolio = Portfolio::new(0.0);
        portfolio
            .holdings
            .insert(Ticker::new("VTI"), Holding { shares: 4.0 });
        portfolio.save(&path).unwrap();

        let loaded = Portfolio::load(&path, &tickers(&["VTI", "VNQ"]), 0.0).unwrap();
        assert_eq!(loaded.shares(&Ticker::new("VTI")), 4.0);
        assert_eq!(loaded.shares(&Ticker::new("VNQ")), 0.0);
    }

    #[test]
    fn load_preserves_unconfigured_fund() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");

        let mut portfolio = Portfolio::new(0.0);
        portfolio
            .holdings
            .insert(Ticker::new("GLD"), Holding { shares: 7.5 });
        portfolio.save(&path).unwrap();

        // GLD is no longer in the config but its shares survive the reload.
        let loaded = Portfolio::load(&path, &tickers(&["VTI"]), 0.0).unwrap();
        assert_eq!(loaded.shares(&Ticker::new("GLD")), 7.5);
    }

    #[test]
    fn corrupt_file_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.json");
        std::fs::write(&path, "not json{").unwrap();

        let err = Portfolio::load(&path, &[], 0.0).unwrap_err();
        assert!(matches!(err, Error::PortfolioParse { .. }));
        assert!(err.to_string().contains("portfolio.json"), "{err}");
    }

    #[test]
    fn apply_credits_shares_and_debits_cost() {
        let mut portfolio = Portfolio::new(1000.0);
        portfolio
            .holdings
            .insert(Ticker::new("VTI"), Holding { shares: 2.0 });

        let plan = Plan {
            entries: vec![
                PlanEntry {
                    ticker: Ticker::new("VTI"),
                    shares: 3,
                    price: 100.0,
                    cost: 300.0,
                },
                PlanEntry {
                    ticker: Ticker::new("BND"),
                    shares: 4,
                    price: 50.0,
                    cost: 200.0,
                },
            ],
        };

        portfolio.apply(&plan);
        assert_eq!(portfolio.shares(&Ticker::new("VTI")), 5.0);
        assert_eq!(portfolio.shares(&Ticker::new("BND")), 4.0);
        assert_eq!(portfolio.cash_available, 500.0);
    }

    #[test]
    fn market_value_skips_unpriced_holdings() {
        let mut portfolio = Portfolio::new(100.0);
        portfolio
            .holdings
            .insert(Ticker::new("VTI"), Holding { shares: 2.0 });
        portfolio
            .holdings
            .insert(Ticker::new("GLD"), Holding { shares: 10.0 });

        let mut prices = PriceSnapshot::new();
        prices.insert(Ticker::new("VTI"), 150.0).unwrap();

        assert_eq!(portfolio.market_value(&prices), 300.0);
        assert_eq!(portfolio.total_value(&prices), 400.0);
    }
}
