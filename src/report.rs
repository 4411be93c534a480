//! Allocation report: actual weights vs target after a run.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::planner::PriceSnapshot;
use crate::portfolio::Portfolio;
use crate::ticker::Ticker;

/// Allocation report comparing actual weights against target weights.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationReport {
    pub entries: Vec<AllocationEntry>,
    pub cash_available: f64,
    pub total_value: f64,
}

/// One fund's allocation entry.
#[derive(Debug, Clone, Serialize)]
pub struct AllocationEntry {
    pub ticker: String,
    pub target_weight: f64,
    pub actual_weight: f64,
    pub drift: f64,
    pub shares: f64,
    pub market_value: f64,
}

/// Compare the portfolio's actual allocation against target weights.
///
/// Covers the union of target funds and priced holdings, so legacy
/// holdings show up with a zero target. Unpriced holdings cannot be
/// valued and are omitted.
pub fn allocation_report(
    portfolio: &Portfolio,
    targets: &[(Ticker, f64)],
    prices: &PriceSnapshot,
) -> AllocationReport {
    let target_map: FxHashMap<&Ticker, f64> = targets.iter().map(|(t, w)| (t, *w)).collect();
    let total_value = portfolio.total_value(prices);

    let mut all_tickers: Vec<Ticker> = targets.iter().map(|(t, _)| t.clone()).collect();
    for ticker in portfolio.holdings.keys() {
        if !target_map.contains_key(ticker) && prices.get(ticker).is_some() {
            all_tickers.push(ticker.clone());
        }
    }
    all_tickers.sort();
    all_tickers.dedup();

    let mut entries = Vec::with_capacity(all_tickers.len());
    for ticker in &all_tickers {
        let shares = portfolio.shares(ticker);
        let market_value = prices.get(ticker).map_or(0.0, |p| shares * p);
        let actual_weight = if total_value > 0.0 {
            market_value / total_value
        } else {
            0.0
        };
        let target_weight = target_map.get(ticker).copied().unwrap_or(0.0);

        entries.push(AllocationEntry {
            ticker: ticker.to_string(),
            target_weight,
            actual_weight,
            drift: actual_weight - target_weight,
            shares,
            market_value,
        });
    }

    AllocationReport {
        entries,
        cash_available: portfolio.cash_available,
        total_value,
    }
}

impl std::fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ALLOCATION:")?;
        writeln!(
            f,
            "  {:8} {:>10} {:>10} {:>10} {:>10} {:>12}",
            "Fund", "Target%", "Actual%", "Drift%", "Shares", "Value"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "  {:8} {:>9.2}% {:>9.2}% {:>+9.2}% {:>10.3} ${:>11.2}",
                e.ticker,
                e.target_weight * 100.0,
                e.actual_weight * 100.0,
                e.drift * 100.0,
                e.shares,
                e.market_value,
            )?;
        }
        writeln!(
            f,
            "\n  Cash: ${:.2}  Total value: ${:.2}",
            self.cash_available, self.total_value
        )?;
        Ok(())
    }
}
