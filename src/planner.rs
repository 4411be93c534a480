//! Buy-plan computation: target values, whole-share sizing, cash trimming.
//!
//! The planner never sells. Each run it computes how many additional whole
//! shares of each configured fund to buy so the portfolio converges toward
//! its target weights, then trims the plan to fit available cash.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::portfolio::Portfolio;
use crate::ticker::Ticker;

use rustc_hash::FxHashMap;

/// Validated price snapshot for a single run.
///
/// Only finite, strictly positive prices are accepted; rejected funds are
/// simply absent, which excludes them from planning.
#[derive(Debug, Clone, Default)]
pub struct PriceSnapshot {
    prices: FxHashMap<Ticker, f64>,
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a price, rejecting non-finite and non-positive values.
    pub fn insert(&mut self, ticker: Ticker, price: f64) -> Result<()> {
        if !price.is_finite() || price <= 0.0 {
            return Err(Error::BadPrice {
                ticker: ticker.to_string(),
                price,
            });
        }
        self.prices.insert(ticker, price);
        Ok(())
    }

    pub fn get(&self, ticker: &Ticker) -> Option<f64> {
        self.prices.get(ticker).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Priced tickers in sorted order.
    pub fn tickers(&self) -> Vec<Ticker> {
        let mut tickers: Vec<Ticker> = self.prices.keys().cloned().collect();
        tickers.sort();
        tickers
    }
}

/// One planned purchase. `cost` is fixed at planning time and is the exact
/// amount later debited for this entry.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub ticker: Ticker,
    pub shares: u64,
    pub price: f64,
    pub cost: f64,
}

/// A buy plan: one entry per priced target fund, in target order.
///
/// Zero-share entries are kept so consumers can distinguish "at target"
/// from "not priced this run"; they cost nothing and are skipped by
/// [`Plan::purchases`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub entries: Vec<PlanEntry>,
}

impl Plan {
    /// Total cost of the plan, summed in entry order.
    ///
    /// This is the single authoritative cost figure: display, audit, and
    /// the cash debit all use it.
    pub fn total_cost(&self) -> f64 {
        self.entries.iter().map(|e| e.cost).sum()
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| &e.ticker == ticker)
    }

    /// Entries with a non-zero share count.
    pub fn purchases(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.shares > 0)
    }

    pub fn has_purchases(&self) -> bool {
        self.entries.iter().any(|e| e.shares > 0)
    }
}

/// Compute the buy plan for one run.
///
/// Total value is priced holdings plus cash. Each target fund's needed
/// value is `total × weight` minus its current value, floored to whole
/// shares at the fund's price; funds at or above target get zero. If the
/// combined cost exceeds available cash the plan is re-derived greedily,
/// most expensive fund first (ties break on ticker), so high-price funds
/// are funded before cheaper ones when cash is scarce.
///
/// Funds without a positive price in the snapshot get no entry at all.
pub fn compute_plan(
    portfolio: &Portfolio,
    targets: &[(Ticker, f64)],
    prices: &PriceSnapshot,
) -> Plan {
    let total_value = portfolio.total_value(prices);

    let mut entries = Vec::with_capacity(targets.len());
    for (ticker, weight) in targets {
        let price = match prices.get(ticker) {
            Some(p) if p > 0.0 => p,
            _ => continue,
        };

        let current_value = portfolio.shares(ticker) * price;
        let target_value = total_value * weight;
        let needed_value = (target_value - current_value).max(0.0);
        let shares = (needed_value / price).floor() as u64;

        entries.push(PlanEntry {
            ticker: ticker.clone(),
            shares,
            price,
            cost: shares as f64 * price,
        });
    }

    let mut plan = Plan { entries };

    if plan.total_cost() > portfolio.cash_available {
        trim_to_cash(&mut plan, portfolio.cash_available);
    }

    plan
}

/// Re-derive share counts against a running cash budget, most expensive
/// fund first. Ties break on ticker ascending so price ties cannot make
/// the outcome depend on input order.
fn trim_to_cash(plan: &mut Plan, cash_available: f64) {
    let mut order: Vec<usize> = (0..plan.entries.len()).collect();
    order.sort_by(|&a, &b| {
        let ea = &plan.entries[a];
        let eb = &plan.entries[b];
        eb.price
            .total_cmp(&ea.price)
            .then_with(|| ea.ticker.cmp(&eb.ticker))
    });

    let mut remaining = cash_available;
    for idx in order {
        let entry = &mut plan.entries[idx];
        let affordable = max_affordable(remaining, entry.price);
        entry.shares = entry.shares.min(affordable);
        entry.cost = entry.shares as f64 * entry.price;
        remaining -= entry.cost;
    }
}

/// Whole shares purchasable with `remaining` cash at `price`, guaranteeing
/// `shares × price ≤ remaining`.
fn max_affordable(remaining: f64, price: f64) -> u64 {
    if remaining <= 0.0 {
        return 0;
    }
    let mut shares = (remaining / price).floor() as u64;
    // Float division can land one share over the budget; step back if so.
    while shares > 0 && shares as f64 * price > remaining {
        shares -= 1;
    }
    shares
}
