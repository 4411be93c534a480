//! # ballast
//!
//! A cash-constrained lazy rebalancer for ETF portfolios.
//!
//! Given target weights, current holdings, and live prices, ballast
//! computes how many additional whole shares of each fund to buy so the
//! allocation converges toward target without exceeding available cash.
//! It only ever buys: allocations converge lazily as new cash comes in,
//! and nothing is sold to rebalance.
//!
//! ## Quick Start
//!
//! ```
//! use ballast::{compute_plan, Portfolio, PriceSnapshot, Ticker};
//!
//! let portfolio = Portfolio::new(1000.0);
//!
//! let mut prices = PriceSnapshot::new();
//! prices.insert(Ticker::new("VTI"), 100.0).unwrap();
//! prices.insert(Ticker::new("BND"), 50.0).unwrap();
//!
//! let targets = [(Ticker::new("VTI"), 0.6), (Ticker::new("BND"), 0.4)];
//! let plan = compute_plan(&portfolio, &targets, &prices);
//!
//! assert_eq!(plan.get(&Ticker::new("VTI")).unwrap().shares, 6);
//! assert_eq!(plan.get(&Ticker::new("BND")).unwrap().shares, 8);
//! assert_eq!(plan.total_cost(), 1000.0);
//! ```
//!
//! ## Planning Policy
//!
//! - Target weights are applied as given; they are not normalized and
//!   need not sum to 1. A sum below 1 deliberately leaves value in cash.
//! - Purchases are floored to whole shares, so a plan never overshoots a
//!   fund's target value.
//! - When cash cannot cover the full plan, funds are re-derived against
//!   the remaining budget in descending price order (ties break on
//!   ticker). High-price funds are funded first when cash is scarce and
//!   cheaper funds can starve. This is an explicit policy choice, not an
//!   optimizer.

pub mod audit;
pub mod config;
pub mod error;
pub mod planner;
pub mod portfolio;
pub mod report;
pub mod run;
pub mod ticker;

// Re-export public API
pub use error::{Error, Result};
pub use planner::{Plan, PlanEntry, PriceSnapshot, compute_plan};
pub use portfolio::{Holding, Portfolio};
pub use ticker::Ticker;
