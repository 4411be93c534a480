//! Run orchestrator: load → price → plan → confirm → apply → save.
//!
//! This is the main workflow that ties together all components. A run
//! either completes and persists, or fails before any mutation; the
//! portfolio file is never left half-written.

use log::{debug, info, warn};

use ballast_feed::QuoteSource;

use crate::audit::{self, AuditLog};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::planner::{self, Plan, PriceSnapshot};
use crate::portfolio::Portfolio;
use crate::report;
use crate::ticker::Ticker;

/// Options for a rebalance run.
pub struct RunOptions {
    /// New cash to add before planning.
    pub cash: f64,
    /// Show the plan without mutating state.
    pub dry_run: bool,
    /// Skip the confirmation prompt (for automation/cron).
    pub force: bool,
}

/// Execute a full rebalance run.
pub fn run(config: &Config, feed: &dyn QuoteSource, opts: &RunOptions) -> Result<()> {
    // The JSON store cannot hold a non-finite balance; reject before any
    // file is opened.
    if !opts.cash.is_finite() {
        return Err(Error::BadCash(opts.cash));
    }

    // 1. Open audit log
    let mut audit = AuditLog::open(&config.audit_path())?;
    audit::log_run_started(&mut audit, opts.cash, &config.portfolio.file)?;

    // 2. Load portfolio state, crediting new cash
    let funds = config.tickers();
    let mut portfolio = Portfolio::load(&config.portfolio_path(), &funds, opts.cash)?;

    // 3. Fetch prices; a failed fund is skipped, not fatal
    let (prices, skipped) = fetch_prices(feed, &funds);
    audit::log_prices(&mut audit, &prices, &skipped)?;

    if prices.is_empty() {
        audit.log_simple("no_prices")?;
        return Err(Error::NoPrices);
    }
    info!("Priced {}/{} funds", prices.len(), funds.len());

    let unpriced = portfolio
        .holdings
        .keys()
        .filter(|t| prices.get(t).is_none())
        .count();
    if unpriced > 0 {
        debug!("{unpriced} holding(s) have no price and are excluded from total value");
    }

    // 4. Compute the plan
    let targets = config.target_weights();
    let plan = planner::compute_plan(&portfolio, &targets, &prices);
    audit::log_plan(&mut audit, &plan)?;

    // 5. Display state and plan
    display_portfolio(&portfolio, &prices);
    display_plan(&plan);

    let total_cost = plan.total_cost();
    println!("\nTotal cost: ${total_cost:.2}");
    println!(
        "Remaining cash: ${:.2}",
        portfolio.cash_available - total_cost
    );

    // 6. Dry run stops here
    if opts.dry_run {
        println!("\n[DRY RUN] Portfolio not modified.");
        return Ok(());
    }

    // 7. Confirm purchases
    if plan.has_purchases() && !opts.force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt("Apply this plan?")
            .default(false)
            .interact()
            .map_err(|e| Error::Aborted(format!("confirmation prompt failed: {e}")))?;

        if !confirmed {
            println!("Aborted.");
            audit.log("run_aborted", serde_json::json!({"reason": "user_declined"}))?;
            return Ok(());
        }

        audit.log("user_confirmed", serde_json::json!({"approved": true}))?;
    }

    // 8. Apply and persist
    portfolio.apply(&plan);
    portfolio.save(&config.portfolio_path())?;
    audit::log_applied(&mut audit, total_cost, portfolio.cash_available)?;

    // 9. Allocation after the run
    let report = report::allocation_report(&portfolio, &targets, &prices);
    print!("\n{report}");

    audit::log_run_completed(&mut audit, plan.purchases().count(), total_cost)?;
    Ok(())
}

/// Overwrite the stored cash balance. No pricing, no planning.
pub fn set_cash(config: &Config, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::BadCash(amount));
    }

    let mut audit = AuditLog::open(&config.audit_path())?;

    let funds = config.tickers();
    let mut portfolio = Portfolio::load(&config.portfolio_path(), &funds, 0.0)?;
    portfolio.cash_available = amount;
    portfolio.save(&config.portfolio_path())?;

    audit::log_cash_set(&mut audit, amount)?;
    println!("Cash set to: ${amount:.2}");
    Ok(())
}

/// Fetch a quote for every fund, collecting skip reasons for the audit
/// trail. One fund failing never aborts the others.
fn fetch_prices(feed: &dyn QuoteSource, funds: &[Ticker]) -> (PriceSnapshot, Vec<(Ticker, String)>) {
    let mut prices = PriceSnapshot::new();
    let mut skipped = Vec::new();

    for fund in funds {
        match feed.latest(fund.as_str()) {
            Ok(quote) => {
                if let Err(e) = prices.insert(fund.clone(), quote.price) {
                    warn!("Skipping {fund}: {e}");
                    skipped.push((fund.clone(), e.to_string()));
                }
            }
            Err(e) => {
                warn!("Error fetching price for {fund}: {e}");
                skipped.push((fund.clone(), e.to_string()));
            }
        }
    }

    (prices, skipped)
}

// === Display helpers ===

fn display_portfolio(portfolio: &Portfolio, prices: &PriceSnapshot) {
    let total = portfolio.total_value(prices);

    println!("CURRENT PORTFOLIO:");
    let mut tickers: Vec<&Ticker> = portfolio.holdings.keys().collect();
    tickers.sort();
    for ticker in tickers {
        let shares = portfolio.shares(ticker);
        match prices.get(ticker) {
            Some(price) => {
                let value = shares * price;
                let weight = if total > 0.0 { value / total * 100.0 } else { 0.0 };
                println!(
                    "  {:8} {:>10.3} @ ${:>8.2} = ${:>10.2}  ({:.1}%)",
                    ticker, shares, price, value, weight,
                );
            }
            None => println!("  {ticker:8} {shares:>10.3}   (no price)"),
        }
    }
    println!("  Cash: ${:.2}", portfolio.cash_available);
}

fn display_plan(plan: &Plan) {
    if !plan.has_purchases() {
        println!("\nNo purchases this run.");
        return;
    }

    println!("\nREBALANCE PLAN:");
    println!(
        "  {:>3}  {:8} {:>8} {:>10} {:>12}",
        "#", "Fund", "Shares", "Price", "Cost"
    );
    for (i, entry) in plan.purchases().enumerate() {
        println!(
            "  {:>3}  {:8} {:>8} ${:>9.2} ${:>11.2}",
            i + 1,
            entry.ticker,
            entry.shares,
            entry.price,
            entry.cost,
        );
    }
}
