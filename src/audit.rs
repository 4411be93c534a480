//! JSONL audit trail logging.
//!
//! Each run appends events to an audit.jsonl file, one JSON object per
//! line. The trail records what was fetched, planned, and applied, so a
//! portfolio file can always be explained after the fact.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::planner::{Plan, PriceSnapshot};
use crate::ticker::Ticker;

/// An audit event written to the JSONL trail.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub event: &'static str,
    pub ts: DateTime<Utc>,
    #[serde(flatten)]
    pub data: serde_json::Value,
}

/// Append-only audit logger.
pub struct AuditLog {
    writer: BufWriter<std::fs::File>,
}

impl AuditLog {
    /// Open (or create) the audit log file for appending.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Log an event with arbitrary JSON data.
    pub fn log(&mut self, event: &'static str, data: serde_json::Value) -> Result<()> {
        let entry = AuditEvent {
            event,
            ts: Utc::now(),
            data,
        };
        let json = serde_json::to_string(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Log a simple event with no additional data.
    pub fn log_simple(&mut self, event: &'static str) -> Result<()> {
        self.log(event, serde_json::json!({}))
    }
}

/// Convenience: log a run start event.
pub fn log_run_started(audit: &mut AuditLog, cash_added: f64, portfolio_file: &str) -> Result<()> {
    audit.log(
        "run_started",
        serde_json::json!({
            "cash_added": cash_added,
            "portfolio_file": portfolio_file,
        }),
    )
}

/// Convenience: log fetched prices, including funds that were skipped.
pub fn log_prices(
    audit: &mut AuditLog,
    prices: &PriceSnapshot,
    skipped: &[(Ticker, String)],
) -> Result<()> {
    let price_data: Vec<_> = prices
        .tickers()
        .iter()
        .filter_map(|t| {
            prices.get(t).map(|p| {
                serde_json::json!({
                    "symbol": t.as_str(),
                    "price": p,
                })
            })
        })
        .collect();

    let skipped_data: Vec<_> = skipped
        .iter()
        .map(|(t, reason)| {
            serde_json::json!({
                "symbol": t.as_str(),
                "reason": reason,
            })
        })
        .collect();

    audit.log(
        "prices_fetched",
        serde_json::json!({
            "prices": price_data,
            "skipped": skipped_data,
        }),
    )
}

/// Convenience: log the computed plan.
pub fn log_plan(audit: &mut AuditLog, plan: &Plan) -> Result<()> {
    let entry_data: Vec<_> = plan
        .entries
        .iter()
        .map(|e| {
            serde_json::json!({
                "symbol": e.ticker.as_str(),
                "shares": e.shares,
                "price": e.price,
                "cost": e.cost,
            })
        })
        .collect();

    audit.log(
        "plan_computed",
        serde_json::json!({
            "entries": entry_data,
            "total_cost": plan.total_cost(),
        }),
    )
}

/// Convenience: log that a plan was applied and persisted.
pub fn log_applied(audit: &mut AuditLog, total_cost: f64, remaining_cash: f64) -> Result<()> {
    audit.log(
        "plan_applied",
        serde_json::json!({
            "total_cost": total_cost,
            "remaining_cash": remaining_cash,
        }),
    )
}

/// Convenience: log a cash override.
pub fn log_cash_set(audit: &mut AuditLog, amount: f64) -> Result<()> {
    audit.log("cash_set", serde_json::json!({ "amount": amount }))
}

/// Convenience: log run completion.
pub fn log_run_completed(audit: &mut AuditLog, purchases: usize, total_cost: f64) -> Result<()> {
    audit.log(
        "run_completed",
        serde_json::json!({
            "purchases": purchases,
            "total_cost": total_cost,
        }),
    )
}
