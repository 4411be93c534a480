//! CLI entry point for ballast.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use ballast::config::Config;
use ballast::error::Error;
use ballast::run::{self, RunOptions};
use ballast_feed::yahoo::YahooClient;

#[derive(Parser)]
#[command(name = "ballast")]
#[command(about = "Cash-constrained lazy rebalancer for ETF portfolios")]
#[command(version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Cash to add for this run (default 0)
    #[arg(long, default_value_t = 0.0)]
    cash: f64,

    /// Set the exact cash balance and exit; no pricing or planning happens
    #[arg(long, value_name = "AMOUNT")]
    set_cash: Option<f64>,

    /// Show the plan without modifying the portfolio
    #[arg(long)]
    dry_run: bool,

    /// Skip confirmation prompt (for automation/cron)
    #[arg(long)]
    force: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            process::exit(1);
        }
    };

    let result = match cli.set_cash {
        Some(amount) => run::set_cash(&config, amount),
        None => {
            let feed = match build_feed(&config) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
            let opts = RunOptions {
                cash: cli.cash,
                dry_run: cli.dry_run,
                force: cli.force,
            };
            run::run(&config, &feed, &opts)
        }
    };

    if let Err(e) = result {
        match &e {
            Error::Aborted(msg) => {
                eprintln!("{msg}");
                process::exit(0);
            }
            _ => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

/// Build the Yahoo quote client from the feed config.
fn build_feed(config: &Config) -> Result<YahooClient, Error> {
    let timeout = config.feed_timeout();
    let client = match &config.feed.base_url {
        Some(url) => YahooClient::with_base_url(url, timeout),
        None => YahooClient::new(timeout),
    };
    client.map_err(|e| Error::Feed(e.to_string()))
}
