//! cbr-rates CLI - exchange-rate report over a lookback window
//!
//! ## Example Usage
//!
//! ```bash
//! # Default 90-day report
//! cbr-rates
//!
//! # Last two weeks, JSON summary, fail if nothing was fetched
//! cbr-rates --days 14 --json --strict
//!
//! # Debug logging
//! RUST_LOG=cbr_rates=debug cbr-rates --days 3
//! ```

use anyhow::Context;
use cbr_rates::config::RunConfig;
use cbr_rates::data::CbrDailySource;
use cbr_rates::engine::{RateCollector, RunSummary};
use cbr_rates::report;
use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

/// cbr-rates: Central Bank of Russia exchange-rate statistics
#[derive(Parser)]
#[command(name = "cbr-rates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Average, maximum and minimum CBR exchange rates over recent days",
    long_about = None
)]
struct Cli {
    /// Number of days to look back, today included
    #[arg(short = 'd', long, default_value_t = cbr_rates::config::REPORT_DAYS)]
    days: usize,

    /// Pause between feed requests in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Feed host
    #[arg(long, default_value = cbr_rates::data::sources::cbr::CBR_BASE_URL)]
    base_url: String,

    /// Keep map order in the average-rate table instead of sorting by code
    #[arg(long)]
    unsorted: bool,

    /// Print the summary as JSON (progress goes to stderr)
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when no rates were collected
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            days: self.days,
            request_delay: Duration::from_millis(self.delay_ms),
            timeout: Duration::from_secs(self.timeout_secs),
            base_url: self.base_url.clone(),
            sort_by_code: !self.unsorted,
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.run_config();
    if let Err(e) = config.validate() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }

    if cli.verbose {
        eprintln!(
            "{} v{}",
            "cbr-rates".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        eprintln!(
            "Feed: {}  days: {}  delay: {:?}  timeout: {:?}",
            config.base_url.dimmed(),
            config.days,
            config.request_delay,
            config.timeout
        );
    }

    match run(&cli, config).await {
        Ok(summary) => {
            if cli.strict && summary.is_empty() {
                eprintln!("{} no exchange rates collected", "Error:".red().bold());
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(cli: &Cli, config: RunConfig) -> anyhow::Result<RunSummary> {
    let sort_by_code = config.sort_by_code;
    let source = CbrDailySource::from_config(&config).context("creating feed client")?;
    let collector = RateCollector::new(source, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = if cli.json {
        collector.run(&mut io::stderr()).await?
    } else {
        collector.run(&mut out).await?
    };

    if cli.json {
        report::write_json(&mut out, &summary).context("writing JSON report")?;
    } else {
        report::write_summary(&mut out, &summary, sort_by_code).context("writing report")?;
    }
    out.flush()?;

    if cli.verbose {
        eprintln!(
            "{} {}/{} days fetched",
            "Done:".green().bold(),
            summary.days_succeeded,
            summary.days_requested
        );
    }

    Ok(summary)
}
