//! Stock Price Simulation Binary
//!
//! Loads historical closes for a ticker and reports the simulated
//! probability of reaching a target price.
//!
//! ## Usage
//! ```bash
//! cargo run --release -- --ticker AAPL --target-price 200 --data-dir data
//! ```

use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use stocksim::cli::Cli;
use stocksim::{simulate_report, MarketDataProvider};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.simulation_config()?;
    let thresholds = cli.thresholds()?;

    let prices = cli.price_source().closing_prices(&cli.ticker, cli.lookback)?;
    let report = simulate_report(&prices, &config, &thresholds)?;

    report.write_to(&mut io::stdout().lock(), &cli.ticker, config.model.name())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
