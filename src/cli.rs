//! Command-line arguments for the `stocksim` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Result, SimError};
use crate::generator::ReturnModel;
use crate::market::{CsvPriceSource, DEFAULT_LOOKBACK};
use crate::report::Thresholds;
use crate::simulation::SimulationConfig;

/// Simulate stock price over a future period
#[derive(Debug, Parser)]
#[command(name = "stocksim", version)]
pub struct Cli {
    /// Stock ticker symbol
    #[arg(long)]
    pub ticker: String,

    /// Number of days for simulation
    #[arg(long, default_value_t = 30)]
    pub days: usize,

    /// Target price for probability calculation
    #[arg(long)]
    pub target_price: f64,

    /// Number of Monte Carlo simulations
    #[arg(long = "runs", visible_alias = "simulations", default_value_t = 1000)]
    pub runs: usize,

    /// How simulated daily returns are drawn
    #[arg(long, value_enum, default_value_t = ReturnModel::Bootstrap)]
    pub returns_dist: ReturnModel,

    /// Threshold for the ever-above probability (defaults to the target price)
    #[arg(long)]
    pub ever_above: Option<f64>,

    /// Threshold for the ever-below probability
    #[arg(long)]
    pub ever_below: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory holding <TICKER>.csv price files
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Single CSV price file, used instead of --data-dir
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Trailing trading days of history to use
    #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
    pub lookback: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn simulation_config(&self) -> Result<SimulationConfig> {
        if self.lookback < 2 {
            return Err(SimError::InvalidParameter(format!(
                "lookback must cover at least 2 trading days, got {}",
                self.lookback
            )));
        }
        let config = SimulationConfig {
            days: self.days,
            simulations: self.runs,
            model: self.returns_dist,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn thresholds(&self) -> Result<Thresholds> {
        let thresholds = Thresholds {
            target_price: self.target_price,
            ever_above: self.ever_above,
            ever_below: self.ever_below,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn price_source(&self) -> CsvPriceSource {
        match &self.prices {
            Some(path) => CsvPriceSource::from_file(path),
            None => CsvPriceSource::from_dir(&self.data_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = ["stocksim", "--ticker", "AAPL", "--target-price", "10.0"];
        Cli::try_parse_from(argv.iter().chain(args)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let config = cli.simulation_config().unwrap();

        assert_eq!(config, SimulationConfig::default());
        assert_eq!(cli.lookback, DEFAULT_LOOKBACK);
        assert!(cli.thresholds().unwrap().ever_below.is_none());
    }

    #[test]
    fn test_all_options() {
        let cli = parse(&[
            "--days",
            "5",
            "--runs",
            "10",
            "--returns-dist",
            "normal",
            "--ever-above",
            "12",
            "--ever-below",
            "9",
            "--seed",
            "42",
        ]);
        let config = cli.simulation_config().unwrap();
        let thresholds = cli.thresholds().unwrap();

        assert_eq!(config.days, 5);
        assert_eq!(config.simulations, 10);
        assert_eq!(config.model, ReturnModel::Normal);
        assert_eq!(config.seed, Some(42));
        assert_eq!(thresholds.ever_above_threshold(), 12.0);
        assert_eq!(thresholds.ever_below, Some(9.0));
    }

    #[test]
    fn test_simulations_alias() {
        assert_eq!(parse(&["--simulations", "7"]).runs, 7);
    }

    #[test]
    fn test_invalid_values() {
        assert!(Cli::try_parse_from(["stocksim", "--ticker", "X"]).is_err());
        let bad_model = ["stocksim", "--ticker", "X", "--target-price", "1"];
        assert!(Cli::try_parse_from(bad_model.iter().chain(&["--returns-dist", "gbm"])).is_err());

        let cli = parse(&["--runs", "0"]);
        assert!(matches!(cli.simulation_config(), Err(SimError::InvalidParameter(_))));

        let cli = Cli::try_parse_from(["stocksim", "--ticker", "X", "--target-price=-3"]).unwrap();
        assert!(matches!(cli.thresholds(), Err(SimError::InvalidParameter(_))));
    }

    #[test]
    fn test_lookback_below_two_rejected() {
        for lookback in ["0", "1"] {
            let cli = parse(&["--lookback", lookback]);
            assert!(matches!(cli.simulation_config(), Err(SimError::InvalidParameter(_))));
        }
        assert!(parse(&["--lookback", "2"]).simulation_config().is_ok());
    }
}
