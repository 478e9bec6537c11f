//! Stock Price Monte Carlo Simulation Library
//!
//! Estimates the distribution of a security's future price by resampling
//! or modelling its historical daily returns and compounding them into many
//! independent price paths.
//!
//! ## Modules
//!
//! - `returns`: daily returns and sample statistics from closing prices
//! - `generator`: simulated return matrix (bootstrap or normal model)
//! - `paths`: compounds returns into price paths anchored at the last close
//! - `report`: probability and percentile statistics over the ensemble
//! - `simulation`: end-to-end run with seeded or entropy-seeded randomness
//! - `market`: price series and market data providers (CSV, in-memory)
//! - `cli`: command-line arguments for the `stocksim` binary
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --ticker AAPL --target-price 200 --prices aapl.csv
//! ```

pub mod cli;
pub mod error;
pub mod generator;
pub mod market;
pub mod matrix;
pub mod paths;
pub mod report;
pub mod returns;
pub mod simulation;

pub use error::{Result, SimError};
pub use generator::{generate_returns, ReturnMatrix, ReturnModel};
pub use market::{CsvPriceSource, MarketDataProvider, PriceSeries, StaticPriceSource};
pub use paths::{build_paths, PathEnsemble};
pub use report::{summarize, SimulationReport, ThresholdProbability, Thresholds};
pub use returns::daily_returns;
pub use simulation::{run_simulation, simulate, simulate_report, SimulationConfig};
